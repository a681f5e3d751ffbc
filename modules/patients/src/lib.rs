//! Patients module: demographic records plus photo and document attachments.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::handlers::PatientsState;
pub use api::rest::routes::router;
pub use domain::service::PatientService;
pub use infra::storage::migrations::migrations;
pub use infra::storage::sea_orm_repo::SeaOrmPatientRepository;
