//! Storefront module: the clinic's own profile, a single row edited in
//! place and shown on receipts and printouts.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::handlers::StorefrontState;
pub use api::rest::routes::router;
pub use domain::service::StorefrontService;
pub use infra::storage::migrations::migrations;
pub use infra::storage::sea_orm_repo::SeaOrmStoreRepository;
pub use infra::storage::seed::seed_store;
