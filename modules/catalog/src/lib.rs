//! Catalog module: the clinic's price list of offered services.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::handlers::CatalogState;
pub use api::rest::routes::router;
pub use domain::service::CatalogService;
pub use infra::storage::migrations::migrations;
pub use infra::storage::sea_orm_repo::SeaOrmCatalogRepository;
