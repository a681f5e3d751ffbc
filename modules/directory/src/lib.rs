//! Directory module: users, roles, and the login endpoint.

pub mod api;
pub mod domain;
pub mod infra;

pub use api::rest::handlers::DirectoryState;
pub use api::rest::routes::router;
pub use domain::service::DirectoryService;
pub use infra::storage::migrations::migrations;
pub use infra::storage::sea_orm_repo::{SeaOrmRoleRepository, SeaOrmUserRepository};
pub use infra::storage::seed::{seed_identities, SeedAdmin};
