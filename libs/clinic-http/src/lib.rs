//! Shared HTTP building blocks for the clinic server.
//!
//! Every endpoint answers with the same envelope (`ApiResponse`), every
//! failure path funnels through `ApiError`, and list endpoints share the
//! pagination contract in [`pagination`].

pub mod audit;
pub mod envelope;
pub mod error;
pub mod pagination;
pub mod upload;
pub mod validate;

pub use envelope::{ApiResponse, FieldError};
pub use error::{ApiError, ApiResult};
pub use pagination::{PageInfo, PageParams};
pub use upload::FileStorage;
