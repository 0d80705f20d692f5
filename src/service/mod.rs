//! Query service for Cat records
//!
//! Every operation checks its inputs before the repository is touched.

mod cat_service;
mod errors;

pub use cat_service::{CatService, TOP_THREE};
pub use errors::{ServiceError, ServiceResult};
