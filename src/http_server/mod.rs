//! # cattery HTTP Server Module
//!
//! Axum server exposing the Cat resource.
//!
//! # Endpoints
//!
//! - `/health` - Store kind and cat count
//! - `/cat/*` - Cat CRUD and field-driven queries

pub mod cat_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;

pub use cat_routes::CatState;
pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
