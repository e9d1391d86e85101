//! Web API module.
//!
//! Exposes the gallery over HTTP: content listing, uploads, album creation
//! and album listing under `/api`, plus a health check and OpenAPI docs.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
