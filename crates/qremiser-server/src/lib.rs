//! HTTP endpoint for qremiser.
//!
//! `GET /` serves an upload form; `POST /` accepts a multipart upload and
//! answers with the preservation record for the uploaded file.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, HealthResponse};
pub use router::build_router;
pub use server::QremiserServer;
