//! HTTP skeleton for the chat RAG deployment: environment-driven settings,
//! a static frontend and a few probe endpoints.

pub mod config;
pub mod error;
pub mod routes;

pub use config::Settings;
pub use error::ApiError;
pub use routes::build_router;
