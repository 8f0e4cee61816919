// Library root for the school records API

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;

// Re-export commonly used types
pub use config::Config;
pub use db::{DatabaseHandle, DocumentStore};
pub use error::ApiError;
pub use handlers::{create_router, AppState};
