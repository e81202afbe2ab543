pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod upstream;

// Re-export commonly used items for tests / external users
pub use config::GatewayConfig;
pub use routes::{config as configure, cors_policy, static_files, AppState};
