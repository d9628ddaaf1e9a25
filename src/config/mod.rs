//! Configuration management: `config.toml` plus environment overrides.

/// Application configuration file loading
pub mod app;

/// Listener address configuration
pub mod server;

pub use app::{AppConfig, load_app_configuration};
pub use server::ServerConfig;
