//! Listener configuration for the HTTP server.
//!
//! The address comes from the `[server]` table of `config.toml`; the `PORT` environment
//! variable, when set, takes precedence over the configured port.

use crate::errors::{Error, Result};
use serde::Deserialize;

/// Environment variable that overrides the configured port.
pub const PORT_ENV_VAR: &str = "PORT";

/// Where the HTTP server listens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind, e.g. `0.0.0.0` or `127.0.0.1`
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for `TcpListener::bind`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Replaces the port with `port` when one is given.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when `port` is not a valid TCP port number.
    pub fn with_port_override(mut self, port: Option<&str>) -> Result<Self> {
        if let Some(raw) = port {
            self.port = raw.trim().parse().map_err(|e| Error::Config {
                message: format!("{PORT_ENV_VAR} must be a port number, got {raw:?}: {e}"),
            })?;
        }
        Ok(self)
    }
}

/// Reads the port override from the environment, if any.
#[must_use]
pub fn port_from_env() -> Option<String> {
    std::env::var(PORT_ENV_VAR).ok()
}
