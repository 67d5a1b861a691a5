//! Server configuration module
//! Handles dynamic configuration parameters loaded from the environment

use crate::constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SESSION_QUEUE_DEPTH};
use crate::error::{Result, WardenError};
use std::env;

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Depth of each session's bounded outbound queue
    pub session_queue_depth: usize,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults in `constants` for anything unset.
    pub fn from_env() -> Result<Self> {
        let host = env::var("WARDEN_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var("WARDEN_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                WardenError::ConfigError(format!("WARDEN_PORT is not a valid port: {}", e))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let session_queue_depth = match env::var("WARDEN_SESSION_QUEUE_DEPTH") {
            Ok(raw) => {
                let depth = raw.parse::<usize>().map_err(|e| {
                    WardenError::ConfigError(format!(
                        "WARDEN_SESSION_QUEUE_DEPTH is not a valid size: {}",
                        e
                    ))
                })?;

                if depth == 0 {
                    return Err(WardenError::ConfigError(
                        "WARDEN_SESSION_QUEUE_DEPTH must be at least 1".to_string(),
                    ));
                }

                depth
            }
            Err(_) => DEFAULT_SESSION_QUEUE_DEPTH,
        };

        Ok(Self {
            host,
            port,
            session_queue_depth,
        })
    }
}
