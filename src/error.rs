use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum WardenError {
    // Hub / session errors
    HubClosed,
    SessionNotFound(i64),

    // Connection errors
    ConnectionError(String),
    ConnectionClosed,

    // Message errors
    MessageParseError(String),

    // Storage errors
    StorageError(String),

    // Validation errors
    ValidationError(String),
    NotFound(String),

    // Configuration errors
    ConfigError(String),
    UnknownGame(String),
}

impl fmt::Display for WardenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HubClosed => write!(f, "Hub control loop is no longer running"),
            Self::SessionNotFound(user_id) => write!(f, "Session not found for user: {}", user_id),
            Self::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            Self::ConnectionClosed => write!(f, "Connection closed unexpectedly"),
            Self::MessageParseError(msg) => write!(f, "Message parse error: {}", msg),
            Self::StorageError(msg) => write!(f, "Storage error: {}", msg),
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::NotFound(what) => write!(f, "Not found: {}", what),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::UnknownGame(tag) => write!(f, "Unknown game variant: {}", tag),
        }
    }
}

impl Error for WardenError {}

// Generic result type for Warden
pub type Result<T> = std::result::Result<T, WardenError>;
