//! Warden - administrative backend for game-server moderation
//!
//! This library provides the realtime presence and broadcast core (hub,
//! sessions, per-server rosters, chat fan-out) together with the infraction
//! service and the storage/directory seams they depend on.

pub mod config;
pub mod constants;
pub mod core;
pub mod directory;
pub mod error;
pub mod game;
pub mod handlers;
pub mod moderation;
pub mod storage;

// Re-export main components
pub use config::ServerConfig;
pub use error::{Result, WardenError};
