//! Request handlers for server endpoints.

pub mod websocket;

pub use websocket::handle_ws_client;
