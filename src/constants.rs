// Fundamental configuration constants
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 4000;
pub const WS_PATH: &str = "ws";

// Per-session outbound queue depth. A session whose queue is full has its
// broadcast copies dropped rather than stalling the hub.
pub const DEFAULT_SESSION_QUEUE_DEPTH: usize = 64;

// How many recent infractions the dashboard summary fetches by default.
pub const DEFAULT_RECENT_INFRACTIONS: usize = 10;
