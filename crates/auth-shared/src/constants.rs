//! Application-wide constants

/// Lifetime of an issued session token, in seconds.
pub const TOKEN_TTL_SECONDS: i64 = 600;
pub const SESSION_COOKIE_NAME: &str = "session_id";
pub const SESSION_COOKIE_PATH: &str = "/";
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const DEFAULT_NOTIFY_CHANNEL: &str = "my-channel";
pub const DEFAULT_NOTIFY_EVENT: &str = "my-event";
pub const DEFAULT_EVENT_BUS_CAPACITY: usize = 256;
