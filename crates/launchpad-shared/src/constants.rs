//! Application-wide constants

pub const TOKEN_TYPE_ACCESS: &str = "access";
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const DEFAULT_SESSION_TTL: i64 = 604800;
pub const DEFAULT_PENDING_APPLICATION_TTL: i64 = 86400;
pub const DEFAULT_PURGE_INTERVAL: i64 = 300;
pub const DEFAULT_LOGIN_ATTEMPTS_PER_MINUTE: u32 = 5;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MIN_PASSWORD_SCORE: u8 = 2;
pub const MIN_APPLICATION_DESCRIPTION_LENGTH: usize = 50;
