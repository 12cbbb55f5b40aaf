//! Default configuration values (**keep in sync with `localbiz.example.toml`**).

pub const API_BASE_URL: &str = "http://localhost:3000";
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;
pub const SYNC_MAX_ATTEMPTS: u32 = 3;
pub const SYNC_BASE_DELAY_MS: u64 = 200;
pub const SYNC_DEBOUNCE_MS: u64 = 400;
pub const NETWORK_PROBE_INTERVAL_MS: u64 = 15_000;
pub const FILE_LOGGING: bool = true;
