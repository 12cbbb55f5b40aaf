//! # Configuration DTO / 配置数据
//!
//! Plain configuration data mapped from TOML. Missing keys take the values in
//! [`defaults`]; no other policy lives here.
//!
//! ```toml
//! [api]
//! base_url = "https://app.example.com"
//! timeout_ms = 10000
//! access_token = ""
//!
//! [sync]
//! max_attempts = 3
//! base_delay_ms = 200
//! debounce_ms = 400
//!
//! [network]
//! probe_interval_ms = 15000
//!
//! [logging]
//! file_logging = true
//! ```

pub mod defaults;

use std::time::Duration;

use crate::sync::RetryPolicy;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin, without trailing slash
    pub api_base_url: String,

    /// Per-request timeout
    pub request_timeout_ms: u64,

    /// Bearer token for the signed-in session (may be empty: signed out)
    /// 登录会话令牌（可以为空：未登录）
    pub access_token: String,

    pub sync_max_attempts: u32,
    pub sync_base_delay_ms: u64,
    pub sync_debounce_ms: u64,

    /// How often the connectivity probe runs
    pub network_probe_interval_ms: u64,

    /// Write a log file next to stdout
    pub file_logging: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section = |name: &str| toml_value.get(name);
        let str_at = |sec: &str, key: &str| {
            section(sec)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let int_at = |sec: &str, key: &str| -> anyhow::Result<Option<u64>> {
            match section(sec).and_then(|s| s.get(key)) {
                None => Ok(None),
                Some(value) => {
                    let raw = value
                        .as_integer()
                        .ok_or_else(|| anyhow::anyhow!("[{sec}].{key} must be an integer"))?;
                    let parsed = u64::try_from(raw)
                        .map_err(|_| anyhow::anyhow!("[{sec}].{key} must not be negative"))?;
                    Ok(Some(parsed))
                }
            }
        };

        let sync_max_attempts = int_at("sync", "max_attempts")?
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(defaults::SYNC_MAX_ATTEMPTS);

        Ok(Self {
            api_base_url: str_at("api", "base_url")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| defaults::API_BASE_URL.to_string()),
            request_timeout_ms: int_at("api", "timeout_ms")?
                .unwrap_or(defaults::REQUEST_TIMEOUT_MS),
            access_token: str_at("api", "access_token").unwrap_or_default(),
            sync_max_attempts,
            sync_base_delay_ms: int_at("sync", "base_delay_ms")?
                .unwrap_or(defaults::SYNC_BASE_DELAY_MS),
            sync_debounce_ms: int_at("sync", "debounce_ms")?.unwrap_or(defaults::SYNC_DEBOUNCE_MS),
            network_probe_interval_ms: int_at("network", "probe_interval_ms")?
                .unwrap_or(defaults::NETWORK_PROBE_INTERVAL_MS),
            file_logging: section("logging")
                .and_then(|s| s.get("file_logging"))
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults::FILE_LOGGING),
        })
    }

    /// Configuration with every value at its default.
    pub fn defaults() -> Self {
        Self {
            api_base_url: defaults::API_BASE_URL.to_string(),
            request_timeout_ms: defaults::REQUEST_TIMEOUT_MS,
            access_token: String::new(),
            sync_max_attempts: defaults::SYNC_MAX_ATTEMPTS,
            sync_base_delay_ms: defaults::SYNC_BASE_DELAY_MS,
            sync_debounce_ms: defaults::SYNC_DEBOUNCE_MS,
            network_probe_interval_ms: defaults::NETWORK_PROBE_INTERVAL_MS,
            file_logging: defaults::FILE_LOGGING,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.sync_max_attempts,
            Duration::from_millis(self.sync_base_delay_ms),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.sync_debounce_ms)
    }

    pub fn probe_interval(&self) -> Duration {
        Duration::from_millis(self.network_probe_interval_ms)
    }
}
