//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Locate the TOML file (`--config`, then `LOCALBIZ_CONFIG`, then `localbiz.toml`)
//!   / 定位 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Apply the `LOCALBIZ_ACCESS_TOKEN` override / 应用令牌环境变量覆盖
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business rules / 禁止业务规则**
//!
//! Default values live in `lb_core::config::defaults`, not here.
//! 默认值位于 `lb_core::config::defaults`，不在此处。

use std::path::{Path, PathBuf};

use anyhow::Context;
use lb_core::config::AppConfig;
use tracing::debug;

pub const CONFIG_PATH_ENV: &str = "LOCALBIZ_CONFIG";
pub const ACCESS_TOKEN_ENV: &str = "LOCALBIZ_ACCESS_TOKEN";
pub const DEFAULT_CONFIG_FILE: &str = "localbiz.toml";

/// Where the configuration comes from.
/// 配置来源。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by the user; the file must exist.
    /// 用户指定；文件必须存在。
    Explicit(PathBuf),
    /// The conventional file in the working directory; may be absent.
    /// 工作目录中的默认文件；可以不存在。
    Default(PathBuf),
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }
}

/// Pick the config file from the CLI flag or the environment.
/// 根据命令行参数或环境变量选择配置文件。
pub fn resolve_config_source(cli_path: Option<PathBuf>, env_path: Option<String>) -> ConfigSource {
    if let Some(path) = cli_path {
        return ConfigSource::Explicit(path);
    }
    match env_path.filter(|p| !p.trim().is_empty()) {
        Some(path) => ConfigSource::Explicit(PathBuf::from(path)),
        None => ConfigSource::Default(PathBuf::from(DEFAULT_CONFIG_FILE)),
    }
}

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
/// - A value has the wrong type (mapping error)
/// 在以下情况下返回错误：
/// - 无法读取文件（I/O 错误）
/// - 内容不是有效的 TOML（解析错误）
/// - 值类型错误（映射错误）
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Load from `source`; a missing default file yields the built-in defaults.
/// 从 `source` 加载；默认文件缺失时使用内置默认值。
pub fn load_from_source(source: &ConfigSource) -> anyhow::Result<AppConfig> {
    match source {
        ConfigSource::Default(path) if !path.exists() => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(AppConfig::defaults())
        }
        _ => load_config(source.path()),
    }
}

/// Overwrite the token when the environment provides a non-empty one.
/// 环境变量提供非空令牌时覆盖配置中的令牌。
pub fn apply_token_override(mut config: AppConfig, token: Option<String>) -> AppConfig {
    if let Some(token) = token.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        config.access_token = token;
    }
    config
}

/// Resolve, load and apply environment overrides in one go.
/// 一次性完成定位、加载和环境变量覆盖。
pub fn load_app_config(cli_path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let source = resolve_config_source(cli_path, std::env::var(CONFIG_PATH_ENV).ok());
    let config = load_from_source(&source)?;
    Ok(apply_token_override(
        config,
        std::env::var(ACCESS_TOKEN_ENV).ok(),
    ))
}
