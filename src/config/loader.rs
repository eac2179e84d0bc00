//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 命令行参数（由 cli 模块在加载后覆盖）
//! 2. 环境变量
//! 3. 配置文件（prono.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["prono", "prono.local"];

/// 环境变量前缀
const ENV_PREFIX: &str = "PRONO";

/// API Key 的后备环境变量
pub const API_KEY_ENV: &str = "FORVO_API_KEY";

/// 加载应用配置
///
/// # 环境变量示例
/// - `PRONO_LOOKUP__LANG=de`
/// - `PRONO_LOOKUP__MAX_TO_PLAY=1`
/// - `PRONO_CACHE__DIR=/tmp/forvocache`
/// - `PRONO_PROVIDER__API_KEY=...`（或 `FORVO_API_KEY=...`）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut app_config = build_config(config_path, ENV_PREFIX)?;
    apply_api_key_fallback(&mut app_config, std::env::var(API_KEY_ENV).ok());
    validate_config(&app_config)?;
    Ok(app_config)
}

fn build_config(config_path: Option<&Path>, env_prefix: &str) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），其余字段由 serde 默认值补齐
    builder = builder
        .set_default("provider.host", "apifree.forvo.com")?
        .set_default("provider.insecure", false)?
        .set_default("lookup.max_to_play", 3)?
        .set_default("lookup.shuffle_top_n", 3)?
        .set_default("lookup.prefetch_all", true)?
        .set_default("clipboard.poll_interval_ms", 250)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量
    // 层级分隔符: __ (双下划线)，例如 PRONO_LOOKUP__LANG=de
    builder = builder.add_source(
        Environment::with_prefix(env_prefix)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })
}

/// 配置中未设置 API Key 时使用 `FORVO_API_KEY`
fn apply_api_key_fallback(config: &mut AppConfig, env_value: Option<String>) {
    if !config.provider.api_key.trim().is_empty() {
        return;
    }
    if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
        config.provider.api_key = key;
    }
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.provider.host.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Provider host cannot be empty".to_string(),
        ));
    }

    if config.player.program.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Player program cannot be empty".to_string(),
        ));
    }

    if config.clipboard.poll_interval_ms == 0 {
        return Err(ConfigError::ValidationError(
            "Clipboard poll interval cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 查询前检查 API Key
pub fn require_api_key(config: &AppConfig) -> Result<(), ConfigError> {
    if config.provider.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "API key is not set (use {} or provider.api_key)",
            API_KEY_ENV
        )));
    }
    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Configuration ===");
    tracing::debug!(
        "Provider: {}://{}",
        if config.provider.insecure { "http" } else { "https" },
        config.provider.host
    );
    tracing::debug!("API Key: {}", if config.provider.api_key.is_empty() { "<unset>" } else { "<set>" });
    tracing::debug!("Cache Directory: {:?}", config.cache.dir);
    tracing::debug!("Language: {}", config.lookup.lang);
    tracing::debug!(
        "Selection: max {} / shuffle top {}",
        config.lookup.max_to_play,
        config.lookup.shuffle_top_n
    );
    tracing::debug!("Prefetch All: {}", config.lookup.prefetch_all);
    if let Some(voice) = &config.lookup.fallback_voice {
        tracing::debug!("Fallback Voice: {}", voice);
    }
    tracing::debug!("Player: {} {:?}", config.player.program, config.player.args);
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=====================");
}
