//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::commands::handlers::LookupHandlerConfig;
use crate::domain::SelectionConfig;
use crate::infrastructure::adapters::{CommandSpec, HttpForvoClientConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 发音提供方配置
    #[serde(default)]
    pub provider: ProviderConfig,

    /// 缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 查询配置
    #[serde(default)]
    pub lookup: LookupConfig,

    /// 播放器配置
    #[serde(default)]
    pub player: PlayerConfig,

    /// 语音合成配置
    #[serde(default)]
    pub speech: SpeechConfig,

    /// 剪贴板配置
    #[serde(default)]
    pub clipboard: ClipboardConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 发音提供方配置
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_provider_host")]
    pub host: String,

    /// API Key，未设置时回退到 `FORVO_API_KEY`
    #[serde(default)]
    pub api_key: String,

    /// 使用 http 而不是 https
    #[serde(default)]
    pub insecure: bool,

    /// 请求超时时间（秒），不设置则使用传输层默认值
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_provider_host() -> String {
    "apifree.forvo.com".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: default_provider_host(),
            api_key: String::new(),
            insecure: false,
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    pub fn client_config(&self) -> HttpForvoClientConfig {
        HttpForvoClientConfig {
            host: self.host.clone(),
            api_key: self.api_key.clone(),
            insecure: self.insecure,
            timeout_secs: self.timeout_secs,
        }
    }
}

/// 缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 缓存根目录
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".forvocache"))
        .unwrap_or_else(|| PathBuf::from(".forvocache"))
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

/// 查询配置
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// 默认语言代码
    #[serde(default)]
    pub lang: String,

    /// 最多播放几条，<= 0 表示全部
    #[serde(default = "default_max_to_play")]
    pub max_to_play: i32,

    /// 随机打乱的前缀窗口大小
    #[serde(default = "default_shuffle_top_n")]
    pub shuffle_top_n: usize,

    #[serde(default)]
    pub force_refresh: bool,

    /// 缓存全部录音，而不只是本次选中的
    #[serde(default = "default_prefetch_all")]
    pub prefetch_all: bool,

    /// 没有录音时用于语音合成的声音
    #[serde(default)]
    pub fallback_voice: Option<String>,

    /// 记录远程请求耗时
    #[serde(default)]
    pub log_timing: bool,
}

fn default_max_to_play() -> i32 {
    3
}

fn default_shuffle_top_n() -> usize {
    crate::domain::DEFAULT_SHUFFLE_TOP_N
}

fn default_prefetch_all() -> bool {
    true
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            lang: String::new(),
            max_to_play: default_max_to_play(),
            shuffle_top_n: default_shuffle_top_n(),
            force_refresh: false,
            prefetch_all: default_prefetch_all(),
            fallback_voice: None,
            log_timing: false,
        }
    }
}

impl LookupConfig {
    pub fn handler_config(&self) -> LookupHandlerConfig {
        LookupHandlerConfig {
            force_refresh: self.force_refresh,
            prefetch_all: self.prefetch_all,
            selection: SelectionConfig {
                max_to_play: self.max_to_play,
                shuffle_top_n: self.shuffle_top_n,
            },
            fallback_voice: self
                .fallback_voice
                .clone()
                .filter(|voice| !voice.trim().is_empty()),
            log_timing: self.log_timing,
        }
    }
}

/// 播放器配置
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_player_program")]
    pub program: String,

    /// 放在文件路径之前的参数
    #[serde(default = "default_player_args")]
    pub args: Vec<String>,
}

fn default_player_program() -> String {
    "mplayer".to_string()
}

fn default_player_args() -> Vec<String> {
    vec!["-really-quiet".to_string()]
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            program: default_player_program(),
            args: default_player_args(),
        }
    }
}

impl PlayerConfig {
    pub fn command(&self) -> CommandSpec {
        CommandSpec {
            program: self.program.clone(),
            args: self.args.clone(),
        }
    }
}

/// 语音合成配置
///
/// 调用方式：`<program> <args> -v <voice> <text>`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    #[serde(default = "default_speech_program")]
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

fn default_speech_program() -> String {
    if cfg!(target_os = "macos") {
        "say".to_string()
    } else {
        "espeak".to_string()
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: default_speech_program(),
            args: Vec::new(),
        }
    }
}

impl SpeechConfig {
    pub fn command(&self) -> CommandSpec {
        CommandSpec {
            program: self.program.clone(),
            args: self.args.clone(),
        }
    }
}

/// 剪贴板配置（--watch 模式）
#[derive(Debug, Clone, Deserialize)]
pub struct ClipboardConfig {
    #[serde(default = "default_clipboard_program")]
    pub program: String,

    #[serde(default = "default_clipboard_args")]
    pub args: Vec<String>,

    /// 轮询间隔（毫秒）
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_clipboard_program() -> String {
    if cfg!(target_os = "macos") {
        "pbpaste".to_string()
    } else {
        "xclip".to_string()
    }
}

fn default_clipboard_args() -> Vec<String> {
    if cfg!(target_os = "macos") {
        Vec::new()
    } else {
        vec![
            "-selection".to_string(),
            "clipboard".to_string(),
            "-o".to_string(),
        ]
    }
}

fn default_poll_interval_ms() -> u64 {
    250
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            program: default_clipboard_program(),
            args: default_clipboard_args(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ClipboardConfig {
    pub fn command(&self) -> CommandSpec {
        CommandSpec {
            program: self.program.clone(),
            args: self.args.clone(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
