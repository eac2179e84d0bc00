//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（发音提供方、音频下载、缓存、播放计数、播放器、输入源）
//! - commands: 查询命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{LookupHandler, LookupHandlerConfig, LookupPorts, MetadataFetcher},
    ItemFailure, LookupCommand, LookupOutcome, LookupReport,
};

pub use error::ApplicationError;

pub use ports::{
    AudioDownloadPort, AudioFetchError, AudioPlayerPort, CacheError, CacheStorePort, FetchError,
    InputError, InputSourcePort, PlayCountPort, PlaybackError, PronunciationProviderPort,
    SpeechSynthPort,
};
