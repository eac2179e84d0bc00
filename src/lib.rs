//! Prono - 单词发音查询与播放
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Lookup Context: 查询键、候选录音列表
//! - Selection: 播放选择策略
//!
//! 应用层 (application/):
//! - Ports: 端口定义（PronunciationProvider, AudioDownload, CacheStore, PlayCount, Player, InputSource）
//! - Commands: 查询并播放的用例
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Forvo HTTP 客户端、外部进程（播放器、语音合成、剪贴板）
//! - Persistence: 磁盘缓存
//! - Memory: 播放计数、查询世代号
//! - Worker: 并发音频缓存、持续查询循环

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
