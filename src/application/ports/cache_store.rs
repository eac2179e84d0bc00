//! Cache Store Port - 元数据与音频的磁盘缓存
//!
//! 缓存位置只由规范化的查询键和录音序号决定，永不淘汰

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::lookup::{LookupKey, LookupResult};

/// Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for CacheError {
    fn from(err: std::io::Error) -> Self {
        CacheError::IoError(err.to_string())
    }
}

/// Cache Store Port
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// 元数据文件路径（跨进程稳定）
    fn metadata_path(&self, key: &LookupKey) -> PathBuf;

    /// 第 index 条录音的音频文件路径
    fn audio_path(&self, key: &LookupKey, index: u32) -> PathBuf;

    /// 读取缓存的元数据
    ///
    /// 文件不存在、JSON 损坏、I/O 错误一律视为未命中，返回 None
    async fn read_metadata(&self, key: &LookupKey) -> Option<LookupResult>;

    /// 写入元数据（覆盖写，最后写入者胜出）
    async fn write_metadata(&self, key: &LookupKey, result: &LookupResult)
        -> Result<(), CacheError>;

    /// 仅检查存在性，不校验内容
    async fn audio_exists(&self, path: &Path) -> bool;

    /// 原子写入音频：要么完整出现在目标路径，要么什么都不留下
    async fn write_audio(&self, path: &Path, data: &[u8]) -> Result<(), CacheError>;
}
