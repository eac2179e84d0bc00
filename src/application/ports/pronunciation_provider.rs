//! Pronunciation Provider Port - 远程发音提供方抽象
//!
//! 一次请求返回某个查询键的全部候选录音，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::lookup::{LookupKey, LookupResult};

/// 元数据获取错误（对本次查询是终止性的，不重试）
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 非 2xx 响应，附带提供方返回的状态与正文
    #[error("Provider complained: HTTP {status} ({body})")]
    Provider { status: u16, body: String },

    #[error("Failed to read provider response: {0}")]
    ReadError(String),

    #[error("Provider response could not be decoded ({reason}): {body}")]
    DecodeError { reason: String, body: String },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Pronunciation Provider Port
#[async_trait]
pub trait PronunciationProviderPort: Send + Sync {
    /// 获取按评分降序排列的候选录音列表
    async fn fetch(&self, key: &LookupKey) -> Result<LookupResult, FetchError>;
}
