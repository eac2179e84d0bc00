//! Audio Download Port - 远程音频资源下载

use async_trait::async_trait;
use thiserror::Error;

/// 单条音频下载错误
#[derive(Debug, Error)]
pub enum AudioFetchError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Bad download status for audio file: HTTP {0}")]
    BadStatus(u16),

    #[error("Error while downloading audio: {0}")]
    ReadError(String),
}

/// Audio Download Port
///
/// 一次 GET 完整读入内存，非 2xx 视为失败而不是部分成功
#[async_trait]
pub trait AudioDownloadPort: Send + Sync {
    async fn download(&self, remote_ref: &str) -> Result<Vec<u8>, AudioFetchError>;
}
