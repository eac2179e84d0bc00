//! Input Source Port - 被轮询的外部输入（剪贴板）

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input source: {0}")]
    ReadFailed(String),
}

#[async_trait]
pub trait InputSourcePort: Send + Sync {
    /// 读取当前文本内容
    async fn read(&self) -> Result<String, InputError>;
}
