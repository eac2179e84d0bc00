//! 应用层错误定义
//!
//! 只有元数据获取失败与"全部录音都缓存失败"会让一次查询以错误结束；
//! 缓存写入失败、单条音频失败、播放失败都只记录日志并继续。

use thiserror::Error;

use crate::application::ports::FetchError;
use crate::domain::lookup::LookupError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 查询键无效
    #[error("Invalid lookup: {0}")]
    InvalidKey(#[from] LookupError),

    /// 元数据获取失败
    #[error("Could not download results: {0}")]
    Fetch(#[from] FetchError),

    /// 所有选中的录音都未能缓存
    #[error("Could not download any pronunciations ({failed} failed)")]
    AllItemsFailed { failed: usize },
}
