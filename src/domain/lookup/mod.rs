//! Lookup Context - 发音查询上下文
//!
//! 包含:
//! - LookupKey: 规范化的 (单词, 语言) 查询键
//! - PronunciationItem / LookupResult: 提供方返回的候选录音列表

mod entities;
mod errors;
mod value_objects;

pub use entities::{LookupResult, PronunciationItem};
pub use errors::LookupError;
pub use value_objects::{normalize, LookupKey};
