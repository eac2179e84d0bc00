//! Lookup Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("查询单词不能为空")]
    EmptyWord,

    #[error("语言代码不能为空")]
    EmptyLanguage,
}
