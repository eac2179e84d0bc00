//! 应用层 - 命令
//!
//! 查询并播放发音的用例

mod lookup_commands;

pub mod handlers;

pub use lookup_commands::*;
