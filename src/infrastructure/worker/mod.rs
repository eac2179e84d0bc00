//! Worker Layer - Background Task Processing
//!
//! 持续查询循环（--watch 模式）

mod lookup_loop;

pub use lookup_loop::{LookupLoop, LookupLoopConfig, RepeatFilter};
