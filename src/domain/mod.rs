//! Domain Layer - 领域层
//!
//! 包含:
//! - Lookup Context: 发音查询键与候选录音
//! - 播放选择策略（纯函数，无 I/O）
//! - 查询世代号（被新查询取代的判断）

pub mod lookup;

mod generation;
mod selection;

pub use generation::{GenerationCounter, GenerationGuard};
pub use selection::{select, SelectionConfig, DEFAULT_SHUFFLE_TOP_N};
