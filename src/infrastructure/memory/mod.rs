//! Memory Layer - In-Memory State Management
//!
//! 会话内播放计数

mod play_counts;

pub use play_counts::InMemoryPlayCounts;
