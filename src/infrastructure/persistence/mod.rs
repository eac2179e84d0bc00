//! Persistence Layer - 数据持久化
//!
//! 磁盘缓存实现

pub mod fs;

pub use self::fs::FileCacheStore;
