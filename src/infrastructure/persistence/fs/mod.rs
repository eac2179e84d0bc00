//! File System Persistence - 磁盘缓存实现

mod file_cache_store;
mod path_escape;

pub use file_cache_store::FileCacheStore;
