//! Play Count Port - 会话内播放次数表
//!
//! 只存在于进程生命周期内，计数只增不减

use std::path::Path;

pub trait PlayCountPort: Send + Sync {
    /// 当前播放次数，未播放过为 0
    fn count(&self, path: &Path) -> u32;

    /// 记录一次播放，返回新的次数
    fn record_play(&self, path: &Path) -> u32;
}
