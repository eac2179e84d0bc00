//! In-Memory Play Count Table

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::ports::PlayCountPort;

/// 内存播放次数表
///
/// audio path -> 本进程内播放次数，不持久化
pub struct InMemoryPlayCounts {
    counts: DashMap<PathBuf, u32>,
}

impl InMemoryPlayCounts {
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl Default for InMemoryPlayCounts {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayCountPort for InMemoryPlayCounts {
    fn count(&self, path: &Path) -> u32 {
        self.counts.get(path).map(|c| *c).unwrap_or(0)
    }

    fn record_play(&self, path: &Path) -> u32 {
        // entry 持有分片写锁，读-改-写不会丢失并发更新
        let mut count = self.counts.entry(path.to_path_buf()).or_insert(0);
        *count = count.saturating_add(1);
        tracing::debug!(path = %path.display(), count = *count, "Play recorded");
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_start_at_zero_and_increase() {
        let table = InMemoryPlayCounts::new();
        let path = Path::new("/cache/de/ich/ich-01.mp3");

        assert_eq!(table.count(path), 0);
        assert_eq!(table.record_play(path), 1);
        assert_eq!(table.record_play(path), 2);
        assert_eq!(table.count(path), 2);
        assert_eq!(table.count(Path::new("/cache/de/ich/ich-02.mp3")), 0);
    }

    #[tokio::test]
    async fn test_concurrent_increments_are_not_lost() {
        let table = InMemoryPlayCounts::new().arc();
        let path = PathBuf::from("/cache/de/ich/ich-01.mp3");

        let mut handles = Vec::new();
        for _ in 0..16 {
            let table = table.clone();
            let path = path.clone();
            handles.push(tokio::spawn(async move {
                for _ in 0..50 {
                    table.record_play(&path);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(table.count(&path), 800);
    }
}
