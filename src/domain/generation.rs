//! Generation Counter - 基于世代号的协作式取消
//!
//! 每个查询请求领取一个严格递增的世代号；只有最新世代是 live 的。
//! 被取代的任务不会被强行中止，只是在产生可见副作用（播放）前自行放弃。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// 进程级世代计数器
///
/// clone 出来的句柄共享同一个计数
#[derive(Debug, Clone, Default)]
pub struct GenerationCounter {
    latest: Arc<AtomicU64>,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 领取新的世代号，严格大于之前发出的所有世代号
    pub fn issue(&self) -> GenerationGuard {
        let stamp = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        GenerationGuard {
            counter: self.clone(),
            stamp,
        }
    }

    /// 最近发出的世代号
    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// 某次查询持有的世代号
#[derive(Debug, Clone)]
pub struct GenerationGuard {
    counter: GenerationCounter,
    stamp: u64,
}

impl GenerationGuard {
    /// 独立的世代号（单次查询模式），永远是 live 的
    pub fn standalone() -> Self {
        GenerationCounter::new().issue()
    }

    pub fn stamp(&self) -> u64 {
        self.stamp
    }

    /// 世代号是否仍等于最新发出的世代号
    pub fn is_live(&self) -> bool {
        self.counter.latest() == self.stamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamps_strictly_increase() {
        let counter = GenerationCounter::new();
        let g1 = counter.issue();
        let g2 = counter.issue();
        let g3 = counter.issue();
        assert!(g1.stamp() < g2.stamp());
        assert!(g2.stamp() < g3.stamp());
        assert_eq!(counter.latest(), g3.stamp());
    }

    #[test]
    fn test_only_latest_is_live() {
        let counter = GenerationCounter::new();
        let g1 = counter.issue();
        assert!(g1.is_live());

        let g2 = counter.issue();
        assert!(!g1.is_live());
        assert!(g2.is_live());
    }

    #[test]
    fn test_standalone_is_live() {
        assert!(GenerationGuard::standalone().is_live());
    }

    #[tokio::test]
    async fn test_concurrent_issue_yields_distinct_stamps() {
        let counter = GenerationCounter::new();
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counter = counter.clone();
            handles.push(tokio::spawn(async move {
                (0..25).map(|_| counter.issue().stamp()).collect::<Vec<_>>()
            }));
        }
        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.await.unwrap());
        }
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 200);
        assert_eq!(counter.latest(), 200);
    }
}
