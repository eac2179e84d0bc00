//! Fake Downloader - 用于测试的音频下载器
//!
//! 返回 `audio from {remote_ref}` 作为音频内容

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{AudioDownloadPort, AudioFetchError};

#[derive(Default)]
pub struct FakeDownloader {
    failures: DashMap<String, u16>,
    delays_ms: DashMap<String, u64>,
    panics: DashMap<String, ()>,
    calls: AtomicUsize,
}

impl FakeDownloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// 对该引用返回非 2xx 状态
    pub fn failing(self, remote_ref: &str, status: u16) -> Self {
        self.failures.insert(remote_ref.to_string(), status);
        self
    }

    /// 对该引用延迟响应
    pub fn delayed(self, remote_ref: &str, ms: u64) -> Self {
        self.delays_ms.insert(remote_ref.to_string(), ms);
        self
    }

    /// 对该引用直接 panic（模拟任务异常退出）
    pub fn panicking(self, remote_ref: &str) -> Self {
        self.panics.insert(remote_ref.to_string(), ());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AudioDownloadPort for FakeDownloader {
    async fn download(&self, remote_ref: &str) -> Result<Vec<u8>, AudioFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays_ms.get(remote_ref).map(|d| *d);
        if let Some(ms) = delay {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
        if self.panics.contains_key(remote_ref) {
            panic!("fake downloader panicked for {}", remote_ref);
        }
        if let Some(status) = self.failures.get(remote_ref) {
            return Err(AudioFetchError::BadStatus(*status));
        }

        Ok(format!("audio from {}", remote_ref).into_bytes())
    }
}
