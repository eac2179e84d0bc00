//! Fake Provider - 用于测试的发音提供方
//!
//! 按单词返回预设结果，不访问网络

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::application::ports::{FetchError, PronunciationProviderPort};
use crate::domain::lookup::{LookupKey, LookupResult, PronunciationItem};

/// Fake Provider
///
/// 未预设的单词返回空结果
#[derive(Default)]
pub struct FakeProvider {
    results: DashMap<String, LookupResult>,
    failures: DashMap<String, u16>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// 为单词预设 n 条录音，远程引用为 `fake://{word}/{i}`
    pub fn with_items(self, word: &str, n: u32) -> Self {
        let items = (0..n)
            .map(|i| {
                let mut item = PronunciationItem::new(i, format!("fake://{}/{}", word, i));
                item.rating = (n - i) as i32;
                item
            })
            .collect();
        self.results
            .insert(word.to_string(), LookupResult::new(items));
        self
    }

    /// 为单词预设非 2xx 响应
    pub fn with_failure(self, word: &str, status: u16) -> Self {
        self.failures.insert(word.to_string(), status);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PronunciationProviderPort for FakeProvider {
    async fn fetch(&self, key: &LookupKey) -> Result<LookupResult, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.failures.get(key.word()) {
            return Err(FetchError::Provider {
                status: *status,
                body: "fake failure".to_string(),
            });
        }

        Ok(self
            .results
            .get(key.word())
            .map(|r| r.clone())
            .unwrap_or_else(LookupResult::empty))
    }
}
