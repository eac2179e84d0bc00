//! Audio Cacher - 并发确保音频已缓存
//!
//! 每条录音一个独立任务，结果通过容量等于任务数的 mpsc 通道回传，
//! 任何任务上报结果都不会阻塞。调用方按完成顺序（而非提交顺序）收到回调。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::application::ports::{AudioDownloadPort, AudioFetchError, CacheError, CacheStorePort};
use crate::domain::lookup::{LookupKey, PronunciationItem};

/// 单条音频缓存错误
#[derive(Debug, Error)]
pub enum AudioCacheError {
    #[error(transparent)]
    Fetch(#[from] AudioFetchError),

    #[error("Error saving audio: {0}")]
    Write(#[from] CacheError),

    #[error("Cache task failed: {0}")]
    TaskFailed(String),
}

/// 成功时音频的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// 磁盘上已存在，未访问网络
    AlreadyCached,
    /// 本次下载并写入
    Downloaded,
}

/// 单条录音的处理结果
#[derive(Debug)]
pub struct AudioCacheOutcome {
    /// 录音在提供方列表中的序号
    pub index: u32,
    /// 解析出的本地音频路径
    pub path: PathBuf,
    pub result: Result<CacheStatus, AudioCacheError>,
}

impl AudioCacheOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    pub fn was_cached(&self) -> bool {
        matches!(self.result, Ok(CacheStatus::AlreadyCached))
    }
}

/// 并发音频缓存器
pub struct AudioCacher {
    cache: Arc<dyn CacheStorePort>,
    downloader: Arc<dyn AudioDownloadPort>,
}

impl AudioCacher {
    pub fn new(cache: Arc<dyn CacheStorePort>, downloader: Arc<dyn AudioDownloadPort>) -> Self {
        Self { cache, downloader }
    }

    /// 确保每条录音都已存在于本地
    ///
    /// `on_each` 对每条录音恰好调用一次，按完成顺序同步调用；
    /// 所有任务完成并回调之后才返回。
    pub async fn ensure_all<F>(
        &self,
        key: &LookupKey,
        items: &[PronunciationItem],
        force_refresh: bool,
        mut on_each: F,
    ) where
        F: FnMut(AudioCacheOutcome),
    {
        if items.is_empty() {
            return;
        }

        let (tx, mut rx) = mpsc::channel::<(usize, AudioCacheOutcome)>(items.len());

        for (slot, item) in items.iter().enumerate() {
            let tx = tx.clone();
            let cache = self.cache.clone();
            let downloader = self.downloader.clone();
            let path = self.cache.audio_path(key, item.index);
            let remote_ref = item.remote_audio_ref.clone();
            let index = item.index;

            tokio::spawn(async move {
                let result =
                    ensure_one(cache.as_ref(), downloader.as_ref(), &path, &remote_ref, force_refresh)
                        .await;
                let _ = tx.send((slot, AudioCacheOutcome { index, path, result })).await;
            });
        }
        drop(tx);

        let mut reported = vec![false; items.len()];
        while let Some((slot, outcome)) = rx.recv().await {
            reported[slot] = true;
            log_outcome(key, &outcome);
            on_each(outcome);
        }

        // 任务 panic 时不会上报，补一条失败结果
        for (slot, item) in items.iter().enumerate() {
            if !reported[slot] {
                let outcome = AudioCacheOutcome {
                    index: item.index,
                    path: self.cache.audio_path(key, item.index),
                    result: Err(AudioCacheError::TaskFailed(
                        "task ended without reporting".to_string(),
                    )),
                };
                log_outcome(key, &outcome);
                on_each(outcome);
            }
        }
    }

    /// 收集全部结果（完成顺序）
    pub async fn ensure_all_collect(
        &self,
        key: &LookupKey,
        items: &[PronunciationItem],
        force_refresh: bool,
    ) -> Vec<AudioCacheOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        self.ensure_all(key, items, force_refresh, |outcome| outcomes.push(outcome))
            .await;
        outcomes
    }
}

/// 单条录音：命中则跳过网络，否则完整下载后原子写入
async fn ensure_one(
    cache: &dyn CacheStorePort,
    downloader: &dyn AudioDownloadPort,
    path: &Path,
    remote_ref: &str,
    force_refresh: bool,
) -> Result<CacheStatus, AudioCacheError> {
    if !force_refresh && cache.audio_exists(path).await {
        return Ok(CacheStatus::AlreadyCached);
    }

    let data = downloader.download(remote_ref).await?;
    cache.write_audio(path, &data).await?;
    Ok(CacheStatus::Downloaded)
}

fn log_outcome(key: &LookupKey, outcome: &AudioCacheOutcome) {
    match &outcome.result {
        Ok(status) => tracing::debug!(
            word = %key.word(),
            lang = %key.lang(),
            index = outcome.index,
            path = %outcome.path.display(),
            status = ?status,
            "Audio ready"
        ),
        Err(e) => tracing::warn!(
            word = %key.word(),
            lang = %key.lang(),
            index = outcome.index,
            error = %e,
            "Failed to cache audio"
        ),
    }
}
