//! Lookup Handler - 查询、选择、缓存、播放
//!
//! 流程:
//! 1. 获取元数据（缓存优先）
//! 2. 无结果时使用后备语音合成（如已配置）
//! 3. 按播放次数与随机窗口选出本次要播放的录音
//! 4. 并发确保音频已缓存
//! 5. 按选择顺序播放，每条播放前检查世代号是否仍 live

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::metadata_fetcher::MetadataFetcher;
use crate::application::commands::lookup_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AudioDownloadPort, AudioPlayerPort, CacheStorePort, PlayCountPort,
    PronunciationProviderPort, SpeechSynthPort,
};
use crate::domain::lookup::{LookupKey, PronunciationItem};
use crate::domain::{select, GenerationGuard, SelectionConfig};

use super::audio_cacher::AudioCacher;

/// 查询处理配置
#[derive(Debug, Clone)]
pub struct LookupHandlerConfig {
    /// 忽略已有缓存，重新下载元数据与音频
    pub force_refresh: bool,
    /// 缓存全部录音而不只是选中的
    pub prefetch_all: bool,
    pub selection: SelectionConfig,
    /// 没有录音时用于语音合成的声音
    pub fallback_voice: Option<String>,
    /// 记录远程请求耗时
    pub log_timing: bool,
}

impl Default for LookupHandlerConfig {
    fn default() -> Self {
        Self {
            force_refresh: false,
            prefetch_all: true,
            selection: SelectionConfig::default(),
            fallback_voice: None,
            log_timing: false,
        }
    }
}

/// 查询处理器依赖的端口
pub struct LookupPorts {
    pub cache: Arc<dyn CacheStorePort>,
    pub provider: Arc<dyn PronunciationProviderPort>,
    pub downloader: Arc<dyn AudioDownloadPort>,
    pub play_counts: Arc<dyn PlayCountPort>,
    pub player: Arc<dyn AudioPlayerPort>,
    pub speech: Arc<dyn SpeechSynthPort>,
}

/// Lookup Handler
pub struct LookupHandler {
    config: LookupHandlerConfig,
    fetcher: MetadataFetcher,
    cacher: AudioCacher,
    cache: Arc<dyn CacheStorePort>,
    play_counts: Arc<dyn PlayCountPort>,
    player: Arc<dyn AudioPlayerPort>,
    speech: Arc<dyn SpeechSynthPort>,
}

impl LookupHandler {
    pub fn new(config: LookupHandlerConfig, ports: LookupPorts) -> Self {
        let fetcher = MetadataFetcher::new(ports.cache.clone(), ports.provider)
            .with_timing(config.log_timing);
        let cacher = AudioCacher::new(ports.cache.clone(), ports.downloader);

        Self {
            config,
            fetcher,
            cacher,
            cache: ports.cache,
            play_counts: ports.play_counts,
            player: ports.player,
            speech: ports.speech,
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn handle(&self, cmd: LookupCommand) -> Result<LookupReport, ApplicationError> {
        let LookupCommand { key, guard } = cmd;
        let force_refresh = self.config.force_refresh;

        let result = self.fetcher.fetch(&key, force_refresh).await?;
        let mut report = LookupReport::new(key.clone(), guard.stamp(), result.len());

        tracing::info!(
            word = %key.word(),
            lang = %key.lang(),
            generation = guard.stamp(),
            items = result.len(),
            "Pronunciation list ready"
        );

        if result.is_empty() {
            self.speak_fallback(&key, &guard, &mut report).await;
            return Ok(report);
        }

        let selected = self.select(&key, &result.items);
        report.selected = selected.len();

        let to_cache: &[PronunciationItem] = if self.config.prefetch_all {
            &result.items
        } else {
            &selected
        };

        let mut ready: HashMap<u32, PathBuf> = HashMap::new();
        self.cacher
            .ensure_all(&key, to_cache, force_refresh, |outcome| match outcome.result {
                Ok(_) => {
                    ready.insert(outcome.index, outcome.path);
                }
                Err(e) => report.cache_failures.push(ItemFailure {
                    index: Some(outcome.index),
                    message: e.to_string(),
                }),
            })
            .await;

        let playable: Vec<(&PronunciationItem, PathBuf)> = selected
            .iter()
            .filter_map(|item| ready.get(&item.index).map(|path| (item, path.clone())))
            .collect();

        if playable.is_empty() {
            return Err(ApplicationError::AllItemsFailed {
                failed: selected.len(),
            });
        }

        for (item, path) in playable {
            if !guard.is_live() {
                tracing::debug!(
                    word = %key.word(),
                    generation = guard.stamp(),
                    "Lookup superseded, skipping remaining playback"
                );
                report.outcome = LookupOutcome::Superseded;
                break;
            }

            tracing::info!(word = %key.word(), "Playing {}", item.summary());
            match self.player.play(&path).await {
                Ok(()) => {
                    self.play_counts.record_play(&path);
                    report.played.push(path);
                }
                Err(e) => {
                    tracing::warn!(
                        word = %key.word(),
                        index = item.index,
                        path = %path.display(),
                        error = %e,
                        "Playback failed"
                    );
                    report.playback_errors.push(ItemFailure {
                        index: Some(item.index),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// 选择要播放的录音（rng 不跨 await 持有）
    fn select(&self, key: &LookupKey, items: &[PronunciationItem]) -> Vec<PronunciationItem> {
        let mut rng = rand::thread_rng();
        select(
            items,
            |item| self.play_counts.count(&self.cache.audio_path(key, item.index)),
            self.config.selection,
            &mut rng,
        )
    }

    async fn speak_fallback(
        &self,
        key: &LookupKey,
        guard: &GenerationGuard,
        report: &mut LookupReport,
    ) {
        let Some(voice) = &self.config.fallback_voice else {
            tracing::info!(word = %key.word(), lang = %key.lang(), "No results");
            return;
        };

        if !guard.is_live() {
            report.outcome = LookupOutcome::Superseded;
            return;
        }

        tracing::info!(word = %key.word(), voice = %voice, "No results, using speech synthesis");
        report.used_fallback = true;
        if let Err(e) = self.speech.speak(key.word(), voice).await {
            tracing::warn!(word = %key.word(), error = %e, "Fallback speech failed");
            report.playback_errors.push(ItemFailure {
                index: None,
                message: e.to_string(),
            });
        }
    }
}
