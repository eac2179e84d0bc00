//! Lookup Loop - 持续监听输入源并触发查询
//!
//! 每个新输入获得一个递增的世代号并在独立任务中运行完整查询；
//! 旧查询的网络与缓存 I/O 照常完成，只是不再播放。

use std::sync::Arc;
use std::time::Duration;

use tokio::task::{JoinError, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::commands::handlers::LookupHandler;
use crate::application::commands::LookupCommand;
use crate::application::ports::InputSourcePort;
use crate::domain::lookup::{normalize, LookupKey};
use crate::domain::GenerationCounter;

/// 循环配置
#[derive(Debug, Clone)]
pub struct LookupLoopConfig {
    pub lang: String,
    pub poll_interval: Duration,
}

impl Default for LookupLoopConfig {
    fn default() -> Self {
        Self {
            lang: String::new(),
            poll_interval: Duration::from_millis(250),
        }
    }
}

/// 重复输入过滤
///
/// 与上次相同的输入被忽略；非空输入之后出现一次空输入会"武装"重复，
/// 下一次相同输入将再次触发查询。
#[derive(Debug, Default)]
pub struct RepeatFilter {
    last: Option<String>,
    repeat_armed: bool,
}

impl RepeatFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回需要查询的输入（已规范化，与查询键一致）
    pub fn observe(&mut self, poll: &str) -> Option<String> {
        let normalized = normalize(poll);
        let input = normalized.as_str();

        if input.is_empty() {
            if self.last.is_some() {
                self.repeat_armed = true;
            }
            return None;
        }

        if self.last.as_deref() == Some(input) && !self.repeat_armed {
            return None;
        }

        self.last = Some(input.to_string());
        self.repeat_armed = false;
        Some(input.to_string())
    }
}

/// Lookup Loop
pub struct LookupLoop {
    config: LookupLoopConfig,
    input: Arc<dyn InputSourcePort>,
    handler: Arc<LookupHandler>,
    generations: GenerationCounter,
}

impl LookupLoop {
    pub fn new(
        config: LookupLoopConfig,
        input: Arc<dyn InputSourcePort>,
        handler: Arc<LookupHandler>,
    ) -> Self {
        Self {
            config,
            input,
            handler,
            generations: GenerationCounter::new(),
        }
    }

    /// 运行直到 `cancel` 触发
    ///
    /// 退出前使所有进行中的查询失效，并等待它们的 I/O 结束。
    pub async fn run(self, cancel: CancellationToken) {
        tracing::info!(
            lang = %self.config.lang,
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "LookupLoop started"
        );

        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut filter = RepeatFilter::new();
        let mut lookups = JoinSet::new();

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            // 回收已结束的任务
            while let Some(joined) = lookups.try_join_next() {
                log_join_failure(joined);
            }

            let text = match self.input.read().await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(error = %e, "Could not read input");
                    continue;
                }
            };

            let Some(word) = filter.observe(&text) else {
                continue;
            };

            let key = match LookupKey::new(&word, &self.config.lang) {
                Ok(key) => key,
                Err(e) => {
                    tracing::debug!(input = %word, error = %e, "Ignoring input");
                    continue;
                }
            };

            let guard = self.generations.issue();
            tracing::info!(word = %key.word(), generation = guard.stamp(), "New lookup");

            let handler = self.handler.clone();
            lookups.spawn(async move {
                let word = key.word().to_string();
                match handler.handle(LookupCommand { key, guard }).await {
                    Ok(report) if report.no_results() => {
                        tracing::info!(word = %word, "No pronunciations found");
                    }
                    Ok(report) => {
                        tracing::debug!(
                            word = %word,
                            generation = report.generation,
                            played = report.played.len(),
                            superseded = report.is_superseded(),
                            "Lookup finished"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(word = %word, error = %e, "Lookup failed");
                    }
                }
            });
        }

        // 新世代号让所有进行中的查询停止播放
        self.generations.issue();
        while let Some(joined) = lookups.join_next().await {
            log_join_failure(joined);
        }

        tracing::info!("LookupLoop stopped");
    }
}

/// 查询任务 panic 时记录日志，返回是否失败
fn log_join_failure(joined: Result<(), JoinError>) -> bool {
    match joined {
        Ok(()) => false,
        Err(e) => {
            tracing::warn!(error = %e, "Lookup task ended abnormally");
            true
        }
    }
}
