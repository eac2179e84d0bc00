//! Lookup Commands - 发音查询命令与结果

use std::path::PathBuf;

use crate::domain::lookup::LookupKey;
use crate::domain::GenerationGuard;

/// 查询并播放命令
#[derive(Debug, Clone)]
pub struct LookupCommand {
    pub key: LookupKey,
    /// 本次查询的世代号；不再 live 时停止播放
    pub guard: GenerationGuard,
}

impl LookupCommand {
    /// 单次查询（世代号永远 live）
    pub fn standalone(key: LookupKey) -> Self {
        Self {
            key,
            guard: GenerationGuard::standalone(),
        }
    }
}

/// 查询的最终状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// 正常跑完
    Completed,
    /// 被更新的查询取代，剩余播放已放弃
    Superseded,
}

/// 单条失败记录
#[derive(Debug, Clone)]
pub struct ItemFailure {
    /// 录音序号（后备语音合成失败时为 None）
    pub index: Option<u32>,
    pub message: String,
}

/// 查询报告
#[derive(Debug, Clone)]
pub struct LookupReport {
    pub key: LookupKey,
    pub generation: u64,
    pub outcome: LookupOutcome,
    /// 提供方返回的录音总数
    pub total_items: usize,
    /// 选中要播放的录音数
    pub selected: usize,
    /// 已成功播放的音频路径（按播放顺序）
    pub played: Vec<PathBuf>,
    pub cache_failures: Vec<ItemFailure>,
    pub playback_errors: Vec<ItemFailure>,
    /// 是否使用了后备语音合成
    pub used_fallback: bool,
}

impl LookupReport {
    pub fn new(key: LookupKey, generation: u64, total_items: usize) -> Self {
        Self {
            key,
            generation,
            outcome: LookupOutcome::Completed,
            total_items,
            selected: 0,
            played: Vec::new(),
            cache_failures: Vec::new(),
            playback_errors: Vec::new(),
            used_fallback: false,
        }
    }

    pub fn is_superseded(&self) -> bool {
        self.outcome == LookupOutcome::Superseded
    }

    /// 没有录音也没有后备语音
    pub fn no_results(&self) -> bool {
        self.total_items == 0 && !self.used_fallback
    }
}
