//! 播放选择策略
//!
//! 从候选录音中挑选本次要播放的子集：
//! 1. 只保留播放次数最少的录音（本会话内轮流覆盖所有变体）
//! 2. 在前 N 个位置内随机打乱，避免每次都播同一条
//! 3. 截断到最大播放数

use rand::seq::SliceRandom;
use rand::Rng;

use super::lookup::PronunciationItem;

/// 默认随机窗口大小
pub const DEFAULT_SHUFFLE_TOP_N: usize = 3;

/// 选择参数
#[derive(Debug, Clone, Copy)]
pub struct SelectionConfig {
    /// 最多播放几条，<= 0 表示全部
    pub max_to_play: i32,
    /// 随机打乱的前缀窗口大小
    pub shuffle_top_n: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_to_play: 3,
            shuffle_top_n: DEFAULT_SHUFFLE_TOP_N,
        }
    }
}

/// 选择要播放的录音
///
/// `play_count` 返回某条录音（按其音频路径）在本会话中已播放的次数。
/// 窗口之外的录音保持提供方原有的相对顺序。
pub fn select<F, R>(
    items: &[PronunciationItem],
    play_count: F,
    config: SelectionConfig,
    rng: &mut R,
) -> Vec<PronunciationItem>
where
    F: Fn(&PronunciationItem) -> u32,
    R: Rng + ?Sized,
{
    if items.is_empty() {
        return Vec::new();
    }

    // 第一步：最少播放次数过滤
    let counts: Vec<u32> = items.iter().map(&play_count).collect();
    let min = counts.iter().copied().min().unwrap_or(0);
    let mut survivors: Vec<PronunciationItem> = items
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count == min)
        .map(|(item, _)| item.clone())
        .collect();

    // 第二步：前 N 个随机打乱
    let window = config.shuffle_top_n.min(survivors.len());
    survivors[..window].shuffle(rng);

    // 第三步：截断
    let cap = cap_for(config.max_to_play, survivors.len());
    survivors.truncate(cap);
    survivors
}

/// max_to_play 为非正数或超出范围时取全部
fn cap_for(max_to_play: i32, len: usize) -> usize {
    match usize::try_from(max_to_play) {
        Ok(0) | Err(_) => len,
        Ok(n) => n.min(len),
    }
}
