//! Playback Ports - 音频播放与语音合成
//!
//! 外部播放器/合成器均视为阻塞调用：返回时声音已播完

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// 播放错误
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Failed to launch {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("{program} exited with status {code:?}")]
    ExitStatus { program: String, code: Option<i32> },

    #[error("Audio file missing: {0}")]
    MissingFile(String),
}

/// Audio Player Port
#[async_trait]
pub trait AudioPlayerPort: Send + Sync {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError>;
}

/// Speech Synth Port - 没有录音时的后备语音合成
#[async_trait]
pub trait SpeechSynthPort: Send + Sync {
    async fn speak(&self, text: &str, voice: &str) -> Result<(), PlaybackError>;
}
