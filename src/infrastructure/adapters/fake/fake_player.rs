//! Fake Player / Speech - 记录播放调用，不发出声音

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{AudioPlayerPort, PlaybackError, SpeechSynthPort};

type PlayHook = Box<dyn Fn(&Path) + Send + Sync>;

/// 记录型播放器
#[derive(Default)]
pub struct FakePlayer {
    played: Mutex<Vec<PathBuf>>,
    failing: Mutex<Vec<PathBuf>>,
    on_play: Option<PlayHook>,
}

impl FakePlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 播放该路径时返回错误
    pub fn failing_on(self, path: impl Into<PathBuf>) -> Self {
        if let Ok(mut failing) = self.failing.lock() {
            failing.push(path.into());
        }
        self
    }

    /// 每次播放时调用的钩子
    pub fn with_hook(mut self, hook: impl Fn(&Path) + Send + Sync + 'static) -> Self {
        self.on_play = Some(Box::new(hook));
        self
    }

    pub fn played(&self) -> Vec<PathBuf> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AudioPlayerPort for FakePlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        if let Some(hook) = &self.on_play {
            hook(path);
        }

        let should_fail = self
            .failing
            .lock()
            .map(|f| f.iter().any(|p| p == path))
            .unwrap_or(false);
        if should_fail {
            return Err(PlaybackError::ExitStatus {
                program: "fake".to_string(),
                code: Some(1),
            });
        }

        if let Ok(mut played) = self.played.lock() {
            played.push(path.to_path_buf());
        }
        Ok(())
    }
}

/// 记录型语音合成
#[derive(Default)]
pub struct FakeSpeech {
    spoken: Mutex<Vec<(String, String)>>,
}

impl FakeSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// (text, voice) 列表
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthPort for FakeSpeech {
    async fn speak(&self, text: &str, voice: &str) -> Result<(), PlaybackError> {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push((text.to_string(), voice.to_string()));
        }
        Ok(())
    }
}
