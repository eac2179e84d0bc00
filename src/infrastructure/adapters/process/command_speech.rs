//! Command Speech - 外部语音合成（没有录音时的后备）
//!
//! 调用形式: `<program> <args...> -v <voice> <text>`，
//! macOS 的 `say` 与 `espeak` 都接受这种形式

use async_trait::async_trait;
use std::process::Stdio;

use super::command_player::CommandSpec;
use crate::application::ports::{PlaybackError, SpeechSynthPort};

pub struct CommandSpeech {
    spec: CommandSpec,
}

impl CommandSpeech {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl SpeechSynthPort for CommandSpeech {
    async fn speak(&self, text: &str, voice: &str) -> Result<(), PlaybackError> {
        tracing::debug!(program = %self.spec.program, voice = %voice, "Speaking with fallback synthesizer");

        let status = self
            .spec
            .command()
            .arg("-v")
            .arg(voice)
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spec.launch_error(e))?;

        self.spec.check_status(status)
    }
}
