//! Command Player - 调用外部播放器播放音频文件
//!
//! 默认: `mplayer -really-quiet <path>`

use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::application::ports::{AudioPlayerPort, PlaybackError};

/// 外部命令描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// 构造 tokio Command（不附加调用方参数）
    pub(super) fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).stdin(Stdio::null());
        cmd
    }

    pub(super) fn launch_error(&self, e: std::io::Error) -> PlaybackError {
        PlaybackError::LaunchFailed {
            program: self.program.clone(),
            reason: e.to_string(),
        }
    }

    pub(super) fn check_status(&self, status: std::process::ExitStatus) -> Result<(), PlaybackError> {
        if status.success() {
            Ok(())
        } else {
            Err(PlaybackError::ExitStatus {
                program: self.program.clone(),
                code: status.code(),
            })
        }
    }
}

/// 外部命令播放器
pub struct CommandPlayer {
    spec: CommandSpec,
}

impl CommandPlayer {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl AudioPlayerPort for CommandPlayer {
    async fn play(&self, path: &Path) -> Result<(), PlaybackError> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(PlaybackError::MissingFile(path.display().to_string()));
        }

        tracing::debug!(program = %self.spec.program, path = %path.display(), "Playing audio");

        let status = self
            .spec
            .command()
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spec.launch_error(e))?;

        self.spec.check_status(status)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_play_success() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"x").unwrap();

        let player = CommandPlayer::new(CommandSpec::new("true", &[]));
        assert!(player.play(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_play_non_zero_exit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"x").unwrap();

        let player = CommandPlayer::new(CommandSpec::new("false", &[]));
        assert!(matches!(
            player.play(&path).await,
            Err(PlaybackError::ExitStatus { code: Some(1), .. })
        ));
    }

    #[tokio::test]
    async fn test_play_missing_program() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.mp3");
        std::fs::write(&path, b"x").unwrap();

        let player = CommandPlayer::new(CommandSpec::new("prono-no-such-player", &[]));
        assert!(matches!(
            player.play(&path).await,
            Err(PlaybackError::LaunchFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_play_missing_file() {
        let player = CommandPlayer::new(CommandSpec::new("true", &[]));
        assert!(matches!(
            player.play(Path::new("/nonexistent/prono/a.mp3")).await,
            Err(PlaybackError::MissingFile(_))
        ));
    }
}
