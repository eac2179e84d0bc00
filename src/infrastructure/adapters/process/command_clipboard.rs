//! Command Clipboard - 通过外部命令读取剪贴板
//!
//! 默认: macOS 使用 `pbpaste`，其他平台使用 `xclip -selection clipboard -o`

use async_trait::async_trait;
use std::process::Stdio;

use super::command_player::CommandSpec;
use crate::application::ports::{InputError, InputSourcePort};

pub struct CommandClipboard {
    spec: CommandSpec,
}

impl CommandClipboard {
    pub fn new(spec: CommandSpec) -> Self {
        Self { spec }
    }
}

#[async_trait]
impl InputSourcePort for CommandClipboard {
    async fn read(&self) -> Result<String, InputError> {
        let output = self
            .spec
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| InputError::ReadFailed(format!("{}: {}", self.spec.program, e)))?;

        // xclip 在剪贴板为空时以非零状态退出
        if !output.status.success() && output.stdout.is_empty() {
            return Ok(String::new());
        }

        if !output.status.success() {
            return Err(InputError::ReadFailed(format!(
                "{} exited with status {:?}",
                self.spec.program,
                output.status.code()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
