//! Process Adapters - 外部进程（播放器、语音合成、剪贴板）

mod command_clipboard;
mod command_player;
mod command_speech;

pub use command_clipboard::CommandClipboard;
pub use command_player::{CommandPlayer, CommandSpec};
pub use command_speech::CommandSpeech;
