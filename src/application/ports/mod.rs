//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_download;
mod cache_store;
mod input_source;
mod play_counts;
mod playback;
mod pronunciation_provider;

pub use audio_download::{AudioDownloadPort, AudioFetchError};
pub use cache_store::{CacheError, CacheStorePort};
pub use input_source::{InputError, InputSourcePort};
pub use play_counts::PlayCountPort;
pub use playback::{AudioPlayerPort, PlaybackError, SpeechSynthPort};
pub use pronunciation_provider::{FetchError, PronunciationProviderPort};
