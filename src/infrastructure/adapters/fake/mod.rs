//! Fake Adapters - 用于测试的端口实现
//!
//! 不访问网络，不调用外部进程

mod fake_downloader;
mod fake_player;
mod fake_provider;

pub use fake_downloader::FakeDownloader;
pub use fake_player::{FakePlayer, FakeSpeech};
pub use fake_provider::FakeProvider;
