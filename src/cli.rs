//! 命令行参数
//!
//! 命令行参数优先级最高，在配置加载之后覆盖到 AppConfig 上。

use clap::Parser;
use std::path::PathBuf;

use crate::config::AppConfig;

/// Look up and play word pronunciations from Forvo.
///
/// FORVO_API_KEY must be set in your environment (or provider.api_key in prono.toml).
#[derive(Debug, Parser)]
#[command(name = "prono")]
#[command(about = "Download and play word pronunciations from Forvo")]
#[command(version)]
pub struct Cli {
    /// Look up and say this word
    #[arg(short = 'w', long, required_unless_present = "watch")]
    pub word: Option<String>,

    /// 2-letter language code
    #[arg(short = 'l', long)]
    pub lang: Option<String>,

    /// Redownload results even if already in cache
    #[arg(long)]
    pub refresh: bool,

    /// Max number of pronunciations to play
    #[arg(short = 'n', long, value_parser = clap::value_parser!(i32).range(1..))]
    pub num: Option<i32>,

    /// Randomize the order of the first N results
    #[arg(long = "shuffle-top")]
    pub shuffle_top: Option<usize>,

    /// Speech synthesis voice used when there are no recordings
    #[arg(long)]
    pub voice: Option<String>,

    /// Talk to the provider over plain http
    #[arg(long)]
    pub insecure: bool,

    /// Keep watching the clipboard and look up whatever is copied
    #[arg(long)]
    pub watch: bool,

    /// Use this configuration file instead of prono.toml
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log how long provider requests take
    #[arg(long)]
    pub bench: bool,
}

impl Cli {
    /// 覆盖配置中对应的字段
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(lang) = &self.lang {
            config.lookup.lang = lang.clone();
        }
        if self.refresh {
            config.lookup.force_refresh = true;
        }
        if let Some(num) = self.num {
            config.lookup.max_to_play = num;
        }
        if let Some(n) = self.shuffle_top {
            config.lookup.shuffle_top_n = n;
        }
        if let Some(voice) = &self.voice {
            config.lookup.fallback_voice = Some(voice.clone());
        }
        if self.insecure {
            config.provider.insecure = true;
        }
        if self.bench {
            config.lookup.log_timing = true;
        }
        if self.verbose {
            config.log.level = "debug".to_string();
        }
    }
}
