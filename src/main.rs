//! Prono - 单词发音查询与播放
//!
//! 单次模式：查询 --word 并播放
//! 监听模式（--watch）：持续读取剪贴板，每个新内容触发一次查询

use std::sync::Arc;

use anyhow::{bail, Context};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use prono::application::commands::handlers::{LookupHandler, LookupPorts};
use prono::application::{LookupCommand, LookupReport};
use prono::cli::Cli;
use prono::config::{load_config_from_path, print_config, require_api_key, validate_config, AppConfig};
use prono::domain::lookup::LookupKey;
use prono::infrastructure::adapters::{
    CommandClipboard, CommandPlayer, CommandSpeech, HttpForvoClient,
};
use prono::infrastructure::memory::InMemoryPlayCounts;
use prono::infrastructure::persistence::FileCacheStore;
use prono::infrastructure::worker::{LookupLoop, LookupLoopConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：命令行 > 环境变量 > 配置文件 > 默认值）
    let mut config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    cli.apply_to(&mut config);
    validate_config(&config)?;

    init_tracing(&config);
    print_config(&config);

    if config.lookup.lang.trim().is_empty() {
        bail!("must pass --lang (or set lookup.lang)");
    }
    require_api_key(&config)?;

    let handler = build_handler(&config)?.arc();

    if cli.watch {
        return watch(&config, handler).await;
    }

    let word = cli.word.as_deref().unwrap_or_default();
    let key = LookupKey::new(word, &config.lookup.lang)?;
    let report = handler
        .handle(LookupCommand::standalone(key))
        .await
        .context("lookup failed")?;
    print_report(&report);

    Ok(())
}

/// 初始化日志
fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},prono={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 组装查询处理器及其适配器
fn build_handler(config: &AppConfig) -> anyhow::Result<LookupHandler> {
    let client = Arc::new(HttpForvoClient::new(config.provider.client_config())?);
    let cache = Arc::new(FileCacheStore::new(&config.cache.dir));

    tracing::debug!(cache_dir = %cache.root().display(), "Using cache directory");

    Ok(LookupHandler::new(
        config.lookup.handler_config(),
        LookupPorts {
            cache,
            provider: client.clone(),
            downloader: client,
            play_counts: InMemoryPlayCounts::new().arc(),
            player: Arc::new(CommandPlayer::new(config.player.command())),
            speech: Arc::new(CommandSpeech::new(config.speech.command())),
        },
    ))
}

/// 监听剪贴板直到 Ctrl-C
async fn watch(config: &AppConfig, handler: Arc<LookupHandler>) -> anyhow::Result<()> {
    let input = Arc::new(CommandClipboard::new(config.clipboard.command()));
    let lookup_loop = LookupLoop::new(
        LookupLoopConfig {
            lang: config.lookup.lang.clone(),
            poll_interval: config.clipboard.poll_interval(),
        },
        input,
        handler,
    );

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
        tracing::info!("Received shutdown signal");
        shutdown.cancel();
    });

    lookup_loop.run(cancel).await;
    Ok(())
}

fn print_report(report: &LookupReport) {
    if report.no_results() {
        println!("No pronunciations found for {}", report.key);
        return;
    }
    if report.used_fallback {
        println!("No pronunciations found for {}, used speech synthesis", report.key);
    } else {
        println!(
            "{}: {} result(s), played {} of {} selected",
            report.key,
            report.total_items,
            report.played.len(),
            report.selected
        );
    }
    for failure in &report.cache_failures {
        eprintln!("error downloading mp3: {}", failure.message);
    }
    for failure in &report.playback_errors {
        eprintln!("error playing audio: {}", failure.message);
    }
}
