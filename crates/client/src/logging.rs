//! Tracing setup: stderr always, plus a log file when `LOG_DIR` is set.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "dungeon.log";

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the default `info` level. Keep the returned guard
/// alive for the whole program so buffered file output gets flushed.
pub fn init() -> Result<Option<WorkerGuard>> {
    let filter = || EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let Some(dir) = env::var_os("LOG_DIR").map(PathBuf::from) else {
        tracing_subscriber::registry()
            .with(filter())
            .with(stderr_layer)
            .init();
        return Ok(None);
    };

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(filter())
        .with(stderr_layer)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}", dir.join(LOG_FILE).display());
    Ok(Some(guard))
}
