//! Synthetic access-log writer used to drive the monitor by hand.
//!
//! Either appends random CLF lines or replays an existing log, at a fixed number of
//! lines per second.

mod line;

#[cfg(test)]
mod tests;

pub use line::{HTTP_METHODS, LineGenerator, STATUSES, URLS, USERNAMES};

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio_util::sync::CancellationToken;

pub const DEFAULT_LINES_PER_SECOND: u32 = 1;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub dest: PathBuf,
    /// Replay this file instead of generating random lines.
    pub source: Option<PathBuf>,
    pub lines_per_second: u32,
}

/// Append lines to `config.dest` until cancelled, or until the replayed source is
/// exhausted. Returns the number of lines written.
pub async fn generate(config: GeneratorConfig, token: CancellationToken) -> Result<u64> {
    if config.lines_per_second == 0 {
        bail!("lines per second must be greater than zero");
    }

    let mut dest = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.dest)
        .await
        .with_context(|| format!("failed to open destination {}", config.dest.display()))?;

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(
        1.0 / f64::from(config.lines_per_second),
    ));

    tracing::info!(
        dest = %config.dest.display(),
        source = ?config.source,
        lps = config.lines_per_second,
        "generator started"
    );

    let mut replay = match &config.source {
        Some(path) => {
            let file = File::open(path)
                .await
                .with_context(|| format!("failed to open source {}", path.display()))?;
            Some(BufReader::new(file).lines())
        }
        None => None,
    };
    let mut random = LineGenerator::new();

    let mut written = 0u64;
    loop {
        tokio::select! {
            biased;

            _ = token.cancelled() => break,

            _ = ticker.tick() => {}
        }

        let line = match replay.as_mut() {
            Some(lines) => match lines.next_line().await.context("failed to read source")? {
                Some(line) => line,
                None => break,
            },
            None => random.next_line(),
        };

        dest.write_all(line.as_bytes()).await?;
        dest.write_all(b"\n").await?;
        dest.flush().await?;
        written += 1;
    }

    tracing::info!(written, "generator stopped");
    Ok(written)
}
