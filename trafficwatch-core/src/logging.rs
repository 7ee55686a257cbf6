use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// How the dashboard presents statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Redraw a text dashboard in place.
    Pretty,
    /// One JSON snapshot per closed frame on stdout.
    Json,
    /// Nothing on stdout; alerts only reach the log.
    Quiet,
}

pub fn default_display_mode() -> DisplayMode {
    if io::stdout().is_terminal() {
        DisplayMode::Pretty
    } else {
        DisplayMode::Json
    }
}

/// Initialize the logging system with JSON formatting and environment-based filtering.
///
/// - `RUST_LOG` wins when set; otherwise `info`, or `warn` when the pretty dashboard
///   shares the terminal with stderr
/// - with `log_file`, events go to that file through a non-blocking writer and the
///   returned guard must be kept alive until exit
/// - without it, events go to stderr so stdout stays free for the dashboard
pub fn init_logging(mode: DisplayMode, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let default_level = match (mode, log_file) {
        (DisplayMode::Pretty, None) => "warn",
        _ => "info",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let Some(path) = log_file else {
        fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path has no file name: {}", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}
