use crate::aggregate::{AggregatedStats, AlertEvent, StatsHandle};
use crate::dashboard::{AlertLog, redraw, render_stats};
use crate::logging::DisplayMode;
use chrono::Local;
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";

/// One line of `--json` output.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Record<'a> {
    Stats(&'a AggregatedStats),
    Alert(&'a AlertEvent),
}

/// Presentation loop writing to `out`. Runs until `token` is cancelled.
///
/// Every `refresh` tick it drains pending alerts into the history, then either
/// redraws the latest snapshot (pretty) or prints every frame closed since the last
/// tick (JSON). The frame subscription is taken when this is called, not when the
/// returned future is first polled, so no frame published after the call is missed.
pub fn run_dashboard<W>(
    stats: StatsHandle,
    alerts: UnboundedReceiver<AlertEvent>,
    mode: DisplayMode,
    refresh: Duration,
    top_n: usize,
    token: CancellationToken,
    out: W,
) -> impl Future<Output = ()> + Send + 'static
where
    W: Write + Send + 'static,
{
    let frames = (mode == DisplayMode::Json).then(|| stats.subscribe());

    let mut dashboard = Dashboard {
        stats,
        alerts,
        frames,
        mode,
        top_n,
        history: AlertLog::new(),
        out,
    };

    async move {
        let mut ticker = tokio::time::interval(refresh);

        if mode == DisplayMode::Pretty {
            dashboard.write_raw(HIDE_CURSOR);
        }

        loop {
            tokio::select! {
                biased;

                _ = token.cancelled() => break,

                _ = ticker.tick() => dashboard.refresh(),
            }
        }

        // Whatever closed since the last tick.
        if mode == DisplayMode::Json {
            dashboard.refresh();
        }
        if mode == DisplayMode::Pretty {
            dashboard.write_raw(SHOW_CURSOR);
        }

        tracing::debug!(alerts = dashboard.history.len(), "dashboard stopped");
    }
}

struct Dashboard<W> {
    stats: StatsHandle,
    alerts: UnboundedReceiver<AlertEvent>,
    frames: Option<broadcast::Receiver<Arc<AggregatedStats>>>,
    mode: DisplayMode,
    top_n: usize,
    history: AlertLog,
    out: W,
}

impl<W: Write> Dashboard<W> {
    fn refresh(&mut self) {
        while let Ok(alert) = self.alerts.try_recv() {
            if self.mode == DisplayMode::Json {
                self.emit(&Record::Alert(&alert));
            }
            self.history.push(&alert);
        }

        match self.mode {
            DisplayMode::Pretty => {
                let snapshot = self.stats.load();
                let text = render_stats(&snapshot, &self.history, self.top_n, Local::now());
                redraw(&mut self.out, &text);
            }
            DisplayMode::Json => self.emit_closed_frames(),
            DisplayMode::Quiet => {}
        }
    }

    fn emit_closed_frames(&mut self) {
        loop {
            let Some(frames) = self.frames.as_mut() else {
                return;
            };
            match frames.try_recv() {
                Ok(snapshot) => self.emit(&Record::Stats(&snapshot)),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "dashboard fell behind; frames not printed");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return,
            }
        }
    }

    fn emit(&mut self, record: &Record<'_>) {
        match serde_json::to_string(record) {
            Ok(line) => {
                let _ = writeln!(self.out, "{line}");
                let _ = self.out.flush();
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize dashboard record"),
        }
    }

    fn write_raw(&mut self, text: &str) {
        let _ = write!(self.out, "{text}");
        let _ = self.out.flush();
    }
}
