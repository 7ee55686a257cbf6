//! Pipeline wiring: one producer per log file, the aggregator and the dashboard,
//! all sharing one cancellation token.

mod error;

#[cfg(test)]
mod tests;

pub use error::MonitorError;

use crate::aggregate::{AggregatedStats, AlertEvent, Aggregator, StatsHandle, run_aggregator};
use crate::conf::{ConfigError, MonitorConfig};
use crate::dashboard::run_dashboard;
use crate::event::LogEvent;
use crate::logging::DisplayMode;
use crate::source::{FileFollower, SourceError, watch_file};
use std::io;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Channel ends handed out by [`Monitor::with_channels`] in place of files and a
/// dashboard.
#[derive(Debug)]
pub struct MonitorChannels {
    pub events: UnboundedSender<LogEvent>,
    pub alerts: UnboundedReceiver<AlertEvent>,
}

/// A running pipeline.
#[derive(Debug)]
pub struct Monitor {
    stats: StatsHandle,
    token: CancellationToken,
    producers: Vec<JoinHandle<Result<(), SourceError>>>,
    aggregator: JoinHandle<()>,
    dashboard: Option<JoinHandle<()>>,
}

impl Monitor {
    /// Validate `config`, open every log file and spawn the pipeline.
    ///
    /// Any file that cannot be opened aborts startup before a task is spawned.
    pub async fn start(config: MonitorConfig, mode: DisplayMode) -> Result<Self, MonitorError> {
        config.validate()?;
        if config.files.is_empty() {
            return Err(ConfigError::NoSources.into());
        }

        let mut followers = Vec::with_capacity(config.files.len());
        for path in &config.files {
            match FileFollower::open(path, config.read_timeout).await {
                Ok(follower) => followers.push(follower),
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to open log file");
                    return Err(e.into());
                }
            }
        }

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let producers = followers
            .into_iter()
            .map(|follower| tokio::spawn(watch_file(follower, event_tx.clone(), token.clone())))
            .collect();
        // Producers hold the only senders; the channel closes when they all exit.
        drop(event_tx);

        let (stats, aggregator) = spawn_aggregator(&config, event_rx, alert_tx, &token);

        let dashboard = tokio::spawn(run_dashboard(
            stats.clone(),
            alert_rx,
            mode,
            config.refresh_interval,
            config.top_sections,
            token.clone(),
            io::stdout(),
        ));

        tracing::info!(
            files = config.files.len(),
            threshold = config.alert_threshold,
            frame_interval = ?config.frame_interval,
            scene_interval = ?config.scene_interval,
            "monitor started"
        );

        Ok(Self {
            stats,
            token,
            producers,
            aggregator,
            dashboard: Some(dashboard),
        })
    }

    /// Run only the aggregator, fed and drained by the caller.
    ///
    /// `config.files` is ignored. Must be called from within a Tokio runtime.
    pub fn with_channels(config: &MonitorConfig) -> Result<(Self, MonitorChannels), MonitorError> {
        config.validate()?;

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (alert_tx, alert_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();

        let (stats, aggregator) = spawn_aggregator(config, event_rx, alert_tx, &token);

        let monitor = Self {
            stats,
            token,
            producers: Vec::new(),
            aggregator,
            dashboard: None,
        };
        let channels = MonitorChannels {
            events: event_tx,
            alerts: alert_rx,
        };

        Ok((monitor, channels))
    }

    /// Latest published snapshot source.
    pub fn stats(&self) -> StatsHandle {
        self.stats.clone()
    }

    pub fn shutdown_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Wait for every task to finish and report the first failure.
    ///
    /// Tasks only finish once the token is cancelled, apart from producers hitting a
    /// read error.
    pub async fn wait(self) -> Result<(), MonitorError> {
        let mut first_error: Option<MonitorError> = None;

        for producer in self.producers {
            let outcome = match producer.await {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => MonitorError::from(e),
                Err(e) => MonitorError::Join {
                    task: "producer",
                    source: e,
                },
            };
            first_error.get_or_insert(outcome);
        }

        if let Err(e) = self.aggregator.await {
            first_error.get_or_insert(MonitorError::Join {
                task: "aggregator",
                source: e,
            });
        }

        if let Some(dashboard) = self.dashboard
            && let Err(e) = dashboard.await
        {
            first_error.get_or_insert(MonitorError::Join {
                task: "dashboard",
                source: e,
            });
        }

        tracing::info!(failed = first_error.is_some(), "monitor stopped");

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Cancel every task and wait for them.
    pub async fn shutdown(self) -> Result<(), MonitorError> {
        self.token.cancel();
        self.wait().await
    }
}

fn spawn_aggregator(
    config: &MonitorConfig,
    events: UnboundedReceiver<LogEvent>,
    alerts: UnboundedSender<AlertEvent>,
    token: &CancellationToken,
) -> (StatsHandle, JoinHandle<()>) {
    let aggregator = Aggregator::new(config, Instant::now());
    let stats = StatsHandle::new(AggregatedStats::empty(aggregator.start_time()));

    let handle = tokio::spawn(run_aggregator(
        aggregator,
        events,
        alerts,
        stats.clone(),
        config.recv_timeout,
        token.clone(),
    ));

    (stats, handle)
}
