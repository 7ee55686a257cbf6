use crate::aggregate::aggregator::{Aggregator, FrameReport};
use crate::aggregate::alert::AlertEvent;
use crate::aggregate::snapshot::StatsHandle;
use crate::event::LogEvent;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

/// Aggregation loop. Runs until `token` is cancelled; that is its only exit.
///
/// Each wait for an event is bounded by `recv_timeout` and by the next frame
/// deadline, so frames close on time even when no traffic arrives.
pub async fn run_aggregator(
    mut agg: Aggregator,
    events: UnboundedReceiver<LogEvent>,
    alerts: UnboundedSender<AlertEvent>,
    stats: StatsHandle,
    recv_timeout: Duration,
    token: CancellationToken,
) {
    let mut events = Some(events);

    tracing::info!(start_time = %agg.start_time(), "aggregator started");

    loop {
        let wait = recv_timeout.min(
            agg.next_deadline().saturating_duration_since(Instant::now()),
        );

        tokio::select! {
            biased;

            _ = token.cancelled() => break,

            received = next_event(&mut events, wait) => {
                if let Some(event) = received {
                    agg.ingest(&event);
                }
            }
        }

        let now = Instant::now();
        while agg.is_due(now) {
            let FrameReport { stats: snapshot, alert } = agg.close_frame(now);
            stats.publish(snapshot);

            if let Some(alert) = alert {
                if alert.on {
                    tracing::warn!(
                        lps_scene = alert.lps_scene,
                        lps_lifetime = alert.lps_lifetime,
                        "{}",
                        alert.message
                    );
                } else {
                    tracing::info!(
                        lps_scene = alert.lps_scene,
                        lps_lifetime = alert.lps_lifetime,
                        "{}",
                        alert.message
                    );
                }

                // Nobody draining alerts is not fatal for aggregation.
                if alerts.send(alert).is_err() {
                    tracing::debug!("alert receiver dropped");
                }
            }
        }
    }

    tracing::info!(
        lifetime_hits = agg.lifetime_hits(),
        frames = agg.frames_closed(),
        "aggregator stopped"
    );
}

/// Wait up to `wait` for the next event.
///
/// Once every producer is gone the receiver is dropped and this degrades to a plain
/// sleep, keeping frame closes going at zero traffic.
async fn next_event(
    events: &mut Option<UnboundedReceiver<LogEvent>>,
    wait: Duration,
) -> Option<LogEvent> {
    let Some(rx) = events.as_mut() else {
        tokio::time::sleep(wait).await;
        return None;
    };

    let received = tokio::time::timeout(wait, rx.recv()).await;
    match received {
        Ok(Some(event)) => Some(event),
        Ok(None) => {
            tracing::debug!("all event producers have exited");
            *events = None;
            None
        }
        Err(_) => None,
    }
}
