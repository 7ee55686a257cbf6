use crate::aggregate::{AggregatedStats, AlertEvent, StatsHandle};
use crate::dashboard::tests::SharedBuf;
use crate::dashboard::{HIDE_CURSOR, SHOW_CURSOR, run_dashboard};
use crate::logging::DisplayMode;
use chrono::Local;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

struct Harness {
    stats: StatsHandle,
    alerts: mpsc::UnboundedSender<AlertEvent>,
    out: SharedBuf,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl Harness {
    async fn stop(self) -> String {
        self.token.cancel();
        timeout(Duration::from_millis(500), self.task)
            .await
            .expect("dashboard stops promptly")
            .unwrap();
        self.out.contents()
    }
}

fn spawn(mode: DisplayMode, refresh: Duration) -> Harness {
    let stats = StatsHandle::new(AggregatedStats::empty(Local::now()));
    let (alert_tx, alert_rx) = mpsc::unbounded_channel();
    let out = SharedBuf::default();
    let token = CancellationToken::new();

    let task = tokio::spawn(run_dashboard(
        stats.clone(),
        alert_rx,
        mode,
        refresh,
        5,
        token.clone(),
        out.clone(),
    ));

    Harness {
        stats,
        alerts: alert_tx,
        out,
        token,
        task,
    }
}

fn frame(n: u64) -> AggregatedStats {
    let mut stats = AggregatedStats::empty(Local::now());
    stats.frames_closed = n;
    stats.lifetime_hits = n * 10;
    stats
}

fn alert(on: bool, message: &str) -> AlertEvent {
    AlertEvent {
        on,
        message: message.to_string(),
        lps_scene: 12.5,
        lps_lifetime: 1.0,
        at: Local::now(),
    }
}

fn json_lines(out: &str) -> Vec<Value> {
    out.lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("{e}: {line}")))
        .collect()
}

#[tokio::test]
async fn json_mode_prints_every_frame_closed_between_ticks() {
    // Arrange
    let h = spawn(DisplayMode::Json, Duration::from_millis(300));

    // Act: six frames, several per refresh tick.
    for n in 1..=6 {
        h.stats.publish(frame(n));
        sleep(Duration::from_millis(100)).await;
    }
    sleep(Duration::from_millis(350)).await;
    let out = h.stop().await;

    // Assert
    let frames: Vec<u64> = json_lines(&out)
        .iter()
        .filter(|v| v["kind"] == "stats")
        .map(|v| v["frames_closed"].as_u64().unwrap())
        .collect();
    assert_eq!(frames, vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test]
async fn json_mode_flushes_frames_on_cancellation() {
    let h = spawn(DisplayMode::Json, Duration::from_secs(60));
    sleep(Duration::from_millis(20)).await;

    h.stats.publish(frame(1));
    h.stats.publish(frame(2));
    let out = h.stop().await;

    let lines = json_lines(&out);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["lifetime_hits"], 20);
}

#[tokio::test]
async fn json_mode_emits_alert_records() {
    // Arrange
    let h = spawn(DisplayMode::Json, Duration::from_millis(50));

    // Act
    h.alerts.send(alert(true, "raised")).unwrap();
    h.alerts.send(alert(false, "cleared")).unwrap();
    sleep(Duration::from_millis(120)).await;
    let out = h.stop().await;

    // Assert
    let alerts: Vec<(bool, String)> = json_lines(&out)
        .iter()
        .filter(|v| v["kind"] == "alert")
        .map(|v| (v["on"].as_bool().unwrap(), v["message"].as_str().unwrap().to_string()))
        .collect();
    assert_eq!(
        alerts,
        vec![(true, "raised".to_string()), (false, "cleared".to_string())]
    );
}

#[tokio::test]
async fn pretty_mode_redraws_with_alert_history() {
    // Arrange
    let h = spawn(DisplayMode::Pretty, Duration::from_millis(50));

    // Act
    h.stats.publish(frame(3));
    h.alerts
        .send(alert(true, "High traffic generated an alert - hits = 12.50/s"))
        .unwrap();
    sleep(Duration::from_millis(120)).await;
    let out = h.stop().await;

    // Assert
    assert!(out.starts_with(HIDE_CURSOR), "{out:?}");
    assert!(out.ends_with(SHOW_CURSOR), "{out:?}");
    assert!(out.contains("\x1b[2J\x1b[H"));
    assert!(out.contains("frames: 3"));
    let last_draw = out.rsplit("\x1b[2J\x1b[H").next().unwrap();
    assert!(last_draw.contains("  High traffic generated an alert - hits = 12.50/s"));
}

#[tokio::test]
async fn quiet_mode_writes_nothing() {
    let h = spawn(DisplayMode::Quiet, Duration::from_millis(20));

    h.stats.publish(frame(1));
    h.alerts.send(alert(true, "raised")).unwrap();
    sleep(Duration::from_millis(80)).await;

    assert_eq!(h.stop().await, "");
}
