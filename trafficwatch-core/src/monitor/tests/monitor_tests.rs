use crate::conf::{ConfigError, MonitorConfig};
use crate::logging::DisplayMode;
use crate::monitor::{Monitor, MonitorError};
use crate::source::SourceError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::tempdir;
use tokio::time::{sleep, timeout};

const LINE: &str = r#"10.0.0.7 - jane [05/Nov/2019:01:44:46 +0100] "GET /blog/post/1 HTTP/1.1" 200 512 "-" "curl/8.0""#;

fn fast_config(files: Vec<PathBuf>) -> MonitorConfig {
    MonitorConfig {
        files,
        alert_threshold: 10,
        frame_interval: Duration::from_millis(50),
        scene_interval: Duration::from_millis(200),
        recv_timeout: Duration::from_millis(50),
        read_timeout: Duration::from_millis(50),
        refresh_interval: Duration::from_millis(50),
        top_sections: 5,
    }
}

fn append(path: &Path, lines: usize) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    for _ in 0..lines {
        writeln!(file, "{LINE}").unwrap();
    }
    file.flush().unwrap();
}

#[tokio::test]
async fn start_rejects_empty_file_list() {
    let result = Monitor::start(fast_config(Vec::new()), DisplayMode::Quiet).await;

    assert!(matches!(
        result,
        Err(MonitorError::Config(ConfigError::NoSources))
    ));
}

#[tokio::test]
async fn start_rejects_invalid_intervals() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("access.log");
    fs::write(&path, "").unwrap();
    let mut cfg = fast_config(vec![path]);
    cfg.scene_interval = Duration::from_millis(120);

    let result = Monitor::start(cfg, DisplayMode::Quiet).await;

    assert!(matches!(
        result,
        Err(MonitorError::Config(ConfigError::SceneNotMultipleOfFrame { .. }))
    ));
}

#[tokio::test]
async fn missing_file_is_fatal_at_startup() {
    // Arrange
    let dir = tempdir().unwrap();
    let present = dir.path().join("present.log");
    fs::write(&present, "").unwrap();
    let missing = dir.path().join("missing.log");

    // Act
    let result = Monitor::start(fast_config(vec![present, missing.clone()]), DisplayMode::Quiet).await;

    // Assert
    match result {
        Err(MonitorError::Source(SourceError::Open { path, .. })) => assert_eq!(path, missing),
        other => panic!("expected open error, got {other:?}"),
    }
}

#[tokio::test]
async fn lines_from_every_file_reach_the_snapshot() {
    // Arrange
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");
    fs::write(&first, format!("{LINE}\n")).unwrap();
    fs::write(&second, "").unwrap();
    let monitor = Monitor::start(
        fast_config(vec![first.clone(), second.clone()]),
        DisplayMode::Quiet,
    )
    .await
    .unwrap();
    let stats = monitor.stats();

    // Act
    append(&first, 3);
    append(&second, 2);

    // Assert: pre-existing content is skipped.
    timeout(Duration::from_secs(3), async {
        while stats.load().lifetime_hits < 5 {
            sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .expect("events aggregated in time");

    sleep(Duration::from_millis(150)).await;
    let snapshot = stats.load();
    assert_eq!(snapshot.lifetime_hits, 5);
    assert_eq!(snapshot.total_sections.get("/blog"), Some(5));
    assert_eq!(snapshot.total_host_bytes.get("10.0.0.7"), Some(5 * 512));

    timeout(Duration::from_secs(2), monitor.shutdown())
        .await
        .expect("monitor stops promptly")
        .unwrap();
}

#[tokio::test]
async fn with_channels_delivers_alerts() {
    // Arrange
    let (monitor, mut channels) = Monitor::with_channels(&fast_config(Vec::new())).unwrap();
    sleep(Duration::from_millis(250)).await;

    // Act
    for _ in 0..200 {
        let event = crate::event::LogEvent::from_line(LINE).unwrap();
        channels.events.send(event).unwrap();
    }

    // Assert
    let raised = timeout(Duration::from_secs(2), channels.alerts.recv())
        .await
        .expect("alert in time")
        .expect("alert channel open");
    assert!(raised.on);
    assert!(raised.message.starts_with("High traffic generated an alert - hits = "));
    assert!(monitor.stats().load().alert.on);

    monitor.shutdown_token().cancel();
    monitor.wait().await.unwrap();
}
