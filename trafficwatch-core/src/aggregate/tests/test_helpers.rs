use crate::conf::MonitorConfig;
use crate::event::LogEvent;
use std::time::Duration;

pub fn config(frame_secs: u64, scene_secs: u64, threshold: u64) -> MonitorConfig {
    MonitorConfig {
        files: Vec::new(),
        alert_threshold: threshold,
        frame_interval: Duration::from_secs(frame_secs),
        scene_interval: Duration::from_secs(scene_secs),
        ..MonitorConfig::default()
    }
}

pub fn event(host: &str, section: &str, size: u64) -> LogEvent {
    LogEvent {
        remote_host: host.to_string(),
        identity: "-".to_string(),
        auth_user: "simon".to_string(),
        timestamp: None,
        request: format!("GET {section}/index.html HTTP/1.1"),
        status: Some(200),
        size,
        section: section.to_string(),
    }
}

#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
