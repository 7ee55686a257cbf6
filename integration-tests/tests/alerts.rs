use integration_tests::harness::{CapturedEvent, fast_config, init_test_tracing};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};
use trafficwatch_core::aggregate::AlertEvent;
use trafficwatch_core::event::LogEvent;
use trafficwatch_core::monitor::Monitor;
use tracing::Level;

const LINE: &str = r#"87.141.6.212 - simon [05/Nov/2019:01:44:46 +0100] "GET /item/august/13903079 HTTP/1.1" 200 8000 "-" "curl/8.0""#;

/// Time runs 50x faster than the classic 5s frame / 20s scene setup, so rates and the
/// threshold are 50x larger: 1/s → 50/s, 90/s → 4500/s, threshold 10 → 500.
const THRESHOLD: u64 = 500;
const QUIET_PER_FRAME: usize = 5;
const BURST_PER_FRAME: usize = 450;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn burst_raises_one_alert_and_recovery_clears_it() {
    // Arrange
    let captured = Arc::new(Mutex::new(Vec::<CapturedEvent>::new()));
    init_test_tracing(captured.clone());

    let cfg = fast_config(Vec::new(), THRESHOLD);
    let (monitor, mut channels) = Monitor::with_channels(&cfg).unwrap();
    let event = LogEvent::from_line(LINE).unwrap();

    // Act: 4 quiet frames, 4 burst frames, then 12 quiet frames.
    let mut ticker = interval(cfg.frame_interval);
    for frame in 0..20 {
        ticker.tick().await;
        let count = if (4..8).contains(&frame) {
            BURST_PER_FRAME
        } else {
            QUIET_PER_FRAME
        };
        for _ in 0..count {
            channels.events.send(event.clone()).unwrap();
        }
    }
    sleep_until(Instant::now() + cfg.frame_interval * 2).await;

    monitor.shutdown_token().cancel();
    let stats = monitor.stats();
    monitor.wait().await.unwrap();

    // Assert
    let mut transitions: Vec<AlertEvent> = Vec::new();
    while let Ok(alert) = channels.alerts.try_recv() {
        transitions.push(alert);
    }

    assert_eq!(transitions.len(), 2, "{transitions:#?}");

    let raised = &transitions[0];
    assert!(raised.on);
    assert!(raised.lps_scene > raised.lps_lifetime + THRESHOLD as f64);
    assert!(raised.message.starts_with("High traffic generated an alert - hits = "));

    let cleared = &transitions[1];
    assert!(!cleared.on);
    assert!(cleared.lps_scene <= cleared.lps_lifetime + THRESHOLD as f64);
    assert!(cleared.message.starts_with("Traffic back to normal - hits = "));
    assert!(cleared.at > raised.at);

    let snapshot = stats.load();
    assert!(!snapshot.alert.on);
    assert_eq!(snapshot.lifetime_hits, (16 * QUIET_PER_FRAME + 4 * BURST_PER_FRAME) as u64);

    let events = captured.lock().unwrap();
    let warned = events
        .iter()
        .filter(|e| e.level == Level::WARN && e.message().starts_with("High traffic"))
        .count();
    assert_eq!(warned, 1);
    let recovered = events
        .iter()
        .find(|e| e.message().starts_with("Traffic back to normal"))
        .expect("recovery logged");
    assert!(recovered.field("lps_scene").is_some());
}
