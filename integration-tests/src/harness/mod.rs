pub mod log_file;
pub mod tracing;

pub use self::log_file::{TestLogFile, clf_line};
pub use self::tracing::{CapturedEvent, init_test_tracing};

use std::path::PathBuf;
use std::time::Duration;
use trafficwatch_core::conf::MonitorConfig;

/// Monitor settings scaled down so a scene passes in well under a second.
pub fn fast_config(files: Vec<PathBuf>, threshold: u64) -> MonitorConfig {
    MonitorConfig {
        files,
        alert_threshold: threshold,
        frame_interval: Duration::from_millis(100),
        scene_interval: Duration::from_millis(400),
        recv_timeout: Duration::from_millis(50),
        read_timeout: Duration::from_millis(50),
        refresh_interval: Duration::from_millis(50),
        top_sections: 5,
    }
}
