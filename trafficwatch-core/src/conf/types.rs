use crate::conf::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LOG_FILE: &str = "sample_logs/test.log";
pub const DEFAULT_ALERT_THRESHOLD: u64 = 10;
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_secs(10);
pub const DEFAULT_SCENE_INTERVAL: Duration = Duration::from_secs(120);
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_TOP_SECTIONS: usize = 5;

/// Fully resolved monitor settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Access logs to follow, one producer each.
    pub files: Vec<PathBuf>,

    /// Alert fires when the scene rate exceeds the lifetime rate by more than this
    /// many lines per second.
    pub alert_threshold: u64,

    /// Length of one aggregation frame.
    pub frame_interval: Duration,

    /// Length of the sliding alert window. Must be a whole multiple of the frame.
    pub scene_interval: Duration,

    /// Upper bound on a single wait for the next event.
    pub recv_timeout: Duration,

    /// How long a file follower waits for new data before reporting "nothing new".
    pub read_timeout: Duration,

    /// Dashboard redraw cadence.
    pub refresh_interval: Duration,

    /// Number of sections/hosts listed by the dashboard.
    pub top_sections: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            files: vec![PathBuf::from(DEFAULT_LOG_FILE)],
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            scene_interval: DEFAULT_SCENE_INTERVAL,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            top_sections: DEFAULT_TOP_SECTIONS,
        }
    }
}

impl MonitorConfig {
    /// Number of frames held by the sliding window.
    ///
    /// Only meaningful after [`MonitorConfig::validate`] succeeded.
    pub fn scene_slots(&self) -> usize {
        (self.scene_interval.as_nanos() / self.frame_interval.as_nanos()) as usize
    }

    /// Check interval relationships. Source files are checked separately by the
    /// monitor since test pipelines run without any.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval.is_zero() {
            return Err(ConfigError::ZeroFrameInterval);
        }

        if self.scene_interval < self.frame_interval {
            return Err(ConfigError::SceneShorterThanFrame {
                scene: self.scene_interval,
                frame: self.frame_interval,
            });
        }

        if self.scene_interval.as_nanos() % self.frame_interval.as_nanos() != 0 {
            return Err(ConfigError::SceneNotMultipleOfFrame {
                scene: self.scene_interval,
                frame: self.frame_interval,
            });
        }

        for (name, value) in [
            ("recv timeout", self.recv_timeout),
            ("read timeout", self.read_timeout),
            ("refresh interval", self.refresh_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration { name });
            }
        }

        Ok(())
    }
}

/// On-disk shape of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub files: Option<Vec<PathBuf>>,
    pub alert_threshold: Option<u64>,
    pub frame_interval_secs: Option<u64>,
    pub scene_interval_secs: Option<u64>,
    pub recv_timeout_ms: Option<u64>,
    pub read_timeout_ms: Option<u64>,
    pub refresh_interval_ms: Option<u64>,
    pub top_sections: Option<usize>,
}

impl ConfigFile {
    /// Overlay the values present in the file onto `cfg`.
    pub fn apply(self, cfg: &mut MonitorConfig) {
        if let Some(files) = self.files {
            cfg.files = files;
        }
        if let Some(threshold) = self.alert_threshold {
            cfg.alert_threshold = threshold;
        }
        if let Some(secs) = self.frame_interval_secs {
            cfg.frame_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = self.scene_interval_secs {
            cfg.scene_interval = Duration::from_secs(secs);
        }
        if let Some(ms) = self.recv_timeout_ms {
            cfg.recv_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.read_timeout_ms {
            cfg.read_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.refresh_interval_ms {
            cfg.refresh_interval = Duration::from_millis(ms);
        }
        if let Some(n) = self.top_sections {
            cfg.top_sections = n;
        }
    }
}
