use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO / Parsing
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Validation
    #[error("no log files to watch")]
    NoSources,

    #[error("frame interval must be greater than zero")]
    ZeroFrameInterval,

    #[error("scene interval {scene:?} is shorter than frame interval {frame:?}")]
    SceneShorterThanFrame { scene: Duration, frame: Duration },

    #[error("scene interval {scene:?} is not a whole multiple of frame interval {frame:?}")]
    SceneNotMultipleOfFrame { scene: Duration, frame: Duration },

    #[error("{name} must be greater than zero")]
    ZeroDuration { name: &'static str },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
