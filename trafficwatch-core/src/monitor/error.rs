use crate::conf::ConfigError;
use crate::source::SourceError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("{task} task failed: {source}")]
    Join {
        task: &'static str,
        #[source]
        source: JoinError,
    },
}
