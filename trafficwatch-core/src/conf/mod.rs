mod error;
mod loader;
mod types;


pub use error::ConfigError;
pub use loader::load_config_file;
pub use types::{ConfigFile, MonitorConfig};
