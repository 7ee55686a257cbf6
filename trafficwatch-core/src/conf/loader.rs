use crate::conf::ConfigError;
use crate::conf::types::ConfigFile;
use std::fs;
use std::path::Path;

/// Read an optional TOML config file.
///
/// Every key is optional; absent keys leave the corresponding default (or CLI value)
/// untouched when the file is applied with [`ConfigFile::apply`].
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    toml::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}
