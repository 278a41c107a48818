//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] over a `config.json` on disk.  The file is
//! read once; every load is validated before it is handed out.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;

/// [`ConfigPort`] reading a camelCase JSON document.
pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse and validate a JSON document.
    pub fn parse(text: &str) -> Result<SystemConfig, ConfigError> {
        let cfg: SystemConfig = serde_json::from_str(text).map_err(|e| {
            warn!("JsonConfigFile: parse error: {}", e);
            ConfigError::Corrupted
        })?;
        cfg.validate()?;
        Ok(cfg)
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            ErrorKind::InvalidData => ConfigError::Corrupted,
            _ => {
                warn!("JsonConfigFile: reading {}: {}", self.path.display(), e);
                ConfigError::IoError
            }
        })?;
        let cfg = Self::parse(&text)?;
        info!(
            "JsonConfigFile: loaded {} (serial={}, period={}ms)",
            self.path.display(),
            cfg.serial_number,
            cfg.cycle_period_ms
        );
        Ok(cfg)
    }
}
