//! Host configuration loaded from `favourites.ron`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use favourites_engine::SourceSettings;
use serde::{Deserialize, Serialize};
use sync_logging::sync_info;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILENAME: &str = "favourites.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub session_cookie: Option<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let source = SourceSettings::default();
        Self {
            base_url: source.base_url,
            session_cookie: source.session_cookie,
            connect_timeout_secs: source.connect_timeout.as_secs(),
            request_timeout_secs: source.request_timeout.as_secs(),
            max_bytes: source.max_bytes,
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    /// Loads `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        sync_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            session_cookie: self.session_cookie.clone(),
        }
    }
}
