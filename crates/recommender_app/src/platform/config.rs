//! Configuration for the recommender binary.
//!
//! Read from an optional RON file; command-line flags win over file values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use recommender_engine::{ClientSettings, ResponseContract, DEFAULT_ENDPOINT};
use serde::Deserialize;
use thiserror::Error;

use super::cli::Cli;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub endpoint: String,
    pub contract: ResponseContract,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: Option<u64>,
    pub max_bytes: u64,
    pub log_file: PathBuf,
    pub log_level: String,
    pub card_columns: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            contract: client.contract,
            connect_timeout_secs: client.connect_timeout.as_secs(),
            request_timeout_secs: client.request_timeout.map(|timeout| timeout.as_secs()),
            max_bytes: client.max_bytes,
            log_file: PathBuf::from("./movie-recommender.log"),
            log_level: "info".to_string(),
            card_columns: 3,
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(contract) = cli.contract {
            self.contract = contract.into();
        }
        if let Some(secs) = cli.request_timeout_secs {
            self.request_timeout_secs = Some(secs);
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            contract: self.contract,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_bytes,
        }
    }

    pub fn columns(&self) -> usize {
        self.card_columns.max(1)
    }
}
