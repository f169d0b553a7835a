use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dispatch::FormState;
use crate::monitor::MonitorConfig;

pub const DEFAULT_CONFIG_FILE: &str = "memsim.json";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_LOG_FILE: &str = "memsim.log";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub stats_refresh_secs: u64,
    pub health_probe_secs: u64,
    /// Per-request timeout. Zero disables it.
    pub request_timeout_secs: u64,
    pub log_file: PathBuf,
    pub allocation_algorithm: String,
    pub page_algorithm: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            stats_refresh_secs: 30,
            health_probe_secs: 60,
            request_timeout_secs: 30,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            allocation_algorithm: "first".to_string(),
            page_algorithm: "fifo".to_string(),
        }
    }
}

impl Config {
    /// Read `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read {}", path.display()));
            }
        };
        let cfg: Config = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(self).context("serialize config")?;
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if self.stats_refresh_secs == 0 || self.health_probe_secs == 0 {
            anyhow::bail!("stats_refresh_secs and health_probe_secs must be positive");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn monitor(&self) -> MonitorConfig {
        MonitorConfig {
            stats_period: Duration::from_secs(self.stats_refresh_secs),
            probe_period: Duration::from_secs(self.health_probe_secs),
        }
    }

    pub fn initial_form(&self) -> FormState {
        FormState {
            allocation_algorithm: self.allocation_algorithm.clone(),
            page_algorithm: self.page_algorithm.clone(),
            ..FormState::default()
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
