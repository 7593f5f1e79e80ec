use crate::ledger::LedgerSettings;
use crate::ticker::DEFAULT_TICK_MS;
use crate::undo::DEFAULT_UNDO_TIMEOUT;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Longest undo window accepted from config (one day)
const MAX_UNDO_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Longest event poll interval accepted from config
const MAX_TICK_MS: u64 = 60_000;

/// Optional `config.toml` in the data directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Seconds an undo stays available
    pub undo_timeout_secs: u64,
    /// Event poll interval for the TUI
    pub tick_ms: u64,
    /// Drop days with no tasks at all when loading
    pub prune_empty_days: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            undo_timeout_secs: DEFAULT_UNDO_TIMEOUT.as_secs(),
            tick_ms: DEFAULT_TICK_MS,
            prune_empty_days: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Config = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if !(1..=MAX_UNDO_TIMEOUT_SECS).contains(&self.undo_timeout_secs) {
            bail!(
                "undo_timeout_secs must be between 1 and {} in {}",
                MAX_UNDO_TIMEOUT_SECS,
                path.display()
            );
        }
        if !(1..=MAX_TICK_MS).contains(&self.tick_ms) {
            bail!(
                "tick_ms must be between 1 and {} in {}",
                MAX_TICK_MS,
                path.display()
            );
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            undo_timeout: Duration::from_secs(self.undo_timeout_secs),
            prune_empty_days: self.prune_empty_days,
        }
    }
}
