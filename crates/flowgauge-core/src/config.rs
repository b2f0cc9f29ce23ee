//! Tracker defaults loaded from `~/.config/flowgauge/config.toml`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tracker::{
    DeliveryMode, DEFAULT_UPDATE_FREQ, DEFAULT_UPDATE_GRANULE, DEFAULT_WINDOW_SIZE,
};

/// Throttling and delivery settings applied to new trackers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimum interval between delivered snapshots, in milliseconds.
    pub update_freq_ms: u64,
    /// Minimum work delta (absolute units) between delivered snapshots.
    pub update_granule: u64,
    /// Minimum percent delta between delivered snapshots (0 = off).
    pub update_granule_percent: u32,
    /// Samples in the speed window.
    pub window_size: usize,
    /// "best-effort" (default) or "blocking".
    pub delivery: DeliveryMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            update_freq_ms: DEFAULT_UPDATE_FREQ.as_millis() as u64,
            update_granule: DEFAULT_UPDATE_GRANULE,
            update_granule_percent: 0,
            window_size: DEFAULT_WINDOW_SIZE,
            delivery: DeliveryMode::BestEffort,
        }
    }
}

impl TrackerConfig {
    pub fn update_freq(&self) -> Duration {
        Duration::from_millis(self.update_freq_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("flowgauge")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<TrackerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = TrackerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Parse a config file; missing keys keep their defaults.
pub fn load_from_path(path: &Path) -> Result<TrackerConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: TrackerConfig =
        toml::from_str(&data).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}
