//! `maxspace` user configuration, read from `$XDG_CONFIG_HOME/maxspace/config.toml`.

mod checks;
mod default;

use anyhow::{Context, Result};
use maxspace_core::config::{NamingMode, ReclaimPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

/// General configuration
///
/// # Example
///
/// In `config.toml`
///
/// ```toml
/// reuse_existing_workspace = true
/// reclaim = "sweep"
/// sweep_interval_ms = 60000
/// auto_rename_workspaces = true
/// ```
#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub reuse_existing_workspace: bool,
    pub reuse_main_workspace: bool,
    pub create_when_exhausted: bool,
    pub reclaim: ReclaimPolicy,
    pub auto_cleanup_on_startup: bool,
    pub startup_cleanup_delay_ms: u64,
    pub sweep_interval_ms: Option<u64>,
    pub auto_rename_workspaces: bool,
    pub naming: NamingMode,
    pub main_workspace_name: String,
    pub switch_delay_ms: u64,
    pub verbose_logging: bool,
}

/// Returns the path of the configuration file, `explicit` if given.
///
/// # Errors
///
/// Errors if the XDG base directories cannot be determined, or the config directory cannot be
/// created.
pub fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let dirs = BaseDirectories::with_prefix("maxspace")?;
    Ok(dirs.place_config_file("config.toml")?)
}

/// Load the configuration, falling back to the defaults if it cannot be read.
#[must_use]
pub fn load(path: &Path) -> Config {
    load_or_create(path)
        .map_err(|err| tracing::error!("Unable to load {}: {:?}", path.display(), err))
        .unwrap_or_default()
}

/// Load the configuration from `path`, writing the defaults there first if it does not exist.
///
/// # Errors
///
/// Errors if the file cannot be read or written, or is not a valid configuration.
pub fn load_or_create(path: &Path) -> Result<Config> {
    if path.exists() {
        return read(path);
    }
    let config = Config::default();
    let toml = toml::to_string(&config)?;
    fs::write(path, toml).with_context(|| format!("writing defaults to {}", path.display()))?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(config)
}

/// Read and parse an existing configuration file.
///
/// # Errors
///
/// Errors if the file cannot be read or is not a valid configuration.
pub fn read(path: &Path) -> Result<Config> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

impl maxspace_core::Config for Config {
    fn reuse_existing_workspace(&self) -> bool {
        self.reuse_existing_workspace
    }

    fn reuse_main_workspace(&self) -> bool {
        self.reuse_main_workspace
    }

    fn create_when_exhausted(&self) -> bool {
        self.create_when_exhausted
    }

    fn reclaim_policy(&self) -> ReclaimPolicy {
        self.reclaim
    }

    fn auto_cleanup_on_startup(&self) -> bool {
        self.auto_cleanup_on_startup
    }

    fn startup_cleanup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_cleanup_delay_ms)
    }

    fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    fn auto_rename_workspaces(&self) -> bool {
        self.auto_rename_workspaces
    }

    fn naming_mode(&self) -> NamingMode {
        self.naming
    }

    fn main_workspace_name(&self) -> String {
        self.main_workspace_name.clone()
    }

    fn switch_delay(&self) -> Duration {
        Duration::from_millis(self.switch_delay_ms)
    }
}
