use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Calendar days are counted in Moscow time (UTC+3)
pub const MSK_OFFSET_HOURS: i64 = 3;
/// Rows per purchases table page
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_CONFIG_FILE: &str = "earnings.toml";
pub const DEFAULT_EXPORT_FILE: &str = "earnings-stats.toml";
pub const DEFAULT_SUMMARY_FILE: &str = "summary.toml";

pub const ENV_EXPORT_PATH: &str = "EARNINGS_EXPORT_PATH";
pub const ENV_PAGE_SIZE: &str = "EARNINGS_PAGE_SIZE";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Where `earnings export` writes the dataset
    pub export_path: PathBuf,
    pub page_size: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from(DEFAULT_EXPORT_FILE),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(content).context("Failed to parse dashboard config")?;
        Ok(config)
    }

    /// Loads the config file, then applies environment overrides.
    ///
    /// An explicit `path` must exist. Without one, `earnings.toml` in the
    /// working directory is used when present, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                Self::from_toml_str(&content)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                let content = fs::read_to_string(DEFAULT_CONFIG_FILE)
                    .with_context(|| format!("Failed to read config file: {}", DEFAULT_CONFIG_FILE))?;
                Self::from_toml_str(&content)?
            }
            None => {
                debug!("no config file found, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies `EARNINGS_*` overrides looked up through `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(ENV_EXPORT_PATH) {
            self.export_path = PathBuf::from(path);
        }
        if let Some(size) = lookup(ENV_PAGE_SIZE) {
            self.page_size = size
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive integer, got {:?}", ENV_PAGE_SIZE, size))?;
        }
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        Ok(())
    }
}
