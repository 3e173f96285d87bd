use crate::error::{Result, VitrineError};
use crate::facets::DEFAULT_VISIBLE_OPTIONS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_PAGE_SIZE: usize = 12;
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Configuration for vitrine, stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VitrineConfig {
    /// Items per listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Trailing-edge debounce window for pipeline re-runs, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Options a collapsed facet shows before "View more"
    #[serde(default = "default_visible_options")]
    pub visible_options: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_visible_options() -> usize {
    DEFAULT_VISIBLE_OPTIONS
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            visible_options: DEFAULT_VISIBLE_OPTIONS,
        }
    }
}

impl VitrineConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(VitrineError::Io)?;
        let config: VitrineConfig =
            serde_json::from_str(&content).map_err(VitrineError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(VitrineError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(VitrineError::Serialization)?;
        fs::write(config_path, content).map_err(VitrineError::Io)?;
        Ok(())
    }

    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }
}
