//! Drill configuration
//!
//! Read from `config.toml` in the platform config directory
//! (e.g. `~/.config/tonedrill/config.toml`). Every key is optional:
//!
//! ```toml
//! data_dir = "/home/me/.local/share/tonedrill"
//! lexicon_path = "/home/me/chars/cme-1000.txt"
//! variant_table = "/home/me/chars/variants.tsv"
//! store_file = "performance_data.json"
//! selection = "interval-weighted"
//! syllable_rule = "strip-diacritic"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::drill::{SelectionPolicy, SyllableRule, DEFAULT_STORE_FILE};

const APP_DIR: &str = "tonedrill";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_LEXICON_FILE: &str = "lexicon.txt";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory not found")]
    ConfigDirNotFound,

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillConfig {
    /// Where the performance store lives
    pub data_dir: Option<PathBuf>,
    /// Lexicon file; defaults to `lexicon.txt` in the data directory
    pub lexicon_path: Option<PathBuf>,
    /// Extra simplified/traditional pairs
    pub variant_table: Option<PathBuf>,
    pub store_file: Option<String>,
    pub selection: SelectionPolicy,
    pub syllable_rule: SyllableRule,
}

impl DrillConfig {
    /// Default location of the config file
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR).join(CONFIG_FILE))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolved data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_local_dir()
                .map(|p| p.join(APP_DIR))
                .ok_or(ConfigError::DataDirNotFound),
        }
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        let file = self.store_file.as_deref().unwrap_or(DEFAULT_STORE_FILE);
        Ok(self.data_dir()?.join(file))
    }

    pub fn lexicon_path(&self) -> Result<PathBuf> {
        match &self.lexicon_path {
            Some(path) => Ok(path.clone()),
            None => Ok(self.data_dir()?.join(DEFAULT_LEXICON_FILE)),
        }
    }
}
