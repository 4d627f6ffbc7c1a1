use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tonedrill_lib::drill::PerformanceStore;
use tonedrill_lib::lexicon::{convert_all, load_lexicon, VariantTable};
use tonedrill_lib::{CharacterRecord, DrillConfig, ScriptVariant};

/// Shared application state for CLI commands
pub struct App {
    pub config: DrillConfig,
    pub store_path: PathBuf,
    pub lexicon_path: PathBuf,
}

impl App {
    /// Resolve configuration, letting command-line paths win over the file
    pub fn new(
        config_path: Option<&Path>,
        data_dir: Option<PathBuf>,
        lexicon: Option<PathBuf>,
    ) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path.to_path_buf(),
            None => DrillConfig::default_path().context("Failed to locate config directory")?,
        };
        let mut config = DrillConfig::load(&config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?;

        if data_dir.is_some() {
            config.data_dir = data_dir;
        }
        if lexicon.is_some() {
            config.lexicon_path = lexicon;
        }

        let store_path = config.store_path().context("Failed to get data directory")?;
        let lexicon_path = config.lexicon_path().context("Failed to get data directory")?;

        Ok(Self {
            config,
            store_path,
            lexicon_path,
        })
    }

    /// Load the lexicon in the simplified script
    pub fn load_records(&self) -> Result<Vec<CharacterRecord>> {
        load_lexicon(&self.lexicon_path)
            .with_context(|| format!("Failed to load lexicon {}", self.lexicon_path.display()))
    }

    /// Records for the chosen script
    pub fn records_for(
        &self,
        records: Vec<CharacterRecord>,
        script: ScriptVariant,
    ) -> Result<Vec<CharacterRecord>> {
        match script {
            ScriptVariant::Simplified => Ok(records),
            ScriptVariant::Traditional => {
                let table = match &self.config.variant_table {
                    Some(path) => VariantTable::with_file(path)
                        .with_context(|| format!("Failed to load variant table {}", path.display()))?,
                    None => VariantTable::builtin(),
                };
                Ok(convert_all(&records, &table))
            }
        }
    }

    /// Open the performance store; a corrupt file stops the program
    pub fn open_store(&self) -> Result<PerformanceStore> {
        PerformanceStore::open(self.store_path.clone()).with_context(|| {
            format!("Failed to open performance data {}", self.store_path.display())
        })
    }
}
