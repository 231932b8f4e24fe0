//! Content factory for building the trial registry from data files.

use std::path::{Path, PathBuf};

use trial_core::{IntentCatalog, PillCatalog, StageTable, TrialConfig, TrialRegistry};

use crate::loaders::{ConfigLoader, IntentLoader, LoadResult, PillLoader, StageLoader};

/// Content factory that loads all trial content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── intents.ron
/// ├── pills.ron
/// └── stages.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the `data/` directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Self::bundled_data_dir())
    }

    pub fn bundled_data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load engine tunables from `config.toml`.
    pub fn load_config(&self) -> LoadResult<TrialConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the intent catalog from `intents.ron`.
    pub fn load_intents(&self) -> LoadResult<IntentCatalog> {
        IntentLoader::load(&self.data_dir.join("intents.ron"))
    }

    /// Load the stage table from `stages.ron`.
    pub fn load_stages(&self) -> LoadResult<StageTable> {
        StageLoader::load(&self.data_dir.join("stages.ron"))
    }

    /// Load pill definitions from `pills.ron`.
    pub fn load_pills(&self) -> LoadResult<PillCatalog> {
        PillLoader::load(&self.data_dir.join("pills.ron"))
    }

    /// Load every table and bundle them into a registry.
    pub fn load_registry(&self) -> LoadResult<TrialRegistry> {
        Ok(TrialRegistry::new(
            self.load_intents()?,
            self.load_stages()?,
            self.load_pills()?,
            self.load_config()?,
        ))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
