//! Intent catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trial_core::{Intent, IntentCatalog};

use crate::loaders::{LoadResult, read_file};

/// Intent table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentTable {
    pub intents: Vec<Intent>,
}

/// Loader for the intent catalog from RON files.
pub struct IntentLoader;

impl IntentLoader {
    /// Load and validate the intent catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<IntentCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<IntentCatalog> {
        let table: IntentTable = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse intent table RON: {}", e))?;

        IntentCatalog::new(table.intents)
            .map_err(|e| anyhow::anyhow!("Invalid intent table: {}", e))
    }
}
