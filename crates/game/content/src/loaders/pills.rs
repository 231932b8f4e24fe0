//! Pill definition loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trial_core::{PillCatalog, PillDefinition};

use crate::loaders::{LoadResult, read_file};

/// Pill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PillList {
    pub pills: Vec<PillDefinition>,
}

/// Loader for pill definitions from RON files.
pub struct PillLoader;

impl PillLoader {
    pub fn load(path: &Path) -> LoadResult<PillCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PillCatalog> {
        let list: PillList = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse pill catalog RON: {}", e))?;

        PillCatalog::new(list.pills).map_err(|e| anyhow::anyhow!("Invalid pill catalog: {}", e))
    }
}
