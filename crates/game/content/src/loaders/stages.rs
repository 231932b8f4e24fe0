//! Stage progression table loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use trial_core::{StageConfig, StageTable};

use crate::loaders::{LoadResult, read_file};

/// Stage table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageList {
    pub stages: Vec<StageConfig>,
}

/// Loader for the 12-stage table from RON files.
pub struct StageLoader;

impl StageLoader {
    pub fn load(path: &Path) -> LoadResult<StageTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<StageTable> {
        let list: StageList = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stage table RON: {}", e))?;

        StageTable::new(list.stages).map_err(|e| anyhow::anyhow!("Invalid stage table: {}", e))
    }
}
