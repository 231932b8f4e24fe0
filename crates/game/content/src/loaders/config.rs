//! Engine tunables loader.

use std::path::Path;

use trial_core::TrialConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for trial configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the [`TrialConfig`] defaults.
    pub fn load(path: &Path) -> LoadResult<TrialConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TrialConfig> {
        let config: TrialConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}
