//! Content loaders for reading trial data from files.
//!
//! Each loader parses one file and runs the matching trial-core constructor,
//! so a loaded table is always a validated one.

pub mod config;
pub mod factory;
pub mod intents;
pub mod pills;
pub mod stages;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use intents::IntentLoader;
pub use pills::PillLoader;
pub use stages::StageLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
