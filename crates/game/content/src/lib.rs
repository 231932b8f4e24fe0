//! Data-driven trial content and loaders.
//!
//! This crate houses the static trial tables and provides loaders for the
//! RON/TOML data files shipped under `data/`:
//! - Intent catalog (`intents.ron`)
//! - Stage progression table (`stages.ron`)
//! - Pill definitions (`pills.ron`)
//! - Engine tunables (`config.toml`)
//!
//! Content is validated on load and bundled into a
//! [`TrialRegistry`](trial_core::TrialRegistry); it never appears in trial
//! state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, IntentLoader, LoadResult, PillLoader, StageLoader};
