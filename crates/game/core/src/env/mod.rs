//! Read-only collaborators supplied to the engine.
//!
//! The trial engine reads pill configuration through [`PillOracle`] and draws
//! randomness through [`RandomSource`]. Neither is owned by the engine; both
//! are passed in by the caller.
mod pills;
mod rng;

pub use pills::{
    PillCatalog, PillCatalogError, PillDefinition, PillEffect, PillId, PillOracle, PillQuality,
};
pub use rng::{PcgRng, RandomSource, RngError, ScriptedRng};
