//! Deterministic trial combat rules shared by the runtime and offline tools.
//!
//! `trial-core` defines the canonical trial rules (intents, damage, actions,
//! stage progression) and exposes pure APIs. Every trial transition flows
//! through [`engine::TrialEngine`]; randomness is always supplied by the
//! caller through [`env::RandomSource`], so a seed plus an action script
//! replays a trial exactly.
pub mod action;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod intent;
pub mod registry;
pub mod stage;
pub mod state;

pub use action::{ActionError, ActionKind, ActionParseError, PillUse, TrialAction, TurnReport};
pub use combat::{DamageRange, compute_damage};
pub use config::TrialConfig;
pub use engine::{TrialEngine, TrialError, TrialProgress, TrialResult, TurnOutcome};
pub use env::{
    PcgRng, PillCatalog, PillCatalogError, PillDefinition, PillEffect, PillId, PillOracle,
    PillQuality, RandomSource, RngError, ScriptedRng,
};
pub use error::{ErrorSeverity, GameError};
pub use intent::{
    CatalogError, DebuffApplication, DebuffKind, Intent, IntentCatalog, IntentEffect, IntentId,
    Rarity, roll_intent, roll_intent_boosted,
};
pub use registry::TrialRegistry;
pub use stage::{RewardDescriptor, StageConfig, StageCursor, StageMods, StageTable, StageTableError};
pub use state::{
    Debuffs, Modifiers, PillInventory, PillRef, PlayerVitals, TrialLog, TrialState, TurnContext,
};
