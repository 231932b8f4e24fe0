//! Damage model for trial turns.
//!
//! Pure functions converting an intent and the active modifiers into
//! effective damage. All functions are deterministic and side-effect free.
//!
//! # Core Functions
//!
//! - `compute_damage`: preview range for an intent under modifiers
//! - `roll_base_damage`: map a draw onto the intent's base range
//! - `scale_rolled` / `mitigate`: turn a roll into the hit an action takes
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;

pub use damage::{
    DamageRange, apply_damage, compute_damage, effective_multiplier, mitigate, roll_base_damage,
    scale_rolled,
};
