//! The 12-stage trial progression table.
//!
//! Each stage parameterizes difficulty (damage multiplier, rare intent boost,
//! optional round override) and names the rewards handed to the external
//! meta-progression system when the trial ends.

use std::collections::BTreeMap;

use crate::config::TrialConfig;
use crate::error::{ErrorSeverity, GameError};

/// Opaque reward payload consumed by the legacy/meta system.
///
/// The engine never interprets the entries; it only hands the descriptor of
/// the matching outcome to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RewardDescriptor(pub BTreeMap<String, i64>);

impl RewardDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, amount: i64) -> Self {
        self.0.insert(key.into(), amount);
        self
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.0.get(key).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Difficulty modifiers of a stage. Every field defaults to neutral.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageMods {
    pub damage_mult: f64,
    pub intent_rarity_boost: f64,
    pub max_rounds: Option<u8>,
}

impl StageMods {
    pub const NEUTRAL: Self = Self {
        damage_mult: 1.0,
        intent_rarity_boost: 0.0,
        max_rounds: None,
    };
}

impl Default for StageMods {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Immutable configuration of one trial stage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageConfig {
    pub idx: u8,
    pub name: String,
    /// Ordinal difficulty label shown to the player.
    pub tier: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mods: StageMods,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_on_win: RewardDescriptor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reward_on_lose: RewardDescriptor,
}

impl StageConfig {
    /// Creates a stage with neutral modifiers and empty rewards.
    pub fn new(idx: u8, name: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            idx,
            name: name.into(),
            tier: tier.into(),
            mods: StageMods::NEUTRAL,
            reward_on_win: RewardDescriptor::new(),
            reward_on_lose: RewardDescriptor::new(),
        }
    }

    /// Turns a trial at this stage lasts.
    ///
    /// The level band decides unless `mods.max_rounds` overrides it; the
    /// override is clamped into the 3..=5 range.
    pub fn total_turns(&self) -> u8 {
        match self.mods.max_rounds {
            Some(rounds) => rounds.clamp(TrialConfig::MIN_TURNS, TrialConfig::MAX_TURNS),
            None => TrialConfig::total_turns(self.idx),
        }
    }
}

/// Where the player stands in the progression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StageCursor {
    /// Stage index of the next trial to attempt.
    Next(u8),
    /// Every stage has been cleared.
    AllCleared,
}

/// Ordered table of exactly [`TrialConfig::STAGE_COUNT`] stages.
#[derive(Clone, Debug)]
pub struct StageTable {
    stages: Vec<StageConfig>,
}

impl StageTable {
    /// Builds the table, sorting by `idx`.
    ///
    /// # Errors
    ///
    /// Fails unless the stages cover indices 1..=12 exactly once and every
    /// modifier is in range.
    pub fn new(mut stages: Vec<StageConfig>) -> Result<Self, StageTableError> {
        let expected = usize::from(TrialConfig::STAGE_COUNT);
        if stages.len() != expected {
            return Err(StageTableError::WrongCount {
                expected,
                found: stages.len(),
            });
        }

        stages.sort_by_key(|stage| stage.idx);
        for (position, stage) in stages.iter().enumerate() {
            let want = position as u8 + 1;
            if stage.idx != want {
                return Err(StageTableError::MissingIndex(want));
            }
            validate_mods(stage)?;
        }

        Ok(Self { stages })
    }

    /// Stage config for `idx` in 1..=12, `None` otherwise.
    pub fn get(&self, idx: u8) -> Option<&StageConfig> {
        let position = usize::from(idx).checked_sub(1)?;
        self.stages.get(position)
    }

    /// Maps the number of cleared stages to the next stage to attempt.
    pub fn current_idx(&self, cleared_count: u8) -> StageCursor {
        if cleared_count < TrialConfig::STAGE_COUNT {
            StageCursor::Next(cleared_count + 1)
        } else {
            StageCursor::AllCleared
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StageConfig> {
        self.stages.iter()
    }
}

fn validate_mods(stage: &StageConfig) -> Result<(), StageTableError> {
    let mods = &stage.mods;
    if !mods.damage_mult.is_finite() || mods.damage_mult <= 0.0 {
        return Err(StageTableError::InvalidDamageMult {
            idx: stage.idx,
            value: mods.damage_mult,
        });
    }
    if !mods.intent_rarity_boost.is_finite() || mods.intent_rarity_boost < 0.0 {
        return Err(StageTableError::InvalidRarityBoost {
            idx: stage.idx,
            value: mods.intent_rarity_boost,
        });
    }
    if let Some(rounds) = mods.max_rounds {
        if !(TrialConfig::MIN_TURNS..=TrialConfig::MAX_TURNS).contains(&rounds) {
            return Err(StageTableError::InvalidMaxRounds {
                idx: stage.idx,
                value: rounds,
            });
        }
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StageTableError {
    #[error("stage table must have {expected} stages, found {found}")]
    WrongCount { expected: usize, found: usize },

    #[error("stage table has no stage with idx {0}")]
    MissingIndex(u8),

    #[error("stage {idx} has invalid damage multiplier {value}")]
    InvalidDamageMult { idx: u8, value: f64 },

    #[error("stage {idx} has invalid intent rarity boost {value}")]
    InvalidRarityBoost { idx: u8, value: f64 },

    #[error("stage {idx} has max_rounds {value} outside 3..=5")]
    InvalidMaxRounds { idx: u8, value: u8 },
}

impl GameError for StageTableError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use StageTableError::*;
        match self {
            WrongCount { .. } => "STAGE_WRONG_COUNT",
            MissingIndex(_) => "STAGE_MISSING_INDEX",
            InvalidDamageMult { .. } => "STAGE_INVALID_DAMAGE_MULT",
            InvalidRarityBoost { .. } => "STAGE_INVALID_RARITY_BOOST",
            InvalidMaxRounds { .. } => "STAGE_INVALID_MAX_ROUNDS",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages() -> Vec<StageConfig> {
        (1..=12)
            .map(|idx| StageConfig::new(idx, format!("Trial {idx}"), format!("tier-{idx}")))
            .collect()
    }

    #[test]
    fn looks_up_stages_in_range_only() {
        let table = StageTable::new(stages()).unwrap();
        assert_eq!(table.get(1).map(|s| s.idx), Some(1));
        assert_eq!(table.get(12).map(|s| s.idx), Some(12));
        assert!(table.get(0).is_none());
        assert!(table.get(13).is_none());
    }

    #[test]
    fn sorts_out_of_order_input() {
        let mut input = stages();
        input.reverse();
        let table = StageTable::new(input).unwrap();
        let order: Vec<u8> = table.iter().map(|s| s.idx).collect();
        assert_eq!(order, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn current_idx_advances_until_all_cleared() {
        let table = StageTable::new(stages()).unwrap();
        assert_eq!(table.current_idx(0), StageCursor::Next(1));
        assert_eq!(table.current_idx(11), StageCursor::Next(12));
        assert_eq!(table.current_idx(12), StageCursor::AllCleared);
        assert_eq!(table.current_idx(40), StageCursor::AllCleared);
    }

    #[test]
    fn rejects_wrong_count() {
        let mut input = stages();
        input.pop();
        assert_eq!(
            StageTable::new(input).unwrap_err(),
            StageTableError::WrongCount { expected: 12, found: 11 }
        );
    }

    #[test]
    fn rejects_duplicate_index() {
        let mut input = stages();
        input[4].idx = 4;
        assert_eq!(
            StageTable::new(input).unwrap_err(),
            StageTableError::MissingIndex(5)
        );
    }

    #[test]
    fn rejects_out_of_range_mods() {
        let mut input = stages();
        input[2].mods.max_rounds = Some(9);
        assert!(matches!(
            StageTable::new(input),
            Err(StageTableError::InvalidMaxRounds { idx: 3, value: 9 })
        ));

        let mut input = stages();
        input[0].mods.damage_mult = 0.0;
        assert!(matches!(
            StageTable::new(input),
            Err(StageTableError::InvalidDamageMult { idx: 1, .. })
        ));
    }

    #[test]
    fn max_rounds_overrides_level_band() {
        let mut stage = StageConfig::new(2, "Trial 2", "tier-2");
        assert_eq!(stage.total_turns(), 3);
        stage.mods.max_rounds = Some(5);
        assert_eq!(stage.total_turns(), 5);
    }
}
