/// Trial configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrialConfig {
    /// Wrath the opponent starts a trial with, before the first intent is drawn.
    pub initial_wrath: u8,
    /// Wrath gained when a common intent is drawn.
    pub wrath_gain_common: u8,
    /// Wrath gained when a rare intent is drawn.
    pub wrath_gain_rare: u8,
}

impl TrialConfig {
    // ===== compile-time constants =====
    /// Number of stages in the progression table.
    pub const STAGE_COUNT: u8 = 12;
    /// Maximum number of turn summaries kept in a trial log.
    pub const LOG_CAPACITY: usize = 20;
    pub const MAX_WRATH: u8 = 100;
    pub const MIN_TURNS: u8 = 3;
    pub const MAX_TURNS: u8 = 5;

    // ===== action balance =====
    pub const STEADY_MULTIPLIER: f64 = 0.75;
    pub const GUARD_MULTIPLIER: f64 = 0.5;
    pub const SURGE_FAILURE_MULTIPLIER: f64 = 1.4;
    /// Wrath removed by a successful surge.
    pub const SURGE_WRATH_RELIEF: u8 = 15;
    pub const SURGE_BASE_CHANCE: f64 = 0.5;
    pub const SURGE_LEVEL_PENALTY: f64 = 0.03;
    pub const SURGE_CHAOS_PENALTY: f64 = 0.08;
    pub const SURGE_MIN_CHANCE: f64 = 0.10;
    pub const SURGE_MAX_CHANCE: f64 = 0.90;
    /// Upper bound on burn damage dealt per turn, regardless of stacks.
    pub const BURN_DAMAGE_CAP: u8 = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INITIAL_WRATH: u8 = 20;
    pub const DEFAULT_WRATH_GAIN_COMMON: u8 = 8;
    pub const DEFAULT_WRATH_GAIN_RARE: u8 = 15;

    pub fn new() -> Self {
        Self {
            initial_wrath: Self::DEFAULT_INITIAL_WRATH,
            wrath_gain_common: Self::DEFAULT_WRATH_GAIN_COMMON,
            wrath_gain_rare: Self::DEFAULT_WRATH_GAIN_RARE,
        }
    }

    /// Number of turns a trial at `level` lasts.
    ///
    /// Levels 1-5 last 3 turns, 6-9 last 4 and 10-12 last 5. Out-of-range
    /// levels are clamped into 1..=12 first.
    pub const fn total_turns(level: u8) -> u8 {
        match level {
            0..=5 => 3,
            6..=9 => 4,
            _ => 5,
        }
    }
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_turns_follow_level_bands() {
        for level in 1..=5 {
            assert_eq!(TrialConfig::total_turns(level), 3, "level {level}");
        }
        for level in 6..=9 {
            assert_eq!(TrialConfig::total_turns(level), 4, "level {level}");
        }
        for level in 10..=12 {
            assert_eq!(TrialConfig::total_turns(level), 5, "level {level}");
        }
    }
}
