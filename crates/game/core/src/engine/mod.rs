//! Trial state machine.
//!
//! The [`TrialEngine`] is the authoritative reducer for [`TrialState`]. It
//! reads content from a [`TrialRegistry`], takes randomness from the caller
//! and never mutates its inputs: every call returns fresh values.
//!
//! ```text
//! start(level) --> Active --act--> Active ... --act--> Won | Lost
//! ```
//!
//! Abandoning a trial is a caller-side transition; the engine holds no state
//! that would need cleaning up.

mod errors;

pub use errors::TrialError;

use crate::action::{ActionKind, PillUse, TrialAction, TurnReport, Verdict, resolve_action};
use crate::combat::{DamageRange, compute_damage};
use crate::env::{PillOracle, RandomSource};
use crate::intent::{Intent, Rarity, roll_intent_boosted};
use crate::registry::TrialRegistry;
use crate::config::TrialConfig;
use crate::stage::{RewardDescriptor, StageConfig};
use crate::state::{Modifiers, PillInventory, PlayerVitals, TrialState, TurnContext};

/// Terminal result of a trial attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialResult {
    Won,
    Lost,
    /// The player left mid-trial; settles like a loss.
    Abandoned,
}

/// Where the trial stands after an action.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrialProgress {
    /// The next intent has been drawn and the player acts again.
    Continue(TrialState),
    Won(TrialState),
    Lost(TrialState),
}

impl TrialProgress {
    pub fn state(&self) -> &TrialState {
        match self {
            Self::Continue(state) | Self::Won(state) | Self::Lost(state) => state,
        }
    }

    pub fn into_state(self) -> TrialState {
        match self {
            Self::Continue(state) | Self::Won(state) | Self::Lost(state) => state,
        }
    }

    /// `None` while the trial is still active.
    pub fn result(&self) -> Option<TrialResult> {
        match self {
            Self::Continue(_) => None,
            Self::Won(_) => Some(TrialResult::Won),
            Self::Lost(_) => Some(TrialResult::Lost),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Continue(_))
    }
}

/// Everything an accepted action produced.
///
/// `vitals`, `extra_lives` and `pill_use` are the caller's to write back
/// into its own player state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub vitals: PlayerVitals,
    pub extra_lives: u32,
    pub pill_use: Option<PillUse>,
    pub report: TurnReport,
    pub progress: TrialProgress,
}

/// Runs trials against a registry.
#[derive(Clone, Copy, Debug)]
pub struct TrialEngine<'a> {
    registry: &'a TrialRegistry,
}

impl<'a> TrialEngine<'a> {
    pub fn new(registry: &'a TrialRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a TrialRegistry {
        self.registry
    }

    /// Begins a trial at `level` and draws its first intent.
    ///
    /// Consumes exactly one draw.
    ///
    /// # Errors
    ///
    /// [`TrialError::InvalidLevel`] outside 1..=12, [`TrialError::Rng`] if the
    /// generator fails.
    pub fn start<R>(&self, level: u8, rng: &mut R) -> Result<TrialState, TrialError>
    where
        R: RandomSource + ?Sized,
    {
        let stage = self.stage(level)?;
        let intent = self.draw_intent(stage, rng)?;
        let wrath = self.wrath_after(self.registry.config().initial_wrath, intent.rarity);

        Ok(TrialState::begin(
            level,
            stage.total_turns(),
            wrath,
            intent.clone(),
        ))
    }

    /// Resolves one action and, if the trial continues, draws the next intent.
    ///
    /// Consumes one draw for damage, one more for a surge check and one for
    /// the next intent. Rejected actions consume nothing.
    ///
    /// # Errors
    ///
    /// [`TrialError::Action`] when the action is rejected, [`TrialError::Rng`]
    /// if the generator fails.
    pub fn act<R>(
        &self,
        state: &TrialState,
        ctx: &TurnContext<'_>,
        action: &TrialAction,
        rng: &mut R,
    ) -> Result<TurnOutcome, TrialError>
    where
        R: RandomSource + ?Sized,
    {
        let stage = self.stage(state.level())?;
        let modifiers = Modifiers {
            damage_mult: ctx.modifiers.damage_mult * stage.mods.damage_mult,
            ..ctx.modifiers
        };
        let staged = TurnContext { modifiers, ..*ctx };

        let resolution = resolve_action(state, &staged, action, self.registry.pills(), rng)?;

        let progress = match resolution.verdict {
            Verdict::Continue => {
                let intent = self.draw_intent(stage, rng)?;
                let mut next = resolution.state;
                next.wrath = self.wrath_after(next.wrath, intent.rarity);
                next.current_intent = intent.clone();
                TrialProgress::Continue(next)
            }
            Verdict::Won => TrialProgress::Won(resolution.state),
            Verdict::Lost => TrialProgress::Lost(resolution.state),
        };

        Ok(TurnOutcome {
            vitals: resolution.vitals,
            extra_lives: resolution.extra_lives,
            pill_use: resolution.pill_use,
            report: resolution.report,
            progress,
        })
    }

    /// Damage range of the telegraphed intent before action mitigation.
    pub fn preview(&self, state: &TrialState, modifiers: &Modifiers) -> DamageRange {
        let stage_mult = self
            .registry
            .stages()
            .get(state.level())
            .map_or(1.0, |stage| stage.mods.damage_mult);
        compute_damage(
            state.current_intent(),
            modifiers.damage_mult * stage_mult,
            modifiers.damage_reduction_percent,
        )
    }

    /// Actions that would not be rejected right now, in display order.
    pub fn available_actions(
        &self,
        state: &TrialState,
        inventory: &PillInventory,
    ) -> Vec<ActionKind> {
        if state.is_complete() {
            return Vec::new();
        }

        let mut actions = vec![ActionKind::Steady];
        let pills = self.registry.pills();
        let has_pill = inventory
            .iter()
            .any(|(pill, count)| count > 0 && pills.definition(&pill.id).is_some());
        if has_pill {
            actions.push(ActionKind::Pill);
        }
        actions.push(ActionKind::Guard);
        if state.debuffs().weak == 0 {
            actions.push(ActionKind::Surge);
        }
        actions
    }

    /// Probability that a surge taken now succeeds.
    pub fn surge_chance(&self, state: &TrialState, modifiers: &Modifiers) -> f64 {
        crate::action::surge_chance(state, modifiers)
    }

    /// Reward handed to meta-progression for `result` at `level`.
    pub fn reward(&self, level: u8, result: TrialResult) -> Option<&'a RewardDescriptor> {
        let stage = self.registry.stages().get(level)?;
        Some(match result {
            TrialResult::Won => &stage.reward_on_win,
            TrialResult::Lost | TrialResult::Abandoned => &stage.reward_on_lose,
        })
    }

    fn stage(&self, level: u8) -> Result<&'a StageConfig, TrialError> {
        self.registry
            .stages()
            .get(level)
            .ok_or(TrialError::InvalidLevel(level))
    }

    fn draw_intent<R>(&self, stage: &StageConfig, rng: &mut R) -> Result<&'a Intent, TrialError>
    where
        R: RandomSource + ?Sized,
    {
        let intent = roll_intent_boosted(
            self.registry.intents(),
            stage.idx,
            stage.mods.intent_rarity_boost,
            rng,
        )?;
        Ok(intent)
    }

    fn wrath_after(&self, wrath: u8, rarity: Rarity) -> u8 {
        let config = self.registry.config();
        let gain = match rarity {
            Rarity::Common => config.wrath_gain_common,
            Rarity::Rare => config.wrath_gain_rare,
        };
        wrath.saturating_add(gain).min(TrialConfig::MAX_WRATH)
    }
}
