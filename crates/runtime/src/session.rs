//! Trial session driver.
//!
//! A [`TrialSession`] walks a player through the stage table one trial at a
//! time. It owns the random stream, so consecutive trials draw from a single
//! seeded sequence and every trial can later be replayed from its
//! [`TrialRecord`].

use trial_core::{
    ActionKind, DamageRange, PcgRng, RewardDescriptor, StageCursor, TrialAction, TrialEngine,
    TrialError, TrialProgress, TrialRegistry, TrialResult, TrialState, TurnReport,
};

use crate::error::{Result, SessionError};
use crate::profile::PlayerProfile;
use crate::replay::TrialRecord;
use crate::settlement::{MetaSettlement, Settlement};

/// What an accepted action produced, from the session's point of view.
#[derive(Clone, Debug, PartialEq)]
pub struct SubmitOutcome {
    pub report: TurnReport,
    pub progress: TrialProgress,
    /// Present when this action ended the trial.
    pub settlement: Option<Settlement>,
}

#[derive(Clone, Debug)]
struct ActiveTrial {
    state: TrialState,
    record: TrialRecord,
}

pub struct TrialSession<'r, S: MetaSettlement> {
    engine: TrialEngine<'r>,
    profile: PlayerProfile,
    rng: PcgRng,
    settlement: S,
    active: Option<ActiveTrial>,
    history: Vec<TrialRecord>,
}

impl<'r, S: MetaSettlement> TrialSession<'r, S> {
    pub fn new(registry: &'r TrialRegistry, profile: PlayerProfile, seed: u64, settlement: S) -> Self {
        Self::resume(registry, profile, PcgRng::new(seed), settlement)
    }

    /// Continues a session whose random stream has already advanced.
    pub fn resume(
        registry: &'r TrialRegistry,
        profile: PlayerProfile,
        rng: PcgRng,
        settlement: S,
    ) -> Self {
        Self {
            engine: TrialEngine::new(registry),
            profile,
            rng,
            settlement,
            active: None,
            history: Vec::new(),
        }
    }

    pub fn profile(&self) -> &PlayerProfile {
        &self.profile
    }

    /// Mutable access for systems outside the trial (healing, brewing).
    ///
    /// Changes made while a trial is active apply from the next action; they
    /// are not part of the trial record.
    pub fn profile_mut(&mut self) -> &mut PlayerProfile {
        &mut self.profile
    }

    pub fn settlement(&self) -> &S {
        &self.settlement
    }

    pub fn into_settlement(self) -> S {
        self.settlement
    }

    pub fn rng(&self) -> PcgRng {
        self.rng
    }

    /// Concluded trials, oldest first.
    pub fn history(&self) -> &[TrialRecord] {
        &self.history
    }

    pub fn active_state(&self) -> Option<&TrialState> {
        self.active.as_ref().map(|active| &active.state)
    }

    /// The next stage to attempt, or [`StageCursor::AllCleared`].
    pub fn cursor(&self) -> StageCursor {
        self.engine
            .registry()
            .stages()
            .current_idx(self.profile.cleared)
    }

    /// Starts the next uncleared stage.
    pub fn enter_next_trial(&mut self) -> Result<&TrialState> {
        if let Some(active) = &self.active {
            return Err(SessionError::TrialInProgress {
                level: active.state.level(),
            });
        }
        let level = match self.cursor() {
            StageCursor::Next(level) => level,
            StageCursor::AllCleared => return Err(SessionError::AllStagesCleared),
        };
        if !self.profile.vitals.is_alive() {
            return Err(SessionError::Incapacitated);
        }

        let record = TrialRecord::begin(level, &self.rng, self.profile.clone());
        let state = self.engine.start(level, &mut self.rng)?;

        tracing::info!(
            stage = level,
            turns = state.total_turns(),
            wrath = state.wrath(),
            intent = %state.current_intent().id,
            "trial started"
        );

        let active = self.active.insert(ActiveTrial { state, record });
        Ok(&active.state)
    }

    /// Resolves one action against the active trial.
    ///
    /// Rejected actions leave the session untouched and can be retried with a
    /// different action.
    pub fn submit(&mut self, action: TrialAction) -> Result<SubmitOutcome> {
        let active = self.active.as_ref().ok_or(SessionError::NoActiveTrial)?;
        let ctx = self.profile.turn_context();

        let outcome = match self.engine.act(&active.state, &ctx, &action, &mut self.rng) {
            Ok(outcome) => outcome,
            Err(err) => {
                log_failure(&active.state, &action, &err);
                return Err(err.into());
            }
        };

        self.profile.apply(&outcome);
        let report = &outcome.report;
        tracing::debug!(
            "Turn {}/{}: {} vs {} rolled {} hit {} absorbed {} burn {} hp {}",
            active.state.turn() + 1,
            active.state.total_turns(),
            report.action,
            active.state.current_intent().id,
            report.rolled,
            report.hit,
            report.shield_absorbed,
            report.burn_damage,
            outcome.vitals.hp,
        );
        if report.extra_life_used {
            tracing::warn!(
                "Extra life consumed at level {} ({} left)",
                active.state.level(),
                outcome.extra_lives
            );
        }

        let Some(mut active) = self.active.take() else {
            return Err(SessionError::NoActiveTrial);
        };
        active.record.actions.push(action);
        active.state = outcome.progress.state().clone();

        let settlement = match outcome.progress.result() {
            None => {
                self.active = Some(active);
                None
            }
            Some(result) => Some(self.conclude(active, result)),
        };

        Ok(SubmitOutcome {
            report: outcome.report,
            progress: outcome.progress,
            settlement,
        })
    }

    /// Walks away from the active trial; it settles with the losing reward.
    pub fn abandon(&mut self) -> Result<Settlement> {
        let active = self.active.take().ok_or(SessionError::NoActiveTrial)?;
        Ok(self.conclude(active, TrialResult::Abandoned))
    }

    /// Damage range of the telegraphed intent under the player's modifiers.
    pub fn preview(&self) -> Option<DamageRange> {
        let state = self.active_state()?;
        Some(self.engine.preview(state, &self.profile.modifiers))
    }

    pub fn available_actions(&self) -> Vec<ActionKind> {
        self.active_state()
            .map(|state| self.engine.available_actions(state, &self.profile.pills))
            .unwrap_or_default()
    }

    pub fn surge_chance(&self) -> Option<f64> {
        let state = self.active_state()?;
        Some(self.engine.surge_chance(state, &self.profile.modifiers))
    }

    fn conclude(&mut self, active: ActiveTrial, result: TrialResult) -> Settlement {
        let ActiveTrial { state, mut record } = active;
        let level = state.level();
        if result == TrialResult::Won {
            self.profile.cleared = self.profile.cleared.max(level);
        }

        let reward = self
            .engine
            .reward(level, result)
            .cloned()
            .unwrap_or_else(RewardDescriptor::new);
        self.settlement.settle(level, result, &reward);

        record.finish(result, &state);
        tracing::info!(
            stage = level,
            %result,
            turns = state.turn(),
            hp = self.profile.vitals.hp,
            digest = %record.digest_hex().unwrap_or_default(),
            "trial concluded"
        );
        self.history.push(record);

        Settlement {
            stage_idx: level,
            result,
            reward,
        }
    }
}

fn log_failure(state: &TrialState, action: &TrialAction, err: &TrialError) {
    if err.is_rejection() {
        tracing::warn!(
            "Rejected {:?} at level {} turn {}: {}",
            action,
            state.level(),
            state.turn(),
            err
        );
    } else {
        tracing::error!("Trial at level {} failed: {}", state.level(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::InMemorySettlement;
    use trial_core::{
        Intent, IntentCatalog, IntentEffect, PillCatalog, PlayerVitals, StageConfig, StageTable,
        TrialConfig,
    };

    fn registry() -> TrialRegistry {
        let intents = IntentCatalog::new(vec![Intent::new(
            "tap",
            "Tap",
            IntentEffect::damage(2, 2),
            0,
            1.0,
        )])
        .unwrap();
        let stages = (1..=12)
            .map(|idx| StageConfig::new(idx, format!("Trial {idx}"), "tier"))
            .collect();
        TrialRegistry::new(
            intents,
            StageTable::new(stages).unwrap(),
            PillCatalog::new(Vec::new()).unwrap(),
            TrialConfig::default(),
        )
    }

    #[test]
    fn cannot_enter_twice_or_submit_idle() {
        let registry = registry();
        let profile = PlayerProfile::new(PlayerVitals::full(50));
        let mut session = TrialSession::new(&registry, profile, 7, InMemorySettlement::new());

        assert_eq!(
            session.submit(TrialAction::Steady).unwrap_err(),
            SessionError::NoActiveTrial
        );
        session.enter_next_trial().unwrap();
        assert_eq!(
            session.enter_next_trial().unwrap_err(),
            SessionError::TrialInProgress { level: 1 }
        );
    }

    #[test]
    fn win_advances_the_cursor() {
        let registry = registry();
        let profile = PlayerProfile::new(PlayerVitals::full(50));
        let mut session = TrialSession::new(&registry, profile, 7, InMemorySettlement::new());

        session.enter_next_trial().unwrap();
        let mut last = None;
        while session.active_state().is_some() {
            last = session.submit(TrialAction::Guard).unwrap().settlement;
        }

        assert_eq!(last.map(|s| s.result), Some(TrialResult::Won));
        assert_eq!(session.profile().cleared, 1);
        assert_eq!(session.cursor(), StageCursor::Next(2));
        // Guard halves 2 to 1 each turn
        assert_eq!(session.profile().vitals.hp, 47);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn abandon_settles_once_and_keeps_the_cursor() {
        let registry = registry();
        let profile = PlayerProfile::new(PlayerVitals::full(50));
        let mut session = TrialSession::new(&registry, profile, 7, InMemorySettlement::new());

        session.enter_next_trial().unwrap();
        let settlement = session.abandon().unwrap();
        assert_eq!(settlement.result, TrialResult::Abandoned);
        assert_eq!(session.abandon().unwrap_err(), SessionError::NoActiveTrial);
        assert_eq!(session.cursor(), StageCursor::Next(1));
        assert_eq!(session.settlement().records().len(), 1);
    }

    #[test]
    fn all_cleared_blocks_entry() {
        let registry = registry();
        let mut profile = PlayerProfile::new(PlayerVitals::full(50));
        profile.cleared = 12;
        let mut session = TrialSession::new(&registry, profile, 7, InMemorySettlement::new());
        assert_eq!(
            session.enter_next_trial().unwrap_err(),
            SessionError::AllStagesCleared
        );
    }

    #[test]
    fn incapacitated_player_cannot_enter() {
        let registry = registry();
        let profile = PlayerProfile::new(PlayerVitals::new(0, 50));
        let mut session = TrialSession::new(&registry, profile, 7, InMemorySettlement::new());
        assert_eq!(
            session.enter_next_trial().unwrap_err(),
            SessionError::Incapacitated
        );
    }
}
