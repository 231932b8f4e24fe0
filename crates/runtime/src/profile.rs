//! Player data carried between trials.

use serde::{Deserialize, Serialize};
use trial_core::{Modifiers, PillInventory, PlayerVitals, TurnContext, TurnOutcome};

/// Run-level player state the engine reads each turn and the session writes
/// back afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub vitals: PlayerVitals,
    pub modifiers: Modifiers,
    pub extra_lives: u32,
    pub pills: PillInventory,
    /// Stages cleared so far, 0..=12.
    pub cleared: u8,
}

impl PlayerProfile {
    pub fn new(vitals: PlayerVitals) -> Self {
        Self {
            vitals,
            modifiers: Modifiers::NEUTRAL,
            extra_lives: 0,
            pills: PillInventory::new(),
            cleared: 0,
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub fn with_extra_lives(mut self, extra_lives: u32) -> Self {
        self.extra_lives = extra_lives;
        self
    }

    #[must_use]
    pub fn with_pills(mut self, pills: PillInventory) -> Self {
        self.pills = pills;
        self
    }

    pub fn turn_context(&self) -> TurnContext<'_> {
        TurnContext::new(self.vitals, &self.pills)
            .with_modifiers(self.modifiers)
            .with_extra_lives(self.extra_lives)
    }

    /// Writes the player-side results of an accepted action back.
    pub fn apply(&mut self, outcome: &TurnOutcome) {
        self.vitals = outcome.vitals;
        self.extra_lives = outcome.extra_lives;
        if let Some(used) = &outcome.pill_use {
            self.pills.set(used.pill.clone(), used.remaining);
        }
    }
}
