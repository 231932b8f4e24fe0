//! Player-side inputs read by the engine on every turn.
//!
//! These values belong to the surrounding game session. The engine reads them
//! through [`TurnContext`] and reports the updated values in its outcome; it
//! never keeps them.

use std::collections::BTreeMap;

use crate::env::{PillId, PillQuality};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerVitals {
    pub hp: u32,
    pub max_hp: u32,
}

impl PlayerVitals {
    /// Creates vitals with `hp` clamped to `max_hp`.
    pub fn new(hp: u32, max_hp: u32) -> Self {
        Self {
            hp: hp.min(max_hp),
            max_hp,
        }
    }

    pub const fn full(max_hp: u32) -> Self {
        Self { hp: max_hp, max_hp }
    }

    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restores up to `amount` hp without exceeding max hp.
    #[must_use]
    pub fn healed(self, amount: u32) -> Self {
        Self {
            hp: self.hp.saturating_add(amount).min(self.max_hp),
            ..self
        }
    }
}

/// Equipment and run-level modifiers that shape incoming damage.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Modifiers {
    /// Multiplier on all incoming damage.
    pub damage_mult: f64,
    /// Added to surge success probability before clamping.
    pub surge_rate_add: f64,
    /// Percentage (0-100) shaved off incoming damage.
    pub damage_reduction_percent: f64,
}

impl Modifiers {
    pub const NEUTRAL: Self = Self {
        damage_mult: 1.0,
        surge_rate_add: 0.0,
        damage_reduction_percent: 0.0,
    };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// A specific pill stack: definition id plus brewed quality.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillRef {
    pub id: PillId,
    pub quality: PillQuality,
}

impl PillRef {
    pub fn new(id: impl Into<String>, quality: PillQuality) -> Self {
        Self {
            id: PillId::new(id),
            quality,
        }
    }
}

impl core::fmt::Display for PillRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} ({})", self.id, self.quality)
    }
}

/// Counts of pills the player carries, keyed by id and quality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillInventory {
    stacks: BTreeMap<PillRef, u32>,
}

impl PillInventory {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, pill: PillRef, count: u32) -> Self {
        self.add(pill, count);
        self
    }

    pub fn add(&mut self, pill: PillRef, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.stacks.entry(pill).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn count(&self, pill: &PillRef) -> u32 {
        self.stacks.get(pill).copied().unwrap_or(0)
    }

    pub fn has(&self, pill: &PillRef) -> bool {
        self.count(pill) > 0
    }

    /// Sets the count of a stack, removing it at zero.
    pub fn set(&mut self, pill: PillRef, count: u32) {
        if count == 0 {
            self.stacks.remove(&pill);
        } else {
            self.stacks.insert(pill, count);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PillRef, u32)> {
        self.stacks.iter().map(|(pill, &count)| (pill, count))
    }
}

/// Everything the engine reads from the session for one action.
#[derive(Clone, Copy, Debug)]
pub struct TurnContext<'a> {
    pub vitals: PlayerVitals,
    pub modifiers: Modifiers,
    pub extra_lives: u32,
    pub inventory: &'a PillInventory,
}

impl<'a> TurnContext<'a> {
    pub fn new(vitals: PlayerVitals, inventory: &'a PillInventory) -> Self {
        Self {
            vitals,
            modifiers: Modifiers::NEUTRAL,
            extra_lives: 0,
            inventory,
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_clamp_and_heal_to_max() {
        let vitals = PlayerVitals::new(250, 200);
        assert_eq!(vitals.hp, 200);
        assert_eq!(PlayerVitals::new(150, 200).healed(80).hp, 200);
        assert_eq!(PlayerVitals::new(150, 200).healed(20).hp, 170);
    }

    #[test]
    fn inventory_tracks_stacks_by_quality() {
        let fine = PillRef::new("qi_pill", PillQuality::Fine);
        let perfect = PillRef::new("qi_pill", PillQuality::Perfect);
        let mut inventory = PillInventory::new().with(fine.clone(), 2);

        assert_eq!(inventory.count(&fine), 2);
        assert!(!inventory.has(&perfect));

        inventory.set(fine.clone(), 0);
        assert_eq!(inventory.count(&fine), 0);
        assert_eq!(inventory.iter().count(), 0);
    }
}
