//! Opponent intents: the attacks a trial can throw at the player.
//!
//! - [`catalog`] holds the validated, ordered intent table
//! - [`selector`] draws the intent for the upcoming turn

pub mod catalog;
pub mod selector;

pub use catalog::{CatalogError, IntentCatalog};
pub use selector::{roll_intent, roll_intent_boosted};

/// Stable identifier of an intent in the content table.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct IntentId(pub String);

impl IntentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for IntentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rarity {
    Common,
    Rare,
}

/// Stacking debuffs tracked for the duration of a trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebuffKind {
    /// Lowers surge success chance.
    MindChaos,
    /// Flat damage every turn, capped per turn.
    Burn,
    /// Locks surge while present.
    Weak,
}

/// Debuff an intent inflicts when it lands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebuffApplication {
    pub key: DebuffKind,
    pub stacks: u8,
}

/// Mechanical payload of an intent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntentEffect {
    pub base_damage_min: u32,
    pub base_damage_max: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub add_debuff: Option<DebuffApplication>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block_heal: bool,
    /// Percent (0-100) of the hit that bypasses the shield.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shield_penetration: u8,
}

impl IntentEffect {
    pub const fn damage(base_damage_min: u32, base_damage_max: u32) -> Self {
        Self {
            base_damage_min,
            base_damage_max,
            add_debuff: None,
            block_heal: false,
            shield_penetration: 0,
        }
    }

    #[must_use]
    pub const fn with_debuff(mut self, key: DebuffKind, stacks: u8) -> Self {
        self.add_debuff = Some(DebuffApplication { key, stacks });
        self
    }

    #[must_use]
    pub const fn with_block_heal(mut self) -> Self {
        self.block_heal = true;
        self
    }

    #[must_use]
    pub const fn with_shield_penetration(mut self, percent: u8) -> Self {
        self.shield_penetration = percent;
        self
    }
}

/// One possible incoming attack for a turn.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intent {
    pub id: IntentId,
    pub name: String,
    pub rarity: Rarity,
    pub effect: IntentEffect,
    /// Display-only warning shown before the player picks an action.
    #[cfg_attr(feature = "serde", serde(default))]
    pub telegraph_text: String,
    /// Display-only hint suggesting a response.
    #[cfg_attr(feature = "serde", serde(default))]
    pub counter_hint: String,
    /// Lowest stage index at which this intent may be drawn.
    pub min_tier: u8,
    /// Relative selection weight among eligible intents.
    pub base_weight: f64,
}

impl Intent {
    /// Creates a common intent with no opaque display text.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        effect: IntentEffect,
        min_tier: u8,
        base_weight: f64,
    ) -> Self {
        Self {
            id: IntentId::new(id),
            name: name.into(),
            rarity: Rarity::Common,
            effect,
            telegraph_text: String::new(),
            counter_hint: String::new(),
            min_tier,
            base_weight,
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_text(mut self, telegraph: impl Into<String>, hint: impl Into<String>) -> Self {
        self.telegraph_text = telegraph.into();
        self.counter_hint = hint.into();
        self
    }

    pub fn is_universal(&self) -> bool {
        self.min_tier == 0
    }
}
