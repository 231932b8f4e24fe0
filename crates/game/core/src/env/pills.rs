use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};

/// Identifier of a pill definition in the alchemy catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PillId(pub String);

impl PillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PillId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Quality tier of a brewed pill. Higher tiers scale the effect magnitude.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PillQuality {
    Common,
    Fine,
    Superior,
    Perfect,
}

impl PillQuality {
    /// Multiplier applied to a pill's base magnitude.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Common => 1.0,
            Self::Fine => 1.25,
            Self::Superior => 1.5,
            Self::Perfect => 2.0,
        }
    }

    /// Scales `base` by this quality, rounding to the nearest integer.
    pub fn scale(self, base: u32) -> u32 {
        (f64::from(base) * self.multiplier()).round() as u32
    }
}

/// Effect a pill has when taken during a trial.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PillEffect {
    /// Restore hit points, capped at max hp.
    Heal(u32),
    /// Add to the trial shield.
    Shield(u32),
    /// Remove every mind chaos and burn stack.
    Cleanse,
}

/// Declared configuration of a pill, owned by the external alchemy system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillDefinition {
    pub id: PillId,
    pub name: String,
    pub effect: PillEffect,
}

/// Read-only lookup of pill effect configuration.
pub trait PillOracle: Send + Sync {
    fn definition(&self, id: &PillId) -> Option<&PillDefinition>;
}

/// Pill definitions keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PillCatalog {
    definitions: BTreeMap<PillId, PillDefinition>,
}

impl PillCatalog {
    /// Builds a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`PillCatalogError::DuplicateId`] when two definitions share an id.
    pub fn new(definitions: Vec<PillDefinition>) -> Result<Self, PillCatalogError> {
        let mut map = BTreeMap::new();
        for definition in definitions {
            let id = definition.id.clone();
            if map.insert(id.clone(), definition).is_some() {
                return Err(PillCatalogError::DuplicateId(id));
            }
        }
        Ok(Self { definitions: map })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PillDefinition> {
        self.definitions.values()
    }
}

impl PillOracle for PillCatalog {
    fn definition(&self, id: &PillId) -> Option<&PillDefinition> {
        self.definitions.get(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PillCatalogError {
    #[error("pill '{0}' is defined more than once")]
    DuplicateId(PillId),
}

impl GameError for PillCatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "PILL_DUPLICATE_ID",
        }
    }
}
