//! Validated, ordered intent table.

use std::collections::HashMap;

use super::{Intent, IntentId};
use crate::error::{ErrorSeverity, GameError};

/// Ordered collection of intent definitions.
///
/// Catalog order is significant: the selector walks cumulative weights in
/// this order. Construction validates the whole table up front so that
/// lookups and draws never have to.
#[derive(Clone, Debug)]
pub struct IntentCatalog {
    intents: Vec<Intent>,
    index: HashMap<IntentId, usize>,
}

impl IntentCatalog {
    /// Builds a catalog from content data.
    ///
    /// # Errors
    ///
    /// Fails if the table is empty, an id repeats, a damage range or weight is
    /// invalid, a penetration exceeds 100%, a debuff has zero stacks, or no
    /// intent is eligible at every tier (`min_tier == 0`).
    pub fn new(intents: Vec<Intent>) -> Result<Self, CatalogError> {
        if intents.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index = HashMap::with_capacity(intents.len());
        for (position, intent) in intents.iter().enumerate() {
            validate_intent(intent)?;
            if index.insert(intent.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateId(intent.id.clone()));
            }
        }

        if !intents.iter().any(Intent::is_universal) {
            return Err(CatalogError::NoUniversalIntent);
        }

        Ok(Self { intents, index })
    }

    /// All intents in catalog order.
    pub fn all(&self) -> &[Intent] {
        &self.intents
    }

    pub fn get(&self, id: &IntentId) -> Option<&Intent> {
        self.index.get(id).map(|&position| &self.intents[position])
    }

    pub fn len(&self) -> usize {
        self.intents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Intents with `min_tier == 0`.
    pub fn universal(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter().filter(|intent| intent.is_universal())
    }
}

fn validate_intent(intent: &Intent) -> Result<(), CatalogError> {
    let effect = &intent.effect;
    if effect.base_damage_min == 0 || effect.base_damage_min > effect.base_damage_max {
        return Err(CatalogError::InvalidDamageRange {
            id: intent.id.clone(),
            min: effect.base_damage_min,
            max: effect.base_damage_max,
        });
    }
    if !intent.base_weight.is_finite() || intent.base_weight <= 0.0 {
        return Err(CatalogError::InvalidWeight {
            id: intent.id.clone(),
            weight: intent.base_weight,
        });
    }
    if effect.shield_penetration > 100 {
        return Err(CatalogError::InvalidPenetration {
            id: intent.id.clone(),
            percent: effect.shield_penetration,
        });
    }
    if effect.add_debuff.is_some_and(|debuff| debuff.stacks == 0) {
        return Err(CatalogError::EmptyDebuff(intent.id.clone()));
    }
    Ok(())
}

/// Content errors detected while building an [`IntentCatalog`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("intent catalog is empty")]
    Empty,

    #[error("intent '{0}' is defined more than once")]
    DuplicateId(IntentId),

    #[error("intent '{id}' has invalid damage range [{min}, {max}]")]
    InvalidDamageRange { id: IntentId, min: u32, max: u32 },

    #[error("intent '{id}' has non-positive weight {weight}")]
    InvalidWeight { id: IntentId, weight: f64 },

    #[error("intent '{id}' has shield penetration {percent}% (max 100)")]
    InvalidPenetration { id: IntentId, percent: u8 },

    #[error("intent '{0}' applies a debuff with zero stacks")]
    EmptyDebuff(IntentId),

    #[error("intent catalog has no universal intent (min_tier = 0)")]
    NoUniversalIntent,
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use CatalogError::*;
        match self {
            Empty => "CATALOG_EMPTY",
            DuplicateId(_) => "CATALOG_DUPLICATE_ID",
            InvalidDamageRange { .. } => "CATALOG_INVALID_DAMAGE_RANGE",
            InvalidWeight { .. } => "CATALOG_INVALID_WEIGHT",
            InvalidPenetration { .. } => "CATALOG_INVALID_PENETRATION",
            EmptyDebuff(_) => "CATALOG_EMPTY_DEBUFF",
            NoUniversalIntent => "CATALOG_NO_UNIVERSAL_INTENT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{DebuffKind, IntentEffect};

    fn strike(id: &str, min_tier: u8) -> Intent {
        Intent::new(id, id, IntentEffect::damage(8, 14), min_tier, 1.0)
    }

    #[test]
    fn looks_up_intents_by_id() {
        let catalog = IntentCatalog::new(vec![strike("a", 0), strike("b", 3)]).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(&IntentId::new("b")).map(|i| i.min_tier), Some(3));
        assert!(catalog.get(&IntentId::new("zzz")).is_none());
        assert_eq!(catalog.all()[0].id.as_str(), "a");
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(IntentCatalog::new(vec![]), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_inverted_damage_range() {
        let mut intent = strike("bad", 0);
        intent.effect.base_damage_min = 20;
        let err = IntentCatalog::new(vec![intent]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidDamageRange { min: 20, max: 14, .. }));
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn rejects_non_positive_weight() {
        let mut intent = strike("weightless", 0);
        intent.base_weight = 0.0;
        assert!(matches!(
            IntentCatalog::new(vec![intent]),
            Err(CatalogError::InvalidWeight { .. })
        ));
    }

    #[test]
    fn rejects_zero_stack_debuff() {
        let mut intent = strike("fizzle", 0);
        intent.effect = intent.effect.with_debuff(DebuffKind::Burn, 0);
        assert!(matches!(
            IntentCatalog::new(vec![intent]),
            Err(CatalogError::EmptyDebuff(_))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        assert!(matches!(
            IntentCatalog::new(vec![strike("a", 0), strike("a", 1)]),
            Err(CatalogError::DuplicateId(_))
        ));
    }

    #[test]
    fn requires_a_universal_intent() {
        assert_eq!(
            IntentCatalog::new(vec![strike("late", 4)]).unwrap_err(),
            CatalogError::NoUniversalIntent
        );
    }
}
