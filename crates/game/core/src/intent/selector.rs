//! Tier-gated weighted intent selection.

use super::{Intent, IntentCatalog, Rarity};
use crate::config::TrialConfig;
use crate::env::{RandomSource, RngError};

/// Draws the intent for a turn at `tier`.
///
/// Only intents with `min_tier <= tier` are eligible; each wins with
/// probability proportional to its weight, walking the catalog in order.
/// Consumes exactly one draw from `rng`.
///
/// # Errors
///
/// Propagates [`RngError`] from the random source.
pub fn roll_intent<'c, R>(
    catalog: &'c IntentCatalog,
    tier: u8,
    rng: &mut R,
) -> Result<&'c Intent, RngError>
where
    R: RandomSource + ?Sized,
{
    roll_intent_boosted(catalog, tier, 0.0, rng)
}

/// Like [`roll_intent`], with rare intent weights scaled by `1 + rarity_boost`.
///
/// A boost of zero (or below) selects exactly as [`roll_intent`] does.
///
/// # Errors
///
/// Propagates [`RngError`] from the random source.
pub fn roll_intent_boosted<'c, R>(
    catalog: &'c IntentCatalog,
    tier: u8,
    rarity_boost: f64,
    rng: &mut R,
) -> Result<&'c Intent, RngError>
where
    R: RandomSource + ?Sized,
{
    let tier = tier.clamp(1, TrialConfig::STAGE_COUNT);
    let draw = rng.next_unit()?;

    let mut eligible: Vec<&Intent> = catalog
        .all()
        .iter()
        .filter(|intent| intent.min_tier <= tier)
        .collect();
    if eligible.is_empty() {
        eligible = catalog.universal().collect();
    }
    // Unreachable with a validated catalog: tier >= 1 always admits the
    // universal intents.
    if eligible.is_empty() {
        return Ok(&catalog.all()[0]);
    }

    let boost = rarity_boost.max(0.0);
    let weight_of = |intent: &Intent| match intent.rarity {
        Rarity::Common => intent.base_weight,
        Rarity::Rare => intent.base_weight * (1.0 + boost),
    };
    let total: f64 = eligible.iter().map(|&intent| weight_of(intent)).sum();

    let mut cumulative = 0.0;
    for &intent in &eligible {
        cumulative += weight_of(intent) / total;
        if cumulative > draw {
            return Ok(intent);
        }
    }

    // Float drift can leave the final share a hair below 1.0.
    Ok(eligible[eligible.len() - 1])
}
