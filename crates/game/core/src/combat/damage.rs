//! Damage calculation and application.

use crate::intent::Intent;

/// Effective damage bounds of an intent under the current modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
    pub expected: u32,
}

/// Combined multiplier from a damage multiplier and a percentage reduction.
///
/// ```text
/// effective = damage_mult * (1 - clamp(reduction_percent, 0, 100) / 100)
/// ```
pub fn effective_multiplier(damage_mult: f64, reduction_percent: f64) -> f64 {
    let reduction = reduction_percent.clamp(0.0, 100.0);
    damage_mult.max(0.0) * (1.0 - reduction / 100.0)
}

/// Computes the damage range an intent deals before any action mitigation.
///
/// # Formula
///
/// ```text
/// min      = max(1, round(base_damage_min * effective))
/// max      = max(1, round(base_damage_max * effective))
/// expected = round((min + max) / 2)
/// ```
///
/// Used both for the preview shown before the player picks an action and
/// for resolution once the damage roll is known. Values past `u32::MAX`
/// saturate.
pub fn compute_damage(intent: &Intent, damage_mult: f64, reduction_percent: f64) -> DamageRange {
    let effective = effective_multiplier(damage_mult, reduction_percent);
    let min = scale_rolled(intent.effect.base_damage_min, effective);
    let max = scale_rolled(intent.effect.base_damage_max, effective);
    let expected = round_to_u32((f64::from(min) + f64::from(max)) / 2.0);

    DamageRange { min, max, expected }
}

/// Maps a uniform `[0, 1)` draw onto an integer in `[base_damage_min, base_damage_max]`.
pub fn roll_base_damage(intent: &Intent, draw: f64) -> u32 {
    let min = intent.effect.base_damage_min;
    let max = intent.effect.base_damage_max;
    let span = f64::from(max - min + 1);
    let offset = (draw.clamp(0.0, 1.0) * span).floor() as u32;
    (min + offset).min(max)
}

/// Scales a rolled value by the effective multiplier, never below 1.
pub fn scale_rolled(rolled: u32, effective: f64) -> u32 {
    round_to_u32(f64::from(rolled) * effective).max(1)
}

/// Applies an action multiplier (Steady, Guard, failed Surge) to a hit.
pub fn mitigate(hit: u32, multiplier: f64) -> u32 {
    round_to_u32(f64::from(hit) * multiplier)
}

/// Apply damage to current HP, clamped at 0.
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

/// Rounds half away from zero; negative inputs clamp to 0 and values past
/// `u32::MAX` saturate.
pub(crate) fn round_to_u32(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::IntentEffect;

    fn intent(min: u32, max: u32) -> Intent {
        Intent::new("test", "Test", IntentEffect::damage(min, max), 0, 1.0)
    }

    #[test]
    fn neutral_modifiers_keep_base_range() {
        let range = compute_damage(&intent(8, 14), 1.0, 0.0);
        assert_eq!(range, DamageRange { min: 8, max: 14, expected: 11 });
    }

    #[test]
    fn multiplier_and_reduction_compose() {
        // 1.5 * (1 - 0.2) = 1.2
        let range = compute_damage(&intent(10, 20), 1.5, 20.0);
        assert_eq!(range, DamageRange { min: 12, max: 24, expected: 18 });
    }

    #[test]
    fn full_reduction_still_deals_one() {
        let range = compute_damage(&intent(5, 9), 1.0, 100.0);
        assert_eq!(range, DamageRange { min: 1, max: 1, expected: 1 });
    }

    #[test]
    fn reduction_is_clamped() {
        assert_eq!(
            compute_damage(&intent(10, 10), 1.0, 250.0),
            compute_damage(&intent(10, 10), 1.0, 100.0)
        );
        assert_eq!(
            compute_damage(&intent(10, 10), 1.0, -40.0),
            compute_damage(&intent(10, 10), 1.0, 0.0)
        );
    }

    #[test]
    fn expected_rounds_half_up() {
        // (8 + 13) / 2 = 10.5
        assert_eq!(compute_damage(&intent(8, 13), 1.0, 0.0).expected, 11);
    }

    #[test]
    fn huge_damage_saturates() {
        let range = compute_damage(&intent(3_000_000_000, 3_000_000_000), 1.0, 0.0);
        assert_eq!(range.expected, 3_000_000_000);

        let range = compute_damage(&intent(10, 10), 1e12, 0.0);
        assert_eq!(range, DamageRange { min: u32::MAX, max: u32::MAX, expected: u32::MAX });
    }

    #[test]
    fn rolls_cover_the_inclusive_range() {
        let intent = intent(8, 14);
        assert_eq!(roll_base_damage(&intent, 0.0), 8);
        assert_eq!(roll_base_damage(&intent, 0.5), 11);
        assert_eq!(roll_base_damage(&intent, 0.999_999), 14);
    }

    #[test]
    fn fixed_range_always_rolls_its_value() {
        let intent = intent(10, 10);
        for draw in [0.0, 0.3, 0.9999] {
            assert_eq!(roll_base_damage(&intent, draw), 10);
        }
    }

    #[test]
    fn mitigation_rounds_to_nearest() {
        assert_eq!(mitigate(10, 0.5), 5);
        assert_eq!(mitigate(10, 0.75), 8);
        assert_eq!(mitigate(9, 0.75), 7);
        assert_eq!(mitigate(10, 1.4), 14);
    }

    #[test]
    fn apply_damage_saturates() {
        assert_eq!(apply_damage(5, 10), 0);
        assert_eq!(apply_damage(50, 10), 40);
    }
}
