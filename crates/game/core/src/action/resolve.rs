//! Per-turn resolution of a player action against the current intent.
//!
//! # Order
//!
//! ```text
//! validate      -> reject before any draw
//! damage roll   -> one draw in [base_damage_min, base_damage_max]
//! surge check   -> one extra draw, Surge only
//! action effect -> stack clear / pill / wrath relief / chaos
//! mitigation    -> modifiers, then action multiplier
//! shield        -> penetration skips it, remainder absorbed first
//! intent debuff -> add_debuff stacks
//! burn          -> min(2, burn) flat damage
//! verdict       -> extra life, lose, win or continue
//! ```
//!
//! Weak stacks present at the start of a turn wear off by one at its end;
//! stacks added during the turn apply to the next one.

use super::{ActionError, ActionKind, TrialAction};
use crate::combat::{apply_damage, effective_multiplier, mitigate, roll_base_damage, scale_rolled};
use crate::combat::damage::round_to_u32;
use crate::config::TrialConfig;
use crate::env::{PillEffect, PillOracle, RandomSource};
use crate::intent::DebuffKind;
use crate::state::{Modifiers, PillRef, PlayerVitals, TrialState, TurnContext};

/// Pill consumed by an action and the stack count left afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillUse {
    pub pill: PillRef,
    pub remaining: u32,
}

/// Numbers behind one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnReport {
    pub action: ActionKind,
    /// Damage rolled from the intent's base range.
    pub rolled: u32,
    /// Hit after modifiers and the action multiplier.
    pub hit: u32,
    pub shield_absorbed: u32,
    /// Main-hit damage that reached hp.
    pub hp_damage: u32,
    pub burn_damage: u32,
    pub healed: u32,
    pub shield_gained: u32,
    /// Outcome of the surge check, `None` for other actions.
    pub surge_succeeded: Option<bool>,
    pub extra_life_used: bool,
}

impl TurnReport {
    /// Total hp lost this turn before any extra life kicks in.
    pub fn hp_loss(&self) -> u32 {
        self.hp_damage.saturating_add(self.burn_damage)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Continue,
    Won,
    Lost,
}

/// Result of resolving one action. The engine draws the next intent when
/// the verdict is [`Verdict::Continue`].
#[derive(Clone, Debug)]
pub(crate) struct Resolution {
    pub state: TrialState,
    pub vitals: PlayerVitals,
    pub extra_lives: u32,
    pub pill_use: Option<PillUse>,
    pub verdict: Verdict,
    pub report: TurnReport,
}

/// Checks an action against the current state without touching randomness.
pub(crate) fn validate_action(
    state: &TrialState,
    ctx: &TurnContext<'_>,
    action: &TrialAction,
    pills: &(impl PillOracle + ?Sized),
) -> Result<(), ActionError> {
    if state.is_complete() {
        return Err(ActionError::TrialConcluded);
    }
    match action {
        TrialAction::Surge if state.debuffs.weak > 0 => Err(ActionError::SurgeLocked {
            weak: state.debuffs.weak,
        }),
        TrialAction::Pill(pill) => {
            if !ctx.inventory.has(pill) {
                return Err(ActionError::PillUnavailable(pill.clone()));
            }
            if pills.definition(&pill.id).is_none() {
                return Err(ActionError::UnknownPill(pill.id.clone()));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Surge success probability for a trial state and modifiers.
pub(crate) fn surge_chance(state: &TrialState, modifiers: &Modifiers) -> f64 {
    let chance = TrialConfig::SURGE_BASE_CHANCE
        - TrialConfig::SURGE_LEVEL_PENALTY * f64::from(state.level)
        - TrialConfig::SURGE_CHAOS_PENALTY * f64::from(state.debuffs.mind_chaos)
        + modifiers.surge_rate_add;
    chance.clamp(TrialConfig::SURGE_MIN_CHANCE, TrialConfig::SURGE_MAX_CHANCE)
}

/// Resolves `action` against `state`. `ctx.modifiers.damage_mult` must
/// already include the stage multiplier.
pub(crate) fn resolve_action<R>(
    state: &TrialState,
    ctx: &TurnContext<'_>,
    action: &TrialAction,
    pills: &(impl PillOracle + ?Sized),
    rng: &mut R,
) -> Result<Resolution, ActionError>
where
    R: RandomSource + ?Sized,
{
    validate_action(state, ctx, action, pills)?;

    let intent = &state.current_intent;
    let rolled = roll_base_damage(intent, rng.next_unit()?);
    let surge_succeeded = match action {
        TrialAction::Surge => Some(rng.next_unit()? < surge_chance(state, &ctx.modifiers)),
        _ => None,
    };

    let mut next = state.clone();
    let mut vitals = ctx.vitals;
    let mut pill_use = None;
    let mut healed = 0;
    let mut shield_gained = 0;

    next.debuffs.weak = state.debuffs.weak.saturating_sub(1);

    let action_mult = match action {
        TrialAction::Steady => {
            let kind = if next.debuffs.mind_chaos > 0 {
                DebuffKind::MindChaos
            } else {
                DebuffKind::Burn
            };
            next.debuffs = next.debuffs.removed(kind, 1);
            TrialConfig::STEADY_MULTIPLIER
        }
        TrialAction::Pill(pill) => {
            let definition = pills
                .definition(&pill.id)
                .ok_or_else(|| ActionError::UnknownPill(pill.id.clone()))?;
            match definition.effect {
                PillEffect::Heal(base) if !intent.effect.block_heal => {
                    let before = vitals.hp;
                    vitals = vitals.healed(pill.quality.scale(base));
                    healed = vitals.hp - before;
                }
                PillEffect::Heal(_) => {}
                PillEffect::Shield(base) => {
                    shield_gained = pill.quality.scale(base);
                    next.shield = next.shield.saturating_add(shield_gained);
                }
                PillEffect::Cleanse => {
                    next.debuffs = next
                        .debuffs
                        .cleared(DebuffKind::MindChaos)
                        .cleared(DebuffKind::Burn);
                }
            }
            pill_use = Some(PillUse {
                pill: pill.clone(),
                remaining: ctx.inventory.count(pill).saturating_sub(1),
            });
            1.0
        }
        TrialAction::Guard => {
            next.debuffs = next.debuffs.added(DebuffKind::Weak, 1);
            TrialConfig::GUARD_MULTIPLIER
        }
        TrialAction::Surge => {
            if surge_succeeded == Some(true) {
                next.wrath = next.wrath.saturating_sub(TrialConfig::SURGE_WRATH_RELIEF);
                1.0
            } else {
                next.debuffs = next.debuffs.added(DebuffKind::MindChaos, 1);
                TrialConfig::SURGE_FAILURE_MULTIPLIER
            }
        }
    };

    let effective = effective_multiplier(
        ctx.modifiers.damage_mult,
        ctx.modifiers.damage_reduction_percent,
    );
    let hit = mitigate(scale_rolled(rolled, effective), action_mult);

    let penetration = f64::from(intent.effect.shield_penetration.min(100)) / 100.0;
    let piercing = round_to_u32(f64::from(hit) * penetration).min(hit);
    let absorbable = hit - piercing;
    let shield_absorbed = next.shield.min(absorbable);
    next.shield -= shield_absorbed;
    let hp_damage = piercing + (absorbable - shield_absorbed);

    if let Some(debuff) = intent.effect.add_debuff {
        next.debuffs = next.debuffs.added(debuff.key, debuff.stacks);
    }

    let burn_damage = u32::from(next.debuffs.burn.min(TrialConfig::BURN_DAMAGE_CAP));
    vitals.hp = apply_damage(apply_damage(vitals.hp, hp_damage), burn_damage);

    let mut extra_lives = ctx.extra_lives;
    let mut extra_life_used = false;
    let completed = state.turn + 1;
    let verdict = if vitals.hp == 0 && extra_lives == 0 {
        Verdict::Lost
    } else {
        if vitals.hp == 0 {
            extra_lives -= 1;
            extra_life_used = true;
            vitals.hp = 1;
        }
        if completed >= state.total_turns {
            Verdict::Won
        } else {
            Verdict::Continue
        }
    };
    next.turn = completed;

    let report = TurnReport {
        action: action.kind(),
        rolled,
        hit,
        shield_absorbed,
        hp_damage,
        burn_damage,
        healed,
        shield_gained,
        surge_succeeded,
        extra_life_used,
    };
    next.log = next.log.appended(summarize(state, &report, vitals));

    Ok(Resolution {
        state: next,
        vitals,
        extra_lives,
        pill_use,
        verdict,
        report,
    })
}

fn summarize(state: &TrialState, report: &TurnReport, vitals: PlayerVitals) -> String {
    let mut line = format!(
        "Turn {}/{}: {} met with {}, hit {} (shield {}), burn {}",
        state.turn + 1,
        state.total_turns,
        state.current_intent.name,
        report.action,
        report.hit,
        report.shield_absorbed,
        report.burn_damage,
    );
    match report.surge_succeeded {
        Some(true) => line.push_str(", surge held"),
        Some(false) => line.push_str(", surge backfired"),
        None => {}
    }
    if report.healed > 0 {
        line.push_str(&format!(", healed {}", report.healed));
    }
    if report.shield_gained > 0 {
        line.push_str(&format!(", shield +{}", report.shield_gained));
    }
    if report.extra_life_used {
        line.push_str(", extra life spent");
    }
    line.push_str(&format!(", hp {}/{}", vitals.hp, vitals.max_hp));
    line
}
