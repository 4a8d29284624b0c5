use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::Combatant;
use crate::weapon::roll_damage;
use crate::Dice;

pub const ENEMY_SPECIAL_CHANCE: f64 = 0.3;
pub const BOSS_CHANCE_PER_PHASE: f64 = 0.2;
/// Enemies only heal below this fraction of their max health.
const HEAL_BELOW_FRACTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialAbility {
    PowerAttack,
    Heal,
    UltimateAttack,
    SummonMinion,
}

impl SpecialAbility {
    pub fn for_enemy_level(level: u32) -> Vec<SpecialAbility> {
        let mut out = Vec::new();
        if level >= 3 {
            out.push(SpecialAbility::PowerAttack);
        }
        if level >= 5 {
            out.push(SpecialAbility::Heal);
        }
        out
    }

    /// First boss phase in which this ability may fire.
    pub fn min_phase(self) -> u32 {
        match self {
            SpecialAbility::UltimateAttack => 2,
            SpecialAbility::SummonMinion => 3,
            _ => 1,
        }
    }
}

impl fmt::Display for SpecialAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpecialAbility::PowerAttack => "POWER ATTACK",
            SpecialAbility::Heal => "HEAL",
            SpecialAbility::UltimateAttack => "ULTIMATE ATTACK",
            SpecialAbility::SummonMinion => "SUMMON MINION",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpecialOutcome {
    Damage {
        ability: SpecialAbility,
        target: String,
        amount: i32,
        defeated: bool,
    },
    Heal {
        ability: SpecialAbility,
        amount: i32,
    },
    /// The orchestrator should add a minion to the roster.
    Summon,
}

/// 0.3 for regular enemies; bosses gain 0.2 per phase beyond the first.
pub fn special_trigger_chance(actor: &Combatant) -> f64 {
    match &actor.phase {
        Some(p) => {
            ENEMY_SPECIAL_CHANCE + BOSS_CHANCE_PER_PHASE * f64::from(p.phase.saturating_sub(1))
        }
        None => ENEMY_SPECIAL_CHANCE,
    }
}

/// One stochastic special-ability attempt. `None` means nothing fired and the
/// actor should fall back to a basic attack.
///
/// A boss whose pick is still locked in its current phase gets one regular
/// attempt (0.3 trigger) over the abilities its phase already allows.
pub fn try_special_ability(
    actor: &mut Combatant,
    hero: &mut Combatant,
    dice: &mut Dice,
) -> Option<SpecialOutcome> {
    if actor.specials.is_empty() {
        return None;
    }
    if !dice.chance(special_trigger_chance(actor)) {
        return None;
    }
    let ability = actor.specials[dice.pick(actor.specials.len())];
    let phase = actor.phase.as_ref().map_or(1, |p| p.phase);
    if phase < ability.min_phase() {
        debug!(actor = %actor.name, %ability, phase, "special locked in this phase");
        return regular_fallback(actor, hero, phase, dice);
    }
    fire(actor, hero, ability, dice)
}

fn regular_fallback(
    actor: &mut Combatant,
    hero: &mut Combatant,
    phase: u32,
    dice: &mut Dice,
) -> Option<SpecialOutcome> {
    let unlocked: Vec<SpecialAbility> =
        actor.specials.iter().copied().filter(|a| a.min_phase() <= phase).collect();
    if unlocked.is_empty() || !dice.chance(ENEMY_SPECIAL_CHANCE) {
        return None;
    }
    let ability = unlocked[dice.pick(unlocked.len())];
    fire(actor, hero, ability, dice)
}

fn fire(
    actor: &mut Combatant,
    hero: &mut Combatant,
    ability: SpecialAbility,
    dice: &mut Dice,
) -> Option<SpecialOutcome> {
    let outcome = match ability {
        SpecialAbility::PowerAttack => scaled_strike(actor, hero, ability, 1.5, dice),
        SpecialAbility::UltimateAttack => scaled_strike(actor, hero, ability, 2.5, dice),
        SpecialAbility::Heal => {
            if actor.health.fraction() >= HEAL_BELOW_FRACTION {
                return None;
            }
            let amount = actor.health.heal(actor.health.max_hp / 5);
            SpecialOutcome::Heal { ability, amount }
        }
        SpecialAbility::SummonMinion => SpecialOutcome::Summon,
    };
    debug!(actor = %actor.name, %ability, "special fired");
    Some(outcome)
}

fn scaled_strike(
    actor: &Combatant,
    hero: &mut Combatant,
    ability: SpecialAbility,
    factor: f64,
    dice: &mut Dice,
) -> SpecialOutcome {
    let amount = (f64::from(roll_damage(dice, &actor.weapon)) * factor).floor() as i32;
    hero.health.apply_damage(amount);
    SpecialOutcome::Damage {
        ability,
        target: hero.name.clone(),
        amount,
        defeated: !hero.is_alive(),
    }
}
