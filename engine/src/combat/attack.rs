use serde::Serialize;
use tracing::debug;

use crate::combatant::Combatant;
use crate::stats::Stat;
use crate::status::{install, StatusKind};
use crate::weapon::{roll_damage, roll_special_effect};
use crate::Dice;

pub const CRIT_CHANCE: f64 = 0.10;
pub const CRIT_MULTIPLIER: f64 = 1.5;
pub const BASE_DODGE: f64 = 0.05;
pub const DODGE_PER_SPEED: f64 = 0.01;
pub const MAX_DODGE: f64 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackResult {
    pub damage: i32,
    pub is_critical: bool,
    pub dodged: bool,
    pub effect_applied: Option<StatusKind>,
    pub target_defeated: bool,
}

/// Baseline 5%, +1% per point of speed the target holds over the attacker,
/// kept inside `[0, 0.25]`.
pub fn dodge_chance(attacker: &Combatant, target: &Combatant) -> f64 {
    let delta = f64::from(target.combat_speed() - attacker.combat_speed());
    (BASE_DODGE + DODGE_PER_SPEED * delta).clamp(0.0, MAX_DODGE)
}

/// Resolve one basic attack. Draw order: damage roll, crit, dodge, effect.
pub fn resolve_attack(
    attacker: &Combatant,
    target: &mut Combatant,
    dice: &mut Dice,
) -> AttackResult {
    let base = roll_damage(dice, &attacker.weapon);
    let bonus = attacker.effective(Stat::Strength).max(0) / 2;
    let mut total = base + bonus;

    let is_critical = dice.chance(CRIT_CHANCE);
    if is_critical {
        total = (f64::from(total) * CRIT_MULTIPLIER).floor() as i32;
    }

    if dice.chance(dodge_chance(attacker, target)) {
        debug!(attacker = %attacker.name, defender = %target.name, "dodged");
        return AttackResult {
            damage: 0,
            is_critical,
            dodged: true,
            effect_applied: None,
            target_defeated: false,
        };
    }

    let reduction = target.effective(Stat::Defense).max(0) / 3;
    let damage = (total - reduction).max(1);
    target.health.apply_damage(damage);

    let mut effect_applied = None;
    if target.is_alive() {
        if let Some(kind) = roll_special_effect(dice, &attacker.weapon) {
            install(&mut target.statuses, kind, damage);
            effect_applied = Some(kind);
        }
    }

    debug!(
        attacker = %attacker.name,
        defender = %target.name,
        damage,
        crit = is_critical,
        hp = target.health.hp,
        "attack resolved"
    );
    AttackResult {
        damage,
        is_critical,
        dodged: false,
        effect_applied,
        target_defeated: !target.is_alive(),
    }
}
