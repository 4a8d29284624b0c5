use serde::{Deserialize, Serialize};

use crate::status::StatusKind;
use crate::Dice;

/// Trigger probability for a weapon's special effect, when it has one.
pub const SPECIAL_EFFECT_CHANCE: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRange {
    pub min: i32,
    pub max: i32,
}

impl DamageRange {
    /// Builds a range with `0 <= min <= max`, swapping or clamping bad input.
    pub fn new(min: i32, max: i32) -> Self {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        Self { min: lo.max(0), max: hi.max(0) }
    }

    pub fn halved(self) -> Self {
        Self::new(self.min / 2, self.max / 2)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub category: String,
    pub damage: DamageRange,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_effect: Option<StatusKind>,
    /// Flat bonus from strength potions; reset by the caller.
    #[serde(default)]
    pub damage_boost: i32,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        damage: DamageRange,
        value: u32,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            damage,
            value,
            special_effect: None,
            damage_boost: 0,
        }
    }

    pub fn with_effect(mut self, kind: StatusKind) -> Self {
        self.special_effect = Some(kind);
        self
    }

    pub fn fists() -> Self {
        Self::new("Fists", "blunt", DamageRange::new(1, 3), 0)
    }

    /// The bare attack of a monster that carries no weapon.
    pub fn natural(owner: &str, damage: DamageRange) -> Self {
        Self::new(format!("{}'s Attack", owner), "natural", damage, 0)
    }

    pub fn special_effect_chance(&self) -> f64 {
        if self.special_effect.is_some() {
            SPECIAL_EFFECT_CHANCE
        } else {
            0.0
        }
    }
}

pub fn roll_damage(dice: &mut Dice, weapon: &Weapon) -> i32 {
    let base = dice.range(weapon.damage.min, weapon.damage.max);
    (base + weapon.damage_boost).max(0)
}

/// Rolls the weapon's on-hit effect. Weapons without one consume no randomness.
pub fn roll_special_effect(dice: &mut Dice, weapon: &Weapon) -> Option<StatusKind> {
    let kind = weapon.special_effect?;
    dice.chance(SPECIAL_EFFECT_CHANCE).then_some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_normalizes() {
        assert_eq!(DamageRange::new(8, 3), DamageRange { min: 3, max: 8 });
        assert_eq!(DamageRange::new(-4, 2), DamageRange { min: 0, max: 2 });
        assert_eq!(DamageRange::new(7, 15).halved(), DamageRange { min: 3, max: 7 });
    }

    #[test]
    fn boost_is_added_to_roll() {
        let mut w = Weapon::new("Stick", "blunt", DamageRange::new(2, 2), 1);
        w.damage_boost = 10;
        let mut dice = Dice::from_seed(1);
        assert_eq!(roll_damage(&mut dice, &w), 12);
    }

    #[test]
    fn negative_boost_never_goes_below_zero() {
        let mut w = Weapon::fists();
        w.damage_boost = -50;
        let mut dice = Dice::from_seed(3);
        assert_eq!(roll_damage(&mut dice, &w), 0);
    }

    #[test]
    fn effect_only_rolls_when_present() {
        let plain = Weapon::fists();
        let burning = Weapon::fists().with_effect(StatusKind::Burn);
        let mut dice = Dice::from_scripted(vec![0.1, 0.5]);
        assert_eq!(roll_special_effect(&mut dice, &plain), None);
        assert_eq!(roll_special_effect(&mut dice, &burning), Some(StatusKind::Burn));
        assert_eq!(roll_special_effect(&mut dice, &burning), None);
        assert_eq!(plain.special_effect_chance(), 0.0);
    }
}
