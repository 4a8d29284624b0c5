use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combatant::Combatant;
use crate::stats::Stat;
use crate::weapon::Weapon;
use crate::Dice;

pub const HEALTH_POTION_HEAL: i32 = 30;
pub const STRENGTH_POTION_BOOST: i32 = 10;
pub const BUFF_BONUS: i32 = 5;
pub const LOOT_DROP_CHANCE: f64 = 0.3;
pub const LOOT_WEAPON_CHANCE: f64 = 0.7;

const ARMOR_NAMES: [&str; 5] = [
    "Leather Armor",
    "Chain Mail",
    "Plate Armor",
    "Dragon Scale",
    "Mystic Robe",
];
const POTION_NAMES: [&str; 3] = ["Health Potion", "Strength Potion", "Speed Potion"];
const POTION_VALUE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Consumable,
    Buff,
    Key,
    Artifact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Weapon>,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind, value: u32) -> Self {
        Self { name: name.into(), kind, value, weapon: None }
    }

    pub fn from_weapon(weapon: Weapon) -> Self {
        Self {
            name: weapon.name.clone(),
            kind: ItemKind::Weapon,
            value: weapon.value,
            weapon: Some(weapon),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum ItemUse {
    Healed { amount: i32 },
    WeaponBoosted { boost: i32 },
    StatBuffed { stat: Stat, bonus: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    #[error("you can't use {0} right now")]
    NotUsable(String),
}

pub fn use_item(target: &mut Combatant, item: &Item) -> Result<ItemUse, ItemError> {
    let not_usable = || ItemError::NotUsable(item.name.clone());
    match item.kind {
        ItemKind::Consumable => {
            if item.name.contains("Health Potion") {
                let amount = target.health.heal(HEALTH_POTION_HEAL);
                Ok(ItemUse::Healed { amount })
            } else if item.name.contains("Strength Potion") {
                target.weapon.damage_boost = STRENGTH_POTION_BOOST;
                Ok(ItemUse::WeaponBoosted { boost: STRENGTH_POTION_BOOST })
            } else {
                Err(not_usable())
            }
        }
        ItemKind::Buff => {
            let stat = if item.name.contains("Strength Up") {
                Stat::Strength
            } else if item.name.contains("Speed Up") {
                Stat::Speed
            } else if item.name.contains("Defense Up") {
                Stat::Defense
            } else {
                return Err(not_usable());
            };
            target.stats.set_bonus(stat, BUFF_BONUS);
            Ok(ItemUse::StatBuffed { stat, bonus: BUFF_BONUS })
        }
        _ => Err(not_usable()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LootDrop {
    pub item: Item,
    /// Weapon drops are equipped straight away.
    pub equip: bool,
}

/// Post-battle bonus drop for `zone`, drawing weapons from `armory`.
pub fn roll_loot(dice: &mut Dice, zone: u32, armory: &[Weapon]) -> Option<LootDrop> {
    if !dice.chance(LOOT_DROP_CHANCE) {
        return None;
    }
    match dice.pick(3) {
        0 => {
            if !dice.chance(LOOT_WEAPON_CHANCE) {
                return None;
            }
            let low = zone.saturating_sub(1) * 50;
            let high = zone * 100;
            let band: Vec<&Weapon> = armory
                .iter()
                .filter(|w| w.value > low && w.value <= high)
                .collect();
            if band.is_empty() {
                return None;
            }
            let weapon = band[dice.pick(band.len())].clone();
            Some(LootDrop { item: Item::from_weapon(weapon), equip: true })
        }
        1 => {
            let name = ARMOR_NAMES[dice.pick(ARMOR_NAMES.len())];
            Some(LootDrop { item: Item::new(name, ItemKind::Armor, 50 * zone), equip: false })
        }
        _ => {
            let name = POTION_NAMES[dice.pick(POTION_NAMES.len())];
            Some(LootDrop {
                item: Item::new(name, ItemKind::Consumable, POTION_VALUE),
                equip: false,
            })
        }
    }
}
