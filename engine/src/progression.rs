use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::abilities::AbilityKind;
use crate::combatant::Combatant;
use crate::items::{use_item, Item, ItemError, ItemUse};
use crate::stats::Stat;
use crate::weapon::Weapon;

pub const FIRST_LEVEL_XP: u32 = 100;
pub const STARTING_COINS: u32 = 50;
const LEVEL_HEALTH_GAIN: i32 = 10;
const LEVEL_STAT_GAIN: i32 = 2;

/// Hero-only bookkeeping that outlives a single battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub experience: u32,
    pub experience_to_level: u32,
    pub coins: u32,
    pub inventory: Vec<Item>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            experience: 0,
            experience_to_level: FIRST_LEVEL_XP,
            coins: STARTING_COINS,
            inventory: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub level: u32,
    pub unlocked: Vec<AbilityKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("{0} has no inventory")]
    NoInventory(String),
    #[error("no inventory slot {0}")]
    NoSuchSlot(usize),
    #[error(transparent)]
    Item(#[from] ItemError),
}

/// Add experience, levelling up as many times as it pays for.
pub fn add_experience(hero: &mut Combatant, amount: u32) -> Vec<LevelUp> {
    let mut ups = Vec::new();
    let Some(progress) = hero.progress.as_mut() else {
        return ups;
    };
    progress.experience += amount;
    while hero.progress.as_ref().is_some_and(|p| p.experience >= p.experience_to_level) {
        ups.push(level_up(hero));
    }
    ups
}

pub fn level_up(hero: &mut Combatant) -> LevelUp {
    if let Some(p) = hero.progress.as_mut() {
        p.experience = p.experience.saturating_sub(p.experience_to_level);
        p.experience_to_level = p.experience_to_level * 3 / 2;
    }
    hero.level += 1;
    hero.health.raise_max(LEVEL_HEALTH_GAIN);
    hero.health.restore_full();
    for stat in [Stat::Strength, Stat::Defense, Stat::Speed] {
        hero.stats.raise_base(stat, LEVEL_STAT_GAIN);
    }

    let unlocked: Vec<AbilityKind> = hero
        .abilities
        .iter()
        .filter(|(_, slot)| slot.unlock_level == hero.level)
        .map(|(kind, _)| *kind)
        .collect();
    info!(hero = %hero.name, level = hero.level, ?unlocked, "level up");
    LevelUp { level: hero.level, unlocked }
}

pub fn add_coins(hero: &mut Combatant, amount: u32) {
    if let Some(p) = hero.progress.as_mut() {
        p.coins += amount;
    }
}

pub fn add_item(hero: &mut Combatant, item: Item) {
    if let Some(p) = hero.progress.as_mut() {
        p.inventory.push(item);
    }
}

pub fn equip(hero: &mut Combatant, weapon: Weapon) {
    hero.weapon = weapon;
}

/// Put the current weapon away and fight bare-handed.
pub fn drop_weapon(hero: &mut Combatant) {
    hero.weapon = Weapon::fists();
}

/// Use the inventory item in `slot`; it is consumed only if the use succeeds.
pub fn use_inventory_item(hero: &mut Combatant, slot: usize) -> Result<ItemUse, InventoryError> {
    let item = hero
        .progress
        .as_ref()
        .ok_or_else(|| InventoryError::NoInventory(hero.name.clone()))?
        .inventory
        .get(slot)
        .cloned()
        .ok_or(InventoryError::NoSuchSlot(slot))?;
    let used = use_item(hero, &item)?;
    if let Some(p) = hero.progress.as_mut() {
        p.inventory.remove(slot);
    }
    Ok(used)
}
