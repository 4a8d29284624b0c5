use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::{Combatant, EnemyTemplate};
use crate::error::ContentError;
use crate::items::{Item, ItemKind};
use crate::weapon::Weapon;
use crate::Dice;

pub const BOSS_ENCOUNTER_CHANCE: f64 = 0.2;
pub const MAX_PACK_SIZE: usize = 3;

/// Every weapon known to the game, in table order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Armory {
    pub weapons: Vec<Weapon>,
}

impl Armory {
    pub fn get(&self, name: &str) -> Result<&Weapon, ContentError> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| ContentError::UnknownWeapon(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BossReward {
    Item { name: String, item_kind: ItemKind },
    Weapon { weapon: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub enemies: Vec<EnemyTemplate>,
    pub boss: EnemyTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss_reward: Option<BossReward>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneBook {
    pub zones: Vec<Zone>,
}

impl ZoneBook {
    pub fn zone(&self, id: u32) -> Result<&Zone, ContentError> {
        self.zones
            .iter()
            .find(|z| z.id == id)
            .ok_or(ContentError::UnknownZone(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterKind {
    Regular,
    Boss,
}

#[derive(Debug, Clone)]
pub struct Encounter {
    pub kind: EncounterKind,
    pub enemies: Vec<Combatant>,
}

/// Decide what the hero runs into: the zone boss (20%, while undefeated) or a
/// pack of one to three distinct regulars.
pub fn spawn_encounter(
    zone: &Zone,
    armory: &Armory,
    boss_defeated: bool,
    dice: &mut Dice,
) -> Result<Encounter, ContentError> {
    let boss_battle = !boss_defeated && dice.chance(BOSS_ENCOUNTER_CHANCE);
    let kind = if boss_battle { EncounterKind::Boss } else { EncounterKind::Regular };
    populate(zone, armory, kind, dice)
}

/// Build the roster for a given encounter kind.
pub fn populate(
    zone: &Zone,
    armory: &Armory,
    kind: EncounterKind,
    dice: &mut Dice,
) -> Result<Encounter, ContentError> {
    let enemies = match kind {
        EncounterKind::Boss => {
            let weapon = template_weapon(&zone.boss, armory)?;
            vec![Combatant::boss(&zone.boss, weapon, dice)]
        }
        EncounterKind::Regular => {
            if zone.enemies.is_empty() {
                return Err(ContentError::EmptyZone(zone.id));
            }
            let count = (dice.range(1, MAX_PACK_SIZE as i32) as usize).min(zone.enemies.len());
            let mut pool: Vec<&EnemyTemplate> = zone.enemies.iter().collect();
            let mut enemies = Vec::with_capacity(count);
            for _ in 0..count {
                let template = pool.remove(dice.pick(pool.len()));
                let weapon = template_weapon(template, armory)?;
                enemies.push(Combatant::enemy(template, weapon, dice));
            }
            enemies
        }
    };
    debug!(zone = zone.id, ?kind, count = enemies.len(), "encounter populated");
    Ok(Encounter { kind, enemies })
}

fn template_weapon(
    template: &EnemyTemplate,
    armory: &Armory,
) -> Result<Option<Weapon>, ContentError> {
    template
        .weapon
        .as_deref()
        .map(|name| armory.get(name).cloned())
        .transpose()
}

/// The item granted for beating `zone`'s boss, if it has one.
pub fn boss_reward_item(zone: &Zone, armory: &Armory) -> Result<Option<Item>, ContentError> {
    match &zone.boss_reward {
        None => Ok(None),
        Some(BossReward::Item { name, item_kind }) => {
            Ok(Some(Item::new(name.clone(), *item_kind, 0)))
        }
        Some(BossReward::Weapon { weapon }) => {
            Ok(Some(Item::from_weapon(armory.get(weapon)?.clone())))
        }
    }
}
