use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::abilities::phase::PhaseState;
use crate::abilities::special::SpecialAbility;
use crate::abilities::{AbilityKind, AbilitySlot};
use crate::life::Health;
use crate::progression::Progress;
use crate::stats::{Stat, StatBlock};
use crate::status::{speed_penalty, StatusMap};
use crate::weapon::{DamageRange, Weapon};
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Hero,
    Enemy,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub experience: u32,
    pub coins: u32,
}

/// Data an enemy or boss is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub health: i32,
    pub damage: DamageRange,
    #[serde(default = "default_level")]
    pub level: u32,
    /// Name of an armory weapon; a natural attack is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Rewards>,
}

fn default_level() -> u32 {
    1
}

const BOSS_HEALTH_FACTOR: i32 = 2;
const BOSS_REWARD_FACTOR: u32 = 3;

/// Hero, enemy and boss share this record; `role` and the optional
/// capability fields decide what it can do.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub name: String,
    pub role: Role,
    pub level: u32,
    pub health: Health,
    pub stats: StatBlock,
    pub weapon: Weapon,
    pub statuses: StatusMap,
    pub abilities: IndexMap<AbilityKind, AbilitySlot>,
    pub specials: Vec<SpecialAbility>,
    pub phase: Option<PhaseState>,
    pub rewards: Option<Rewards>,
    pub progress: Option<Progress>,
}

impl Combatant {
    /// A bare combatant with default stats and no capabilities.
    pub fn new(name: impl Into<String>, role: Role, health: i32, weapon: Weapon) -> Self {
        Self {
            name: name.into(),
            role,
            level: 1,
            health: Health::new(health),
            stats: StatBlock::default(),
            weapon,
            statuses: StatusMap::new(),
            abilities: IndexMap::new(),
            specials: Vec::new(),
            phase: None,
            rewards: None,
            progress: None,
        }
    }

    pub fn hero(name: impl Into<String>, health: i32) -> Self {
        let mut hero = Self::new(name, Role::Hero, health, Weapon::fists());
        hero.abilities = AbilityKind::hero_table();
        hero.progress = Some(Progress::default());
        hero
    }

    /// Build a regular enemy; coin rewards are sampled from `dice` unless the
    /// template fixes them.
    pub fn enemy(template: &EnemyTemplate, weapon: Option<Weapon>, dice: &mut Dice) -> Self {
        let level = template.level.max(1);
        let weapon = weapon.unwrap_or_else(|| Weapon::natural(&template.name, template.damage));
        let mut enemy = Self::new(template.name.clone(), Role::Enemy, template.health, weapon);
        enemy.level = level;
        enemy.stats = StatBlock::for_enemy_level(level);
        enemy.specials = SpecialAbility::for_enemy_level(level);
        enemy.rewards = Some(template.rewards.unwrap_or_else(|| Rewards {
            experience: 20 * level,
            coins: dice.range(5 * level as i32, 15 * level as i32) as u32,
        }));
        enemy
    }

    pub fn boss(template: &EnemyTemplate, weapon: Option<Weapon>, dice: &mut Dice) -> Self {
        let mut boss = Self::enemy(template, weapon, dice);
        boss.role = Role::Boss;
        boss.health = Health::new(template.health * BOSS_HEALTH_FACTOR);
        boss.stats.raise_base(Stat::Strength, 5);
        boss.stats.raise_base(Stat::Defense, 5);
        boss.stats.raise_base(Stat::Speed, 3);
        if template.rewards.is_none() {
            boss.rewards = boss.rewards.map(|r| Rewards {
                experience: r.experience * BOSS_REWARD_FACTOR,
                coins: r.coins * BOSS_REWARD_FACTOR,
            });
        }
        boss.specials.extend([SpecialAbility::UltimateAttack, SpecialAbility::SummonMinion]);
        boss.phase = Some(PhaseState::standard());
        boss
    }

    /// A minion summoned by `boss`: a third of its max health, half its weapon range.
    pub fn minion_of(boss: &Combatant, dice: &mut Dice) -> Self {
        let template = EnemyTemplate {
            name: format!("{}'s Minion", boss.name),
            health: boss.health.max_hp / 3,
            damage: boss.weapon.damage.halved(),
            level: boss.level.saturating_sub(1).max(1),
            weapon: None,
            rewards: None,
        };
        Self::enemy(&template, None, dice)
    }

    pub fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.role == Role::Boss
    }

    pub fn effective(&self, stat: Stat) -> i32 {
        self.stats.effective(stat)
    }

    /// Speed as used by dodge rolls: effective speed minus any freeze penalty.
    pub fn combat_speed(&self) -> i32 {
        self.effective(Stat::Speed) - speed_penalty(&self.statuses)
    }

    pub fn ability_ready(&self, kind: AbilityKind) -> bool {
        self.abilities
            .get(&kind)
            .is_some_and(|slot| slot.is_ready(self.level))
    }
}
