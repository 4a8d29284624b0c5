use std::fs;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::battle::{run_battle, BattleEvent, BattleState, BattleStatus, NoopObserver};
use crate::combatant::Combatant;
use crate::content::{builtin_armory, builtin_zone_book, parse_armory, parse_zones};
use crate::items::Item;
use crate::policy::PolicyChoice;
use crate::progression::{add_item, equip, level_up};
use crate::zone::{boss_reward_item, populate, spawn_encounter, Armory, EncounterKind, ZoneBook};
use crate::Dice;

const DEFAULT_HERO_HP: i32 = 100;
const DEFAULT_MAX_TURNS: u32 = 500;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeroConfig {
    #[serde(default = "default_hero_name")]
    pub name: String,
    #[serde(default = "default_hero_hp")]
    pub health: i32,
    #[serde(default = "default_one")]
    pub level: u32,
    /// Armory weapon to start with; fists when absent.
    #[serde(default)]
    pub weapon: Option<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            name: default_hero_name(),
            health: DEFAULT_HERO_HP,
            level: 1,
            weapon: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterChoice {
    /// Boss with 20% odds, otherwise a regular pack.
    #[default]
    Random,
    Regular,
    Boss,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    #[serde(default = "default_one")]
    pub zone: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub hero: HeroConfig,
    #[serde(default)]
    pub encounter: EncounterChoice,
    #[serde(default)]
    pub policy: PolicyChoice,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    #[serde(default)]
    pub zones_path: Option<String>,
    #[serde(default)]
    pub weapons_path: Option<String>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            zone: 1,
            seed: 0,
            hero: HeroConfig::default(),
            encounter: EncounterChoice::Random,
            policy: PolicyChoice::Auto,
            max_turns: DEFAULT_MAX_TURNS,
            zones_path: None,
            weapons_path: None,
        }
    }
}

fn default_hero_name() -> String {
    "Hero".to_string()
}

fn default_hero_hp() -> i32 {
    DEFAULT_HERO_HP
}

fn default_one() -> u32 {
    1
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleSummary {
    pub winner: String,
    pub status: BattleStatus,
    pub turns: u32,
    pub encounter: EncounterKind,
    pub enemies: Vec<String>,
    pub hero_hp_end: i32,
    pub hero_level: u32,
    pub experience: u32,
    pub coins: u32,
    pub boss_reward: Option<Item>,
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ManySummary {
    pub samples: u32,
    pub hero_wins: u32,
    pub hero_losses: u32,
    pub avg_turns: f64,
    pub avg_hero_hp_end: f64,
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<BattleSummary> {
    if cfg.hero.health <= 0 {
        bail!("hero health must be positive, got {}", cfg.hero.health);
    }
    let armory = load_armory(cfg.weapons_path.as_deref())?;
    let book = load_zones(cfg.zones_path.as_deref())?;
    let zone = book.zone(cfg.zone)?;

    let mut dice = Dice::from_seed(cfg.seed);
    let hero = build_hero(&cfg.hero, &armory)?;
    let encounter = match cfg.encounter {
        EncounterChoice::Random => spawn_encounter(zone, &armory, false, &mut dice)?,
        EncounterChoice::Regular => populate(zone, &armory, EncounterKind::Regular, &mut dice)?,
        EncounterChoice::Boss => populate(zone, &armory, EncounterKind::Boss, &mut dice)?,
    };
    let enemies: Vec<String> = encounter.enemies.iter().map(|e| e.name.clone()).collect();

    let mut state = BattleState::new(hero, encounter.enemies, zone.id)
        .with_loot_pool(armory.weapons.clone());
    let mut provider = cfg.policy.provider();
    let outcome = run_battle(
        &mut state,
        provider.as_mut(),
        &mut NoopObserver,
        &mut dice,
        cfg.max_turns,
    )
    .with_context(|| format!("battle in zone {} (seed {})", zone.id, cfg.seed))?;

    let mut boss_reward = None;
    if outcome.status == BattleStatus::HeroVictory && encounter.kind == EncounterKind::Boss {
        boss_reward = boss_reward_item(zone, &armory)?;
        if let Some(item) = &boss_reward {
            add_item(&mut state.hero, item.clone());
        }
    }

    let winner = match outcome.status {
        BattleStatus::HeroVictory => "hero",
        BattleStatus::HeroDefeat => "enemies",
        BattleStatus::Ongoing => "none",
    };
    let (experience, coins) = state
        .hero
        .progress
        .as_ref()
        .map_or((0, 0), |p| (p.experience, p.coins));

    Ok(BattleSummary {
        winner: winner.to_string(),
        status: outcome.status,
        turns: outcome.turns,
        encounter: encounter.kind,
        enemies,
        hero_hp_end: state.hero.health.hp,
        hero_level: state.hero.level,
        experience,
        coins,
        boss_reward,
        log: outcome.events.iter().map(ToString::to_string).collect(),
        events: outcome.events,
    })
}

/// Run `samples` battles; sample `i` uses seed `cfg.seed + i`.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<ManySummary> {
    if samples == 0 {
        bail!("samples must be at least 1");
    }
    let mut hero_wins = 0u32;
    let mut hero_losses = 0u32;
    let mut turns_total = 0u64;
    let mut hp_total = 0i64;
    for i in 0..samples {
        let mut trial = cfg.clone();
        trial.seed = cfg.seed.wrapping_add(u64::from(i));
        let res = simulate_battle(trial)?;
        match res.status {
            BattleStatus::HeroVictory => hero_wins += 1,
            _ => hero_losses += 1,
        }
        turns_total += u64::from(res.turns);
        hp_total += i64::from(res.hero_hp_end);
    }
    let n = f64::from(samples);
    Ok(ManySummary {
        samples,
        hero_wins,
        hero_losses,
        avg_turns: turns_total as f64 / n,
        avg_hero_hp_end: hp_total as f64 / n,
    })
}

pub fn build_hero(cfg: &HeroConfig, armory: &Armory) -> Result<Combatant> {
    let mut hero = Combatant::hero(cfg.name.clone(), cfg.health);
    for _ in 1..cfg.level.max(1) {
        level_up(&mut hero);
    }
    if let Some(name) = &cfg.weapon {
        equip(&mut hero, armory.get(name)?.clone());
    }
    Ok(hero)
}

pub fn load_armory(path: Option<&str>) -> Result<Armory> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read weapons JSON: {}", path))?;
            parse_armory(&text).with_context(|| format!("failed to parse weapons JSON: {}", path))
        }
        None => Ok(builtin_armory()?),
    }
}

pub fn load_zones(path: Option<&str>) -> Result<ZoneBook> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read zones YAML: {}", path))?;
            parse_zones(&text).with_context(|| format!("failed to parse zones YAML: {}", path))
        }
        None => Ok(builtin_zone_book()?),
    }
}
