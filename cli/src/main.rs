use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use delve_engine::api::{
    build_hero, load_armory, load_zones, simulate_battle, BattleConfig, EncounterChoice, HeroConfig,
};
use delve_engine::content::{builtin_weapons, builtin_zones};
use delve_engine::policy::PolicyChoice;
use delve_engine::zone::{populate, EncounterKind};
use delve_engine::{logging, resolve_attack, roll_damage, BattleEvent, Dice};
use std::path::PathBuf;
use tracing::info;

#[derive(Copy, Clone, ValueEnum)]
enum Encounter {
    Random,
    Regular,
    Boss,
}

#[derive(Copy, Clone, ValueEnum)]
enum Policy {
    Auto,
    AttackOnly,
}

#[derive(Copy, Clone, ValueEnum)]
enum Table {
    Weapons,
    Zones,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll a weapon's damage several times
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Armory weapon name
        #[arg(long, default_value = "Iron Sword")]
        weapon: String,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
    },
    /// Resolve one basic attack against the first enemy of a zone pack
    Attack {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Armory weapon the hero swings
        #[arg(long, default_value = "Iron Sword")]
        weapon: String,
        /// Zone to draw the defender from
        #[arg(long, default_value_t = 1)]
        zone: u32,
    },
    /// Fight one full battle and print the log
    Battle {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 2025)]
        seed: u64,
        #[arg(long, default_value_t = 1)]
        zone: u32,
        #[arg(long, value_enum, default_value_t = Encounter::Random)]
        encounter: Encounter,
        /// How the hero picks actions
        #[arg(long, value_enum, default_value_t = Policy::Auto)]
        policy: Policy,
        #[arg(long, default_value_t = 100)]
        hero_hp: i32,
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Armory weapon to start with (fists if omitted)
        #[arg(long)]
        weapon: Option<String>,
        /// Safety cap on turns
        #[arg(long, default_value_t = 500)]
        max_turns: u32,
        /// Print the summary as JSON instead of the text log
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Zones YAML file (defaults to the built-in dungeon)
        #[arg(long)]
        zones: Option<PathBuf>,
        /// Weapons JSON file (defaults to the built-in armory)
        #[arg(long)]
        weapons: Option<PathBuf>,
    },
    /// Print a built-in content table
    Content {
        #[arg(value_enum)]
        table: Table,
    },
}

#[derive(Parser)]
#[command(name = "delve")]
#[command(about = "Dungeon combat engine CLI harness")]
struct Cli {
    /// Debug-level engine logs on stderr
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_encounter(e: Encounter) -> EncounterChoice {
    match e {
        Encounter::Random => EncounterChoice::Random,
        Encounter::Regular => EncounterChoice::Regular,
        Encounter::Boss => EncounterChoice::Boss,
    }
}

fn to_policy(p: Policy) -> PolicyChoice {
    match p {
        Policy::Auto => PolicyChoice::Auto,
        Policy::AttackOnly => PolicyChoice::AttackOnly,
    }
}

fn path_string(p: Option<PathBuf>) -> Option<String> {
    p.map(|p| p.to_string_lossy().into_owned())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.cmd {
        Cmd::Roll { seed, weapon, rolls } => {
            let armory = load_armory(None)?;
            let weapon = armory.get(&weapon)?;
            let mut dice = Dice::from_seed(seed);
            for _ in 0..rolls {
                println!("{}", roll_damage(&mut dice, weapon));
            }
        }
        Cmd::Attack { seed, weapon, zone } => {
            let armory = load_armory(None)?;
            let book = load_zones(None)?;
            let zone = book.zone(zone)?;
            let hero_cfg = HeroConfig { weapon: Some(weapon), ..HeroConfig::default() };
            let hero = build_hero(&hero_cfg, &armory)?;
            let mut dice = Dice::from_seed(seed);
            let mut pack = populate(zone, &armory, EncounterKind::Regular, &mut dice)?;
            let defender = pack.enemies.first_mut().context("zone produced no enemies")?;
            let result = resolve_attack(&hero, defender, &mut dice);
            let event = BattleEvent::Attack {
                attacker: hero.name.clone(),
                target: defender.name.clone(),
                result,
            };
            println!("{}", event);
            println!("{} hp={}/{}", defender.name, defender.health.hp, defender.health.max_hp);
        }
        Cmd::Battle {
            seed,
            zone,
            encounter,
            policy,
            hero_hp,
            level,
            weapon,
            max_turns,
            json,
            zones,
            weapons,
        } => {
            let cfg = BattleConfig {
                zone,
                seed,
                hero: HeroConfig { health: hero_hp, level, weapon, ..HeroConfig::default() },
                encounter: to_encounter(encounter),
                policy: to_policy(policy),
                max_turns,
                zones_path: path_string(zones),
                weapons_path: path_string(weapons),
            };
            let summary = simulate_battle(cfg)?;
            info!(winner = %summary.winner, turns = summary.turns, "battle finished");
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for line in &summary.log {
                    println!("{}", line);
                }
                println!(
                    "winner={} hp={} level={} xp={} coins={}",
                    summary.winner,
                    summary.hero_hp_end,
                    summary.hero_level,
                    summary.experience,
                    summary.coins
                );
            }
        }
        Cmd::Content { table } => {
            let text = match table {
                Table::Weapons => builtin_weapons().get("basic").copied(),
                Table::Zones => builtin_zones().get("dungeon").copied(),
            };
            print!("{}", text.context("built-in table missing")?);
        }
    }
    Ok(())
}
