use anyhow::Context;
use clap::Parser;
use delve_engine::api::{simulate_battle_many, BattleConfig, EncounterChoice};
use delve_engine::logging;
use encoding_rs::Encoding;
use serde::Deserialize;
use std::{fs, path::Path, path::PathBuf};

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many battles from one config")]
struct Args {
    /// Battle config JSON (any field may be omitted; may also carry `trials`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of trials (default 1000); overrides the config
    #[arg(long)]
    trials: Option<u32>,

    /// RNG base seed (trial i uses seed+i); overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Zone to fight in; overrides the config
    #[arg(long)]
    zone: Option<u32>,

    /// Force boss fights
    #[arg(long, default_value_t = false)]
    boss: bool,

    /// Print the summary as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

const DEFAULT_TRIALS: u32 = 1000;

#[derive(Deserialize, Default)]
struct SimFile {
    trials: Option<u32>,
    #[serde(flatten)]
    battle: BattleConfig,
}

fn read_text_auto(path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<SimFile> {
    match path {
        Some(p) => {
            let text = read_text_auto(p)?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid battle config: {}", p.display()))
        }
        None => Ok(SimFile::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let file = load_config(args.config.as_deref())?;
    let trials = args.trials.or(file.trials).unwrap_or(DEFAULT_TRIALS);
    let mut cfg = file.battle;
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(zone) = args.zone {
        cfg.zone = zone;
    }
    if args.boss {
        cfg.encounter = EncounterChoice::Boss;
    }

    let stats = simulate_battle_many(cfg.clone(), trials)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let win_rate = f64::from(stats.hero_wins) / f64::from(stats.samples);
    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", stats.samples);
    println!("zone:               {}", cfg.zone);
    println!(
        "hero:               {} ({} HP, level {})",
        cfg.hero.name, cfg.hero.health, cfg.hero.level
    );
    println!("weapon:             {}", cfg.hero.weapon.as_deref().unwrap_or("Fists"));
    println!();
    println!("win rate:           {:.1}%", win_rate * 100.0);
    println!("losses:             {}", stats.hero_losses);
    println!("avg turns:          {:.2}", stats.avg_turns);
    println!("avg hero hp left:   {:.2}", stats.avg_hero_hp_end);

    Ok(())
}
