use delve_engine::api::{
    simulate_battle, simulate_battle_many, BattleConfig, EncounterChoice, HeroConfig,
};
use delve_engine::items::ItemKind;
use delve_engine::policy::PolicyChoice;
use delve_engine::zone::EncounterKind;
use delve_engine::BattleStatus;

fn content_path(rel: &str) -> String {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("content")
        .join(rel)
        .to_string_lossy()
        .into_owned()
}

#[test]
fn battle_api_smoke() {
    let cfg = BattleConfig { seed: 2025, ..BattleConfig::default() };
    let res = simulate_battle(cfg).expect("battle ran");
    assert!(res.turns > 0);
    assert!(matches!(res.winner.as_str(), "hero" | "enemies"));
    assert!(!res.enemies.is_empty());
    assert_eq!(res.log.len(), res.events.len());
    assert!(res.log.last().unwrap().starts_with("[END]"));
}

#[test]
fn same_seed_same_battle() {
    let cfg = BattleConfig { seed: 77, zone: 2, ..BattleConfig::default() };
    let a = simulate_battle(cfg.clone()).unwrap();
    let b = simulate_battle(cfg).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.hero_hp_end, b.hero_hp_end);
}

#[test]
fn config_deserializes_with_defaults() {
    let cfg: BattleConfig =
        serde_json::from_str(r#"{ "seed": 9, "hero": { "weapon": "Iron Sword" } }"#).unwrap();
    assert_eq!(cfg.zone, 1);
    assert_eq!(cfg.max_turns, 500);
    assert_eq!(cfg.hero.name, "Hero");
    assert_eq!(cfg.hero.health, 100);
    assert_eq!(cfg.encounter, EncounterChoice::Random);
    assert_eq!(cfg.policy, PolicyChoice::Auto);
}

#[test]
fn strong_hero_beats_the_first_boss_and_gets_the_key() {
    let cfg = BattleConfig {
        seed: 3,
        encounter: EncounterChoice::Boss,
        hero: HeroConfig {
            health: 300,
            level: 10,
            weapon: Some("Flaming Sword".into()),
            ..HeroConfig::default()
        },
        ..BattleConfig::default()
    };
    let res = simulate_battle(cfg).unwrap();
    assert_eq!(res.encounter, EncounterKind::Boss);
    assert_eq!(res.enemies, vec!["Dungeon Keeper".to_string()]);
    assert_eq!(res.status, BattleStatus::HeroVictory);
    let reward = res.boss_reward.expect("boss reward");
    assert_eq!(reward.kind, ItemKind::Key);
}

#[test]
fn content_files_can_override_builtins() {
    let cfg = BattleConfig {
        seed: 1,
        encounter: EncounterChoice::Regular,
        weapons_path: Some(content_path("weapons/basic.json")),
        zones_path: Some(content_path("zones/dungeon.yaml")),
        ..BattleConfig::default()
    };
    let res = simulate_battle(cfg).unwrap();
    assert_eq!(res.encounter, EncounterKind::Regular);
}

#[test]
fn bad_inputs_are_errors() {
    let missing = BattleConfig {
        zones_path: Some("/no/such/zones.yaml".into()),
        ..BattleConfig::default()
    };
    let err = simulate_battle(missing).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read zones YAML"));

    let unknown_zone = BattleConfig { zone: 42, ..BattleConfig::default() };
    assert!(simulate_battle(unknown_zone).unwrap_err().to_string().contains("unknown zone 42"));

    let bad_weapon = BattleConfig {
        hero: HeroConfig { weapon: Some("Spork".into()), ..HeroConfig::default() },
        ..BattleConfig::default()
    };
    assert!(simulate_battle(bad_weapon).is_err());
}

#[test]
fn many_battles_add_up() {
    let cfg =
        BattleConfig { seed: 100, policy: PolicyChoice::AttackOnly, ..BattleConfig::default() };
    let stats = simulate_battle_many(cfg, 20).unwrap();
    assert_eq!(stats.samples, 20);
    assert_eq!(stats.hero_wins + stats.hero_losses, 20);
    assert!(stats.avg_turns >= 1.0);
    assert!(simulate_battle_many(BattleConfig::default(), 0).is_err());
}
