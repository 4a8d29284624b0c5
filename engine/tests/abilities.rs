use delve_engine::abilities::AbilityFailure;
use delve_engine::{
    update_cooldowns, use_ability, AbilityKind, Combatant, DamageRange, Dice, Role, Weapon,
};

fn hero_with_blade(level: u32) -> Combatant {
    let mut hero = Combatant::hero("Hero", 100);
    hero.level = level;
    hero.weapon = Weapon::new("Test Blade", "sharp", DamageRange::new(5, 5), 0);
    hero
}

fn orc(name: &str) -> Combatant {
    Combatant::new(name, Role::Enemy, 50, Weapon::fists())
}

#[test]
fn heroic_strike_doubles_the_roll_and_starts_cooldown() {
    let mut hero = hero_with_blade(1);
    let mut target = orc("Orc");
    let mut dice = Dice::from_seed(1);

    let out = {
        let mut targets = [&mut target];
        use_ability(&mut hero, "heroic_strike", &mut targets, &mut dice).unwrap()
    };
    assert_eq!(out.ability, AbilityKind::HeroicStrike);
    assert_eq!(out.hits.len(), 1);
    assert_eq!(out.hits[0].damage, 10);
    assert_eq!(target.health.hp, 40);
    assert_eq!(hero.abilities[&AbilityKind::HeroicStrike].cooldown_remaining, 3);
}

#[test]
fn cooldown_blocks_reuse_until_ticked_out() {
    let mut hero = hero_with_blade(1);
    let mut target = orc("Orc");
    let mut dice = Dice::from_seed(2);

    let mut targets = [&mut target];
    use_ability(&mut hero, "Heroic Strike", &mut targets, &mut dice).unwrap();
    let err = use_ability(&mut hero, "heroic_strike", &mut targets, &mut dice).unwrap_err();
    assert_eq!(
        err,
        AbilityFailure::OnCooldown { ability: AbilityKind::HeroicStrike, remaining: 3 }
    );
    assert_eq!(err.to_string(), "Heroic Strike is on cooldown for 3 more turns");

    for _ in 0..3 {
        update_cooldowns(&mut hero);
    }
    assert!(use_ability(&mut hero, "heroic_strike", &mut targets, &mut dice).is_ok());
}

#[test]
fn locked_ability_changes_nothing() {
    let mut hero = hero_with_blade(1);
    hero.health.set(40);
    let mut dice = Dice::from_seed(3);
    let mut none: [&mut Combatant; 0] = [];

    let err = use_ability(&mut hero, "quick_recovery", &mut none, &mut dice).unwrap_err();
    assert_eq!(
        err,
        AbilityFailure::NotUnlocked { ability: AbilityKind::QuickRecovery, unlock_level: 3 }
    );
    assert_eq!(hero.health.hp, 40);
    assert_eq!(hero.abilities[&AbilityKind::QuickRecovery].cooldown_remaining, 0);
}

#[test]
fn quick_recovery_heals_a_third() {
    let mut hero = hero_with_blade(3);
    hero.health.set(50);
    let mut dice = Dice::from_seed(4);
    let mut none: [&mut Combatant; 0] = [];

    let out = use_ability(&mut hero, "quick_recovery", &mut none, &mut dice).unwrap();
    assert_eq!(out.healed, 33);
    assert_eq!(hero.health.hp, 83);
    assert_eq!(hero.abilities[&AbilityKind::QuickRecovery].cooldown_remaining, 5);
}

#[test]
fn whirlwind_halves_one_roll_across_all_targets() {
    let mut hero = hero_with_blade(5);
    let mut a = orc("Orc A");
    let mut b = orc("Orc B");
    let mut dice = Dice::from_seed(5);

    let out = {
        let mut targets = [&mut a, &mut b];
        use_ability(&mut hero, "whirlwind", &mut targets, &mut dice).unwrap()
    };
    assert_eq!(out.hits.iter().map(|h| h.damage).collect::<Vec<_>>(), vec![2, 2]);
    assert_eq!((a.health.hp, b.health.hp), (48, 48));
    assert_eq!(hero.abilities[&AbilityKind::Whirlwind].cooldown_remaining, 7);
}

#[test]
fn unknown_ability_is_reported() {
    let mut hero = hero_with_blade(10);
    let mut dice = Dice::from_seed(6);
    let mut none: [&mut Combatant; 0] = [];
    let err = use_ability(&mut hero, "fireball", &mut none, &mut dice).unwrap_err();
    assert_eq!(err, AbilityFailure::UnknownAbility { name: "fireball".into() });
}

#[test]
fn strike_without_target_keeps_cooldown_clear() {
    let mut hero = hero_with_blade(1);
    let mut dice = Dice::from_seed(7);
    let mut none: [&mut Combatant; 0] = [];
    let err = use_ability(&mut hero, "heroic_strike", &mut none, &mut dice).unwrap_err();
    assert_eq!(err, AbilityFailure::NoTarget { ability: AbilityKind::HeroicStrike });
    assert!(hero.ability_ready(AbilityKind::HeroicStrike));
}

#[test]
fn ability_names_parse_in_either_spelling() {
    assert_eq!("Quick Recovery".parse::<AbilityKind>().unwrap(), AbilityKind::QuickRecovery);
    assert_eq!("heroic-strike".parse::<AbilityKind>().unwrap(), AbilityKind::HeroicStrike);
    assert!("fireball".parse::<AbilityKind>().is_err());
}
