use delve_engine::content::builtin_armory;
use delve_engine::items::{roll_loot, use_item, Item, ItemError, ItemKind, ItemUse};
use delve_engine::progression::{
    add_coins, add_experience, add_item, drop_weapon, use_inventory_item, InventoryError,
};
use delve_engine::stats::Stat;
use delve_engine::{AbilityKind, Combatant, Dice, Role, Weapon};

#[test]
fn experience_can_pay_for_several_levels() {
    let mut hero = Combatant::hero("Hero", 100);
    let ups = add_experience(&mut hero, 250);

    assert_eq!(ups.iter().map(|u| u.level).collect::<Vec<_>>(), vec![2, 3]);
    assert!(ups[0].unlocked.is_empty());
    assert_eq!(ups[1].unlocked, vec![AbilityKind::QuickRecovery]);
    assert_eq!(hero.level, 3);
    assert_eq!(hero.health.max_hp, 120);
    assert_eq!(hero.health.hp, 120);
    assert_eq!(hero.effective(Stat::Strength), 9);
    let p = hero.progress.as_ref().unwrap();
    assert_eq!(p.experience, 0);
    assert_eq!(p.experience_to_level, 225);
}

#[test]
fn level_up_restores_health() {
    let mut hero = Combatant::hero("Hero", 100);
    hero.health.set(12);
    add_experience(&mut hero, 100);
    assert_eq!(hero.health.hp, 110);
}

#[test]
fn enemies_do_not_progress() {
    let mut orc = Combatant::new("Orc", Role::Enemy, 30, Weapon::fists());
    assert!(add_experience(&mut orc, 1_000).is_empty());
    assert_eq!(orc.level, 1);
}

#[test]
fn coins_accumulate_from_the_starting_purse() {
    let mut hero = Combatant::hero("Hero", 100);
    add_coins(&mut hero, 25);
    assert_eq!(hero.progress.as_ref().unwrap().coins, 75);
}

#[test]
fn potions_and_buffs() {
    let mut hero = Combatant::hero("Hero", 100);
    hero.health.set(90);

    let potion = Item::new("Health Potion", ItemKind::Consumable, 30);
    let healed = use_item(&mut hero, &potion).unwrap();
    assert_eq!(healed, ItemUse::Healed { amount: 10 });

    let tonic = Item::new("Strength Potion", ItemKind::Consumable, 30);
    let boosted = use_item(&mut hero, &tonic).unwrap();
    assert_eq!(boosted, ItemUse::WeaponBoosted { boost: 10 });
    assert_eq!(hero.weapon.damage_boost, 10);

    let buffed = use_item(&mut hero, &Item::new("Speed Up", ItemKind::Buff, 20)).unwrap();
    assert_eq!(buffed, ItemUse::StatBuffed { stat: Stat::Speed, bonus: 5 });
    assert_eq!(hero.effective(Stat::Speed), 10);

    let err = use_item(&mut hero, &Item::new("Chain Mail", ItemKind::Armor, 50)).unwrap_err();
    assert_eq!(err, ItemError::NotUsable("Chain Mail".into()));
}

#[test]
fn inventory_items_are_consumed_only_on_success() {
    let mut hero = Combatant::hero("Hero", 100);
    add_item(&mut hero, Item::new("Leather Armor", ItemKind::Armor, 50));
    add_item(&mut hero, Item::new("Health Potion", ItemKind::Consumable, 30));

    assert!(matches!(use_inventory_item(&mut hero, 0), Err(InventoryError::Item(_))));
    assert_eq!(hero.progress.as_ref().unwrap().inventory.len(), 2);

    assert!(use_inventory_item(&mut hero, 1).is_ok());
    assert_eq!(hero.progress.as_ref().unwrap().inventory.len(), 1);

    assert_eq!(use_inventory_item(&mut hero, 9), Err(InventoryError::NoSuchSlot(9)));
}

#[test]
fn dropping_a_weapon_leaves_fists() {
    let mut hero = Combatant::hero("Hero", 100);
    hero.weapon = builtin_armory().unwrap().get("Iron Sword").unwrap().clone();
    drop_weapon(&mut hero);
    assert_eq!(hero.weapon, Weapon::fists());
}

#[test]
fn loot_weapon_comes_from_the_zone_band() {
    let armory = builtin_armory().unwrap();
    // drop, weapon slot, weapon roll, first weapon in band
    let mut dice = Dice::from_scripted(vec![0.1, 0.0, 0.5, 0.0]);
    let drop = roll_loot(&mut dice, 1, &armory.weapons).unwrap();
    assert_eq!(drop.item.name, "Iron Sword");
    assert_eq!(drop.item.kind, ItemKind::Weapon);
    assert!(drop.equip);
}

#[test]
fn loot_armor_and_misses() {
    let armory = builtin_armory().unwrap();
    let mut dice = Dice::from_scripted(vec![0.1, 0.5, 0.0]);
    let drop = roll_loot(&mut dice, 2, &armory.weapons).unwrap();
    assert_eq!(drop.item, Item::new("Leather Armor", ItemKind::Armor, 100));
    assert!(!drop.equip);

    let mut dice = Dice::from_scripted(vec![0.5]);
    assert_eq!(roll_loot(&mut dice, 1, &armory.weapons), None);
}
