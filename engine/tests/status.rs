use delve_engine::status::{install, StatusState};
use delve_engine::{apply_status_effects, Combatant, Role, StatusEvent, StatusKind, Weapon};

fn dummy(hp: i32) -> Combatant {
    Combatant::new("Rat", Role::Enemy, hp, Weapon::fists())
}

#[test]
fn burn_ticks_then_wears_off() {
    let mut rat = dummy(20);
    install(&mut rat.statuses, StatusKind::Burn, 8);

    let first = apply_status_effects(&mut rat);
    assert_eq!(
        first,
        vec![StatusEvent::Damage {
            target: "Rat".into(),
            kind: StatusKind::Burn,
            amount: 2,
            health: 18,
        }]
    );
    assert_eq!(first[0].to_string(), "[STATUS][Rat] takes 2 from burn (18 HP)");
    assert_eq!(rat.statuses[&StatusKind::Burn].remaining_turns, 2);

    apply_status_effects(&mut rat);
    let last = apply_status_effects(&mut rat);
    assert_eq!(rat.health.hp, 14);
    assert!(rat.statuses.is_empty());
    assert_eq!(
        last.last().map(ToString::to_string).as_deref(),
        Some("[STATUS][Rat] burn wears off")
    );
}

#[test]
fn final_poison_tick_deals_damage_and_expires() {
    let mut rat = dummy(10);
    rat.statuses.insert(StatusKind::Poison, StatusState { remaining_turns: 1, magnitude: 4 });

    let events = apply_status_effects(&mut rat);
    assert_eq!(rat.health.hp, 6);
    assert!(!rat.statuses.contains_key(&StatusKind::Poison));
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], StatusEvent::Expired { kind: StatusKind::Poison, .. }));
}

#[test]
fn effects_tick_in_kind_order() {
    let mut rat = dummy(50);
    install(&mut rat.statuses, StatusKind::Poison, 9);
    install(&mut rat.statuses, StatusKind::Burn, 8);

    let kinds: Vec<StatusKind> = apply_status_effects(&mut rat)
        .into_iter()
        .filter_map(|e| match e {
            StatusEvent::Damage { kind, .. } => Some(kind),
            StatusEvent::Expired { .. } => None,
        })
        .collect();
    assert_eq!(kinds, vec![StatusKind::Burn, StatusKind::Poison]);
    assert_eq!(rat.health.hp, 45);
}

#[test]
fn freeze_deals_no_damage() {
    let mut rat = dummy(10);
    install(&mut rat.statuses, StatusKind::Freeze, 40);
    assert!(apply_status_effects(&mut rat).is_empty());
    let events = apply_status_effects(&mut rat);
    assert_eq!(
        events,
        vec![StatusEvent::Expired { target: "Rat".into(), kind: StatusKind::Freeze }]
    );
    assert_eq!(rat.health.hp, 10);
}

#[test]
fn reapplying_overwrites_instead_of_stacking() {
    let mut rat = dummy(10);
    install(&mut rat.statuses, StatusKind::Burn, 20);
    apply_status_effects(&mut rat);
    install(&mut rat.statuses, StatusKind::Burn, 4);
    assert_eq!(rat.statuses[&StatusKind::Burn], StatusState { remaining_turns: 3, magnitude: 1 });
}

#[test]
fn status_damage_can_kill() {
    let mut rat = dummy(1);
    rat.statuses.insert(StatusKind::Burn, StatusState { remaining_turns: 3, magnitude: 5 });
    apply_status_effects(&mut rat);
    assert_eq!(rat.health.hp, 0);
    assert!(!rat.is_alive());
}

#[test]
fn status_event_serializes_with_tag() {
    let ev = StatusEvent::Expired { target: "Rat".into(), kind: StatusKind::Freeze };
    let v = serde_json::to_value(&ev).unwrap();
    assert_eq!(v, serde_json::json!({ "event": "expired", "target": "Rat", "kind": "freeze" }));
}
