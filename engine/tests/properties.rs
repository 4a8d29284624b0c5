use delve_engine::combat::dodge_chance;
use delve_engine::life::Health;
use delve_engine::stats::Stat;
use delve_engine::{resolve_attack, Combatant, DamageRange, Dice, Role, Weapon};
use proptest::prelude::*;

fn fighter(hp: i32, lo: i32, hi: i32, speed_bonus: i32) -> Combatant {
    let weapon = Weapon::new("W", "sharp", DamageRange::new(lo, hi), 0);
    let mut c = Combatant::new("P", Role::Enemy, hp, weapon);
    c.stats.set_bonus(Stat::Speed, speed_bonus);
    c
}

proptest! {
    #[test]
    fn health_stays_in_bounds(max in 1i32..500, ops in prop::collection::vec(-200i32..200, 0..40)) {
        let mut h = Health::new(max);
        for op in ops {
            if op < 0 {
                h.apply_damage(-op);
            } else {
                h.heal(op);
            }
            prop_assert!(h.hp >= 0 && h.hp <= h.max_hp);
        }
    }

    #[test]
    fn landed_hits_deal_at_least_one(
        seed in any::<u64>(),
        lo in 0i32..30,
        span in 0i32..30,
        hp in 1i32..200,
    ) {
        let attacker = fighter(10, lo, lo + span, 0);
        let mut target = fighter(hp, 1, 1, 0);
        let mut dice = Dice::from_seed(seed);
        let res = resolve_attack(&attacker, &mut target, &mut dice);
        if res.dodged {
            prop_assert_eq!(res.damage, 0);
            prop_assert_eq!(target.health.hp, hp);
        } else {
            prop_assert!(res.damage >= 1);
            prop_assert_eq!(target.health.hp, (hp - res.damage).max(0));
            prop_assert_eq!(res.target_defeated, target.health.hp == 0);
        }
    }

    #[test]
    fn dodge_chance_in_range(a in -20i32..60, b in -20i32..60) {
        let p = dodge_chance(&fighter(10, 1, 1, a), &fighter(10, 1, 1, b));
        prop_assert!((0.0..=0.25).contains(&p));
    }

    #[test]
    fn scripted_ranges_stay_inside_bounds(u in 0.0f64..1.0, lo in -50i32..50, span in 0i32..100) {
        let mut dice = Dice::from_scripted(vec![u]);
        let v = dice.range(lo, lo + span);
        prop_assert!(v >= lo && v <= lo + span);
    }
}
