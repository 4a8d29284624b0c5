use tracing::info;

use crate::items::roll_loot;
use crate::progression::{add_coins, add_experience, add_item, equip};
use crate::Dice;

use super::{BattleEvent, BattleState};

/// Experience per zone level granted for an enemy with no configured reward.
pub const DEFAULT_XP_PER_ZONE: u32 = 10;
const DEFAULT_COINS: (i32, i32) = (5, 15);
/// Fraction of max health the hero recovers after a win.
const RECOVERY_DIVISOR: i32 = 5;

/// Pay out a won battle: experience and coins for every enemy on the roster,
/// the bonus loot roll, and the post-battle recovery.
pub fn award_victory(state: &mut BattleState, dice: &mut Dice) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    let zone = state.zone.max(1);

    let mut experience = 0u32;
    let mut coins = 0u32;
    for enemy in &state.enemies {
        match enemy.rewards {
            Some(r) => {
                experience += r.experience;
                coins += r.coins;
            }
            None => {
                experience += DEFAULT_XP_PER_ZONE * zone;
                coins += dice.range(DEFAULT_COINS.0, DEFAULT_COINS.1) as u32 * zone;
            }
        }
    }
    info!(hero = %state.hero.name, experience, coins, "rewards");
    events.push(BattleEvent::Rewards { hero: state.hero.name.clone(), experience, coins });

    for up in add_experience(&mut state.hero, experience) {
        events.push(BattleEvent::LevelUp(up));
    }
    add_coins(&mut state.hero, coins);

    if let Some(loot) = roll_loot(dice, zone, &state.loot_pool) {
        add_item(&mut state.hero, loot.item.clone());
        if loot.equip {
            if let Some(weapon) = &loot.item.weapon {
                equip(&mut state.hero, weapon.clone());
            }
        }
        events.push(BattleEvent::Loot(loot));
    }

    let healed = state.hero.health.heal(state.hero.health.max_hp / RECOVERY_DIVISOR);
    if healed > 0 {
        events.push(BattleEvent::Recovered { hero: state.hero.name.clone(), amount: healed });
    }
    events
}
