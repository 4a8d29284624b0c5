use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::combatant::Combatant;

pub const BURN_TURNS: u32 = 3;
pub const POISON_TURNS: u32 = 3;
pub const FREEZE_TURNS: u32 = 2;
/// Speed lost while frozen; applies to dodge rolls on both sides of an attack.
pub const FREEZE_SPEED_PENALTY: i32 = 2;

/// Variant order is the tick order: burn, freeze, poison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Burn,
    Freeze,
    Poison,
}

impl StatusKind {
    pub fn deals_damage(self) -> bool {
        matches!(self, StatusKind::Burn | StatusKind::Poison)
    }

    /// Fresh state installed when a hit for `final_damage` triggers this effect.
    pub fn on_hit(self, final_damage: i32) -> StatusState {
        let dmg = final_damage.max(0);
        match self {
            StatusKind::Burn => StatusState { remaining_turns: BURN_TURNS, magnitude: dmg / 4 },
            StatusKind::Poison => StatusState { remaining_turns: POISON_TURNS, magnitude: dmg / 3 },
            StatusKind::Freeze => StatusState { remaining_turns: FREEZE_TURNS, magnitude: 0 },
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusKind::Burn => "burn",
            StatusKind::Freeze => "freeze",
            StatusKind::Poison => "poison",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusState {
    pub remaining_turns: u32,
    pub magnitude: i32,
}

impl StatusState {
    /// The state after one more turn has elapsed, or `None` once it runs out.
    pub fn ticked(self) -> Option<Self> {
        let remaining_turns = self.remaining_turns.saturating_sub(1);
        (remaining_turns > 0).then_some(Self { remaining_turns, ..self })
    }
}

pub type StatusMap = BTreeMap<StatusKind, StatusState>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StatusEvent {
    Damage {
        target: String,
        kind: StatusKind,
        amount: i32,
        health: i32,
    },
    Expired {
        target: String,
        kind: StatusKind,
    },
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Damage { target, kind, amount, health } => {
                write!(f, "[STATUS][{}] takes {} from {} ({} HP)", target, amount, kind, health)
            }
            StatusEvent::Expired { target, kind } => {
                write!(f, "[STATUS][{}] {} wears off", target, kind)
            }
        }
    }
}

/// Tick every active effect on `combatant` once, in `StatusKind` order.
pub fn apply_status_effects(combatant: &mut Combatant) -> Vec<StatusEvent> {
    let mut events = Vec::new();
    let active: Vec<(StatusKind, StatusState)> =
        combatant.statuses.iter().map(|(k, s)| (*k, *s)).collect();

    for (kind, state) in active {
        if kind.deals_damage() {
            combatant.health.apply_damage(state.magnitude);
            debug!(
                combatant = %combatant.name,
                %kind,
                amount = state.magnitude,
                hp = combatant.health.hp,
                "status tick"
            );
            events.push(StatusEvent::Damage {
                target: combatant.name.clone(),
                kind,
                amount: state.magnitude,
                health: combatant.health.hp,
            });
        }

        match state.ticked() {
            Some(next) => {
                combatant.statuses.insert(kind, next);
            }
            None => {
                combatant.statuses.remove(&kind);
                events.push(StatusEvent::Expired {
                    target: combatant.name.clone(),
                    kind,
                });
            }
        }
    }

    events
}

/// Install (or overwrite) `kind` on a target hit for `final_damage`.
pub fn install(statuses: &mut StatusMap, kind: StatusKind, final_damage: i32) -> StatusState {
    let state = kind.on_hit(final_damage);
    statuses.insert(kind, state);
    state
}

pub fn speed_penalty(statuses: &StatusMap) -> i32 {
    if statuses.contains_key(&StatusKind::Freeze) {
        FREEZE_SPEED_PENALTY
    } else {
        0
    }
}
