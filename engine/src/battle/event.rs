use std::fmt;

use serde::Serialize;

use crate::abilities::phase::PhaseTransition;
use crate::abilities::special::SpecialOutcome;
use crate::abilities::{AbilityFailure, AbilityOutcome};
use crate::combat::AttackResult;
use crate::items::LootDrop;
use crate::progression::LevelUp;
use crate::status::StatusEvent;

use super::BattleStatus;

/// Everything the orchestrator reports; a presentation layer renders these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum BattleEvent {
    TurnStarted { turn: u32 },
    Status(StatusEvent),
    Attack { attacker: String, target: String, result: AttackResult },
    Ability { actor: String, outcome: AbilityOutcome },
    AbilityFailed { actor: String, failure: AbilityFailure },
    InvalidTarget { actor: String, index: usize },
    PhaseTransition(PhaseTransition),
    Special { actor: String, outcome: SpecialOutcome },
    Summoned { summoner: String, minion: String },
    Defeated { name: String },
    Rewards { hero: String, experience: u32, coins: u32 },
    LevelUp(LevelUp),
    Loot(LootDrop),
    Recovered { hero: String, amount: i32 },
    Outcome { status: BattleStatus, turns: u32 },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleEvent::TurnStarted { turn } => write!(f, "[TURN] {}", turn),
            BattleEvent::Status(ev) => write!(f, "{}", ev),
            BattleEvent::Attack { attacker, target, result } => {
                if result.dodged {
                    return write!(f, "[ATTACK][{}] {} dodged", attacker, target);
                }
                write!(f, "[ATTACK][{}] hits {} for {}", attacker, target, result.damage)?;
                if result.is_critical {
                    write!(f, " CRIT!")?;
                }
                if let Some(kind) = result.effect_applied {
                    write!(f, " +{}", kind)?;
                }
                Ok(())
            }
            BattleEvent::Ability { actor, outcome } => {
                write!(f, "[ABILITY][{}] {}", actor, outcome.ability)?;
                for hit in &outcome.hits {
                    write!(f, " -> {} for {}", hit.target, hit.damage)?;
                }
                if outcome.healed > 0 {
                    write!(f, " heals {}", outcome.healed)?;
                }
                Ok(())
            }
            BattleEvent::AbilityFailed { actor, failure } => {
                write!(f, "[ABILITY][{}] failed: {}", actor, failure)
            }
            BattleEvent::InvalidTarget { actor, index } => {
                write!(f, "[TARGET][{}] no living enemy at {}; attacking instead", actor, index)
            }
            BattleEvent::PhaseTransition(t) => {
                write!(f, "[PHASE][{}] enters phase {}", t.boss, t.phase)
            }
            BattleEvent::Special { actor, outcome } => match outcome {
                SpecialOutcome::Damage { ability, target, amount, .. } => {
                    write!(f, "[SPECIAL][{}] {} hits {} for {}", actor, ability, target, amount)
                }
                SpecialOutcome::Heal { ability, amount } => {
                    write!(f, "[SPECIAL][{}] {} +{} HP", actor, ability, amount)
                }
                SpecialOutcome::Summon => write!(f, "[SPECIAL][{}] SUMMON MINION", actor),
            },
            BattleEvent::Summoned { summoner, minion } => {
                write!(f, "[SUMMON][{}] {} joins the fight", summoner, minion)
            }
            BattleEvent::Defeated { name } => write!(f, "[DOWN][{}] defeated", name),
            BattleEvent::Rewards { hero, experience, coins } => {
                write!(f, "[REWARD][{}] +{} xp, +{} coins", hero, experience, coins)
            }
            BattleEvent::LevelUp(up) => {
                write!(f, "[LEVEL] now level {}", up.level)?;
                for kind in &up.unlocked {
                    write!(f, " (unlocked {})", kind)?;
                }
                Ok(())
            }
            BattleEvent::Loot(drop) => {
                write!(f, "[LOOT] {}", drop.item.name)?;
                if drop.equip {
                    write!(f, " (equipped)")?;
                }
                Ok(())
            }
            BattleEvent::Recovered { hero, amount } => {
                write!(f, "[HEAL][{}] recovers {} HP", hero, amount)
            }
            BattleEvent::Outcome { status, turns } => write!(f, "[END] {} turns={}", status, turns),
        }
    }
}
