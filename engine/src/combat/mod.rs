pub mod attack;

pub use attack::{dodge_chance, resolve_attack, AttackResult, CRIT_CHANCE};
