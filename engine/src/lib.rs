use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod abilities;
pub mod api;
pub mod battle;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod error;
pub mod items;
pub mod life;
pub mod logging;
pub mod policy;
pub mod progression;
pub mod stats;
pub mod status;
pub mod weapon;
pub mod zone;

pub use abilities::{use_ability, update_cooldowns, AbilityKind, AbilityOutcome, AbilityResult};
pub use battle::{run_battle, run_battle_turn, BattleEvent, BattleState, BattleStatus, HeroAction};
pub use combat::{resolve_attack, AttackResult};
pub use combatant::{Combatant, Role};
pub use status::{apply_status_effects, StatusEvent, StatusKind};
pub use weapon::{roll_damage, roll_special_effect, DamageRange, Weapon};

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { values: Vec<f64>, next: usize },
}

/// The single random source every combat operation draws from.
///
/// A seeded `Dice` replays identically for the same seed. A scripted `Dice`
/// replays a fixed list of unit values (each in `[0, 1)`), one per draw,
/// cycling when the list runs out; tests use it to force crits, dodges and picks.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    pub fn from_scripted(values: Vec<f64>) -> Self {
        Self { source: Source::Scripted { values, next: 0 } }
    }

    /// Uniform integer in `lo..=hi` (bounds may come in either order).
    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(lo..=hi),
            Source::Scripted { values, next } => {
                let u = scripted_unit(values, next);
                let span = i64::from(hi) - i64::from(lo);
                let offset = ((u * (span + 1) as f64) as i64).min(span);
                (i64::from(lo) + offset) as i32
            }
        }
    }

    /// True with probability `p` (clamped into `[0, 1]`).
    pub fn chance(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_bool(p),
            Source::Scripted { values, next } => scripted_unit(values, next) < p,
        }
    }

    /// Uniform index into a collection of `len` items; 0 when `len` is 0.
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0..len),
            Source::Scripted { values, next } => {
                let u = scripted_unit(values, next);
                ((u * len as f64) as usize).min(len - 1)
            }
        }
    }
}

fn scripted_unit(values: &[f64], next: &mut usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let u = values[*next % values.len()];
    *next += 1;
    u.clamp(0.0, 1.0 - f64::EPSILON)
}
