use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combatant::Combatant;
use crate::stats::Stat;

pub const STANDARD_THRESHOLDS: [f64; 3] = [0.7, 0.4, 0.2];
pub const PHASE_STRENGTH_BUFF: i32 = 3;
pub const PHASE_DEFENSE_BUFF: i32 = 2;

/// Boss escalation: `index` only moves forward and never passes `thresholds.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub thresholds: Vec<f64>,
    pub index: usize,
    pub phase: u32,
}

impl PhaseState {
    pub fn new(thresholds: Vec<f64>) -> Self {
        Self { thresholds, index: 0, phase: 1 }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_THRESHOLDS.to_vec())
    }

    pub fn is_final(&self) -> bool {
        self.index >= self.thresholds.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseTransition {
    pub boss: String,
    pub phase: u32,
}

/// Advance at most one phase if health has fallen to the next threshold.
pub fn check_phase_transition(boss: &mut Combatant) -> Option<PhaseTransition> {
    let fraction = boss.health.fraction();
    let state = boss.phase.as_mut()?;
    let threshold = *state.thresholds.get(state.index)?;
    if fraction > threshold {
        return None;
    }

    state.index += 1;
    state.phase += 1;
    let phase = state.phase;
    boss.stats.raise_base(Stat::Strength, PHASE_STRENGTH_BUFF);
    boss.stats.raise_base(Stat::Defense, PHASE_DEFENSE_BUFF);
    info!(boss = %boss.name, phase, "phase transition");
    Some(PhaseTransition { boss: boss.name.clone(), phase })
}
