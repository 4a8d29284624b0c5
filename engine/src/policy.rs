use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::abilities::AbilityKind;
use crate::battle::{BattleState, HeroAction, HeroActionProvider};

/// Below this health fraction the auto policy heals when it can.
const HEAL_BELOW: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyChoice {
    #[default]
    Auto,
    AttackOnly,
}

impl PolicyChoice {
    pub fn provider(self) -> Box<dyn HeroActionProvider> {
        match self {
            PolicyChoice::Auto => Box::new(AutoPolicy),
            PolicyChoice::AttackOnly => Box::new(AttackOnlyPolicy),
        }
    }
}

/// Heal when low, sweep crowds, open with a heroic strike, else attack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoPolicy;

impl HeroActionProvider for AutoPolicy {
    fn choose_action(&mut self, state: &BattleState) -> HeroAction {
        let hero = &state.hero;
        let living = state.living_enemies();

        if hero.health.fraction() < HEAL_BELOW && hero.ability_ready(AbilityKind::QuickRecovery) {
            return HeroAction::ability(AbilityKind::QuickRecovery.id());
        }
        if living.len() >= 2 && hero.ability_ready(AbilityKind::Whirlwind) {
            return HeroAction::Ability {
                name: AbilityKind::Whirlwind.id().into(),
                targets: living,
            };
        }
        if let Some(&first) = living.first() {
            if hero.ability_ready(AbilityKind::HeroicStrike) {
                return HeroAction::Ability {
                    name: AbilityKind::HeroicStrike.id().into(),
                    targets: vec![first],
                };
            }
        }
        HeroAction::Attack
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackOnlyPolicy;

impl HeroActionProvider for AttackOnlyPolicy {
    fn choose_action(&mut self, _state: &BattleState) -> HeroAction {
        HeroAction::Attack
    }
}

/// Replays a fixed list of actions, then attacks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPolicy {
    actions: VecDeque<HeroAction>,
}

impl ScriptedPolicy {
    pub fn new(actions: impl IntoIterator<Item = HeroAction>) -> Self {
        Self { actions: actions.into_iter().collect() }
    }
}

impl HeroActionProvider for ScriptedPolicy {
    fn choose_action(&mut self, _state: &BattleState) -> HeroAction {
        self.actions.pop_front().unwrap_or(HeroAction::Attack)
    }
}
