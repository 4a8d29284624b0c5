//! Turn sequencing for one battle: statuses, hero action, enemy actions,
//! then victory/defeat detection and rewards.

mod event;
pub mod rewards;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::abilities::phase::check_phase_transition;
use crate::abilities::special::{try_special_ability, SpecialOutcome};
use crate::abilities::{update_cooldowns, use_ability, AbilityKind};
use crate::combat::resolve_attack;
use crate::combatant::Combatant;
use crate::error::BattleError;
use crate::status::apply_status_effects;
use crate::weapon::Weapon;
use crate::Dice;

pub use event::BattleEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BattleStatus {
    Ongoing,
    HeroVictory,
    HeroDefeat,
}

impl fmt::Display for BattleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BattleStatus::Ongoing => "ONGOING",
            BattleStatus::HeroVictory => "HERO_VICTORY",
            BattleStatus::HeroDefeat => "HERO_DEFEAT",
        };
        f.write_str(s)
    }
}

/// What the hero does this turn. Ability targets are roster indices; an
/// empty list means "every living enemy".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HeroAction {
    Attack,
    Ability {
        name: String,
        #[serde(default)]
        targets: Vec<usize>,
    },
}

impl HeroAction {
    pub fn ability(name: impl Into<String>) -> Self {
        HeroAction::Ability { name: name.into(), targets: Vec::new() }
    }
}

/// Supplies the hero's action each turn (a menu, a policy, a script).
pub trait HeroActionProvider {
    fn choose_action(&mut self, state: &BattleState) -> HeroAction;
}

impl<F> HeroActionProvider for F
where
    F: FnMut(&BattleState) -> HeroAction,
{
    fn choose_action(&mut self, state: &BattleState) -> HeroAction {
        self(state)
    }
}

/// Called after any combatant's health changes, e.g. to redraw a health bar.
pub trait HealthObserver {
    fn health_changed(&mut self, combatant: &Combatant);
}

pub struct NoopObserver;

impl HealthObserver for NoopObserver {
    fn health_changed(&mut self, _combatant: &Combatant) {}
}

#[derive(Debug, Clone)]
pub struct BattleState {
    pub hero: Combatant,
    pub enemies: Vec<Combatant>,
    pub zone: u32,
    pub turn: u32,
    /// Weapons the post-battle loot roll may hand out.
    pub loot_pool: Vec<Weapon>,
    status: BattleStatus,
}

impl BattleState {
    pub fn new(hero: Combatant, enemies: Vec<Combatant>, zone: u32) -> Self {
        Self {
            hero,
            enemies,
            zone,
            turn: 0,
            loot_pool: Vec::new(),
            status: BattleStatus::Ongoing,
        }
    }

    pub fn with_loot_pool(mut self, weapons: Vec<Weapon>) -> Self {
        self.loot_pool = weapons;
        self
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn living_enemies(&self) -> Vec<usize> {
        self.enemies
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn first_living(&self) -> Option<usize> {
        self.enemies.iter().position(|e| e.is_alive())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub turn: u32,
    pub events: Vec<BattleEvent>,
    pub status: BattleStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleOutcome {
    pub status: BattleStatus,
    pub turns: u32,
    pub events: Vec<BattleEvent>,
}

pub fn run_battle_turn(state: &mut BattleState, action: HeroAction, dice: &mut Dice) -> TurnReport {
    run_battle_turn_observed(state, action, dice, &mut NoopObserver)
}

/// Run one full orchestrator turn. A finished battle is left untouched.
pub fn run_battle_turn_observed(
    state: &mut BattleState,
    action: HeroAction,
    dice: &mut Dice,
    observer: &mut dyn HealthObserver,
) -> TurnReport {
    let mut events = Vec::new();
    if state.status != BattleStatus::Ongoing {
        return TurnReport { turn: state.turn, events, status: state.status };
    }
    state.turn += 1;
    events.push(BattleEvent::TurnStarted { turn: state.turn });
    debug!(turn = state.turn, living = state.living_enemies().len(), "turn start");

    let before = health_snapshot(state);
    let alive = enemy_liveness(state);
    events.extend(apply_status_effects(&mut state.hero).into_iter().map(BattleEvent::Status));
    for enemy in state.enemies.iter_mut().filter(|e| e.is_alive()) {
        events.extend(apply_status_effects(enemy).into_iter().map(BattleEvent::Status));
    }
    update_cooldowns(&mut state.hero);
    notify_changes(state, &before, observer);
    report_defeats(state, &alive, &mut events);

    if !state.hero.is_alive() {
        events.push(BattleEvent::Defeated { name: state.hero.name.clone() });
        return conclude(state, BattleStatus::HeroDefeat, events, dice);
    }
    if state.first_living().is_none() {
        return conclude(state, BattleStatus::HeroVictory, events, dice);
    }

    let before = health_snapshot(state);
    let alive = enemy_liveness(state);
    hero_acts(state, action, dice, &mut events);
    notify_changes(state, &before, observer);
    report_defeats(state, &alive, &mut events);

    if state.first_living().is_none() {
        return conclude(state, BattleStatus::HeroVictory, events, dice);
    }

    // Minions summoned below join the roster but first act next turn.
    let roster = state.enemies.len();
    for i in 0..roster {
        if !state.enemies[i].is_alive() {
            continue;
        }
        let before = health_snapshot(state);
        enemy_acts(state, i, dice, &mut events);
        notify_changes(state, &before, observer);
        if !state.hero.is_alive() {
            events.push(BattleEvent::Defeated { name: state.hero.name.clone() });
            return conclude(state, BattleStatus::HeroDefeat, events, dice);
        }
    }

    for enemy in &mut state.enemies {
        update_cooldowns(enemy);
    }
    TurnReport { turn: state.turn, events, status: BattleStatus::Ongoing }
}

/// Drive turns until the battle is decided, asking `provider` for each hero action.
pub fn run_battle(
    state: &mut BattleState,
    provider: &mut dyn HeroActionProvider,
    observer: &mut dyn HealthObserver,
    dice: &mut Dice,
    max_turns: u32,
) -> Result<BattleOutcome, BattleError> {
    let mut events = Vec::new();
    while state.status == BattleStatus::Ongoing {
        if state.turn >= max_turns {
            return Err(BattleError::TurnLimit { turns: state.turn });
        }
        let action = provider.choose_action(state);
        let report = run_battle_turn_observed(state, action, dice, observer);
        events.extend(report.events);
    }
    Ok(BattleOutcome { status: state.status, turns: state.turn, events })
}

fn hero_acts(
    state: &mut BattleState,
    action: HeroAction,
    dice: &mut Dice,
    events: &mut Vec<BattleEvent>,
) {
    let (name, requested) = match action {
        HeroAction::Attack => return hero_basic_attack(state, dice, events),
        HeroAction::Ability { name, targets } => (name, targets),
    };

    let self_only = name.parse::<AbilityKind>().is_ok_and(|k| !k.uses_targets());
    let living = state.living_enemies();
    let chosen = if self_only {
        Vec::new()
    } else if requested.is_empty() {
        living.clone()
    } else {
        requested
    };
    if let Some(&index) = chosen.iter().find(|i| !living.contains(i)) {
        warn!(hero = %state.hero.name, index, "invalid target; falling back to basic attack");
        events.push(BattleEvent::InvalidTarget { actor: state.hero.name.clone(), index });
        return hero_basic_attack(state, dice, events);
    }

    let mut slots: Vec<Option<&mut Combatant>> = state.enemies.iter_mut().map(Some).collect();
    let mut targets: Vec<&mut Combatant> = chosen
        .iter()
        .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
        .collect();
    let actor = state.hero.name.clone();
    match use_ability(&mut state.hero, &name, &mut targets, dice) {
        Ok(outcome) => events.push(BattleEvent::Ability { actor, outcome }),
        Err(failure) => {
            debug!(hero = %actor, %failure, "ability unavailable");
            events.push(BattleEvent::AbilityFailed { actor, failure });
        }
    }
}

fn hero_basic_attack(state: &mut BattleState, dice: &mut Dice, events: &mut Vec<BattleEvent>) {
    let Some(i) = state.first_living() else {
        return;
    };
    let target = &mut state.enemies[i];
    let result = resolve_attack(&state.hero, target, dice);
    events.push(BattleEvent::Attack {
        attacker: state.hero.name.clone(),
        target: target.name.clone(),
        result,
    });
}

fn enemy_acts(state: &mut BattleState, i: usize, dice: &mut Dice, events: &mut Vec<BattleEvent>) {
    let actor = state.enemies[i].name.clone();
    if state.enemies[i].is_boss() {
        if let Some(t) = check_phase_transition(&mut state.enemies[i]) {
            events.push(BattleEvent::PhaseTransition(t));
        }
    }

    let basic_attack = match try_special_ability(&mut state.enemies[i], &mut state.hero, dice) {
        Some(SpecialOutcome::Summon) => {
            let minion = Combatant::minion_of(&state.enemies[i], dice);
            info!(summoner = %actor, minion = %minion.name, "minion summoned");
            events.push(BattleEvent::Special {
                actor: actor.clone(),
                outcome: SpecialOutcome::Summon,
            });
            events.push(BattleEvent::Summoned {
                summoner: actor.clone(),
                minion: minion.name.clone(),
            });
            state.enemies.push(minion);
            true
        }
        Some(outcome) => {
            events.push(BattleEvent::Special { actor: actor.clone(), outcome });
            false
        }
        None => true,
    };

    if basic_attack && state.hero.is_alive() {
        let result = resolve_attack(&state.enemies[i], &mut state.hero, dice);
        events.push(BattleEvent::Attack {
            attacker: actor,
            target: state.hero.name.clone(),
            result,
        });
    }
}

fn conclude(
    state: &mut BattleState,
    status: BattleStatus,
    mut events: Vec<BattleEvent>,
    dice: &mut Dice,
) -> TurnReport {
    state.status = status;
    if status == BattleStatus::HeroVictory {
        events.extend(rewards::award_victory(state, dice));
    }
    info!(%status, turns = state.turn, hero_hp = state.hero.health.hp, "battle over");
    events.push(BattleEvent::Outcome { status, turns: state.turn });
    TurnReport { turn: state.turn, events, status }
}

fn health_snapshot(state: &BattleState) -> Vec<i32> {
    std::iter::once(&state.hero)
        .chain(&state.enemies)
        .map(|c| c.health.hp)
        .collect()
}

fn enemy_liveness(state: &BattleState) -> Vec<bool> {
    state.enemies.iter().map(Combatant::is_alive).collect()
}

fn notify_changes(state: &BattleState, before: &[i32], observer: &mut dyn HealthObserver) {
    for (i, c) in std::iter::once(&state.hero).chain(&state.enemies).enumerate() {
        if before.get(i) != Some(&c.health.hp) {
            observer.health_changed(c);
        }
    }
}

fn report_defeats(state: &BattleState, alive_before: &[bool], events: &mut Vec<BattleEvent>) {
    for (enemy, was_alive) in state.enemies.iter().zip(alive_before) {
        if *was_alive && !enemy.is_alive() {
            events.push(BattleEvent::Defeated { name: enemy.name.clone() });
        }
    }
}
