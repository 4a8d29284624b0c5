//! Cooldown-gated actions: hero abilities here, enemy specials in [`special`],
//! boss escalation in [`phase`].

pub mod phase;
pub mod special;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::combatant::Combatant;
use crate::weapon::roll_damage;
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    HeroicStrike,
    QuickRecovery,
    Whirlwind,
}

impl AbilityKind {
    pub const ALL: [AbilityKind; 3] = [
        AbilityKind::HeroicStrike,
        AbilityKind::QuickRecovery,
        AbilityKind::Whirlwind,
    ];

    pub fn id(self) -> &'static str {
        match self {
            AbilityKind::HeroicStrike => "heroic_strike",
            AbilityKind::QuickRecovery => "quick_recovery",
            AbilityKind::Whirlwind => "whirlwind",
        }
    }

    pub fn default_slot(self) -> AbilitySlot {
        match self {
            AbilityKind::HeroicStrike => AbilitySlot::new(1, 3),
            AbilityKind::QuickRecovery => AbilitySlot::new(3, 5),
            AbilityKind::Whirlwind => AbilitySlot::new(5, 7),
        }
    }

    /// Whether the ability acts on enemy targets. Self-only abilities ignore
    /// any target indices they are given.
    pub fn uses_targets(self) -> bool {
        !matches!(self, AbilityKind::QuickRecovery)
    }

    /// The hero's ability table in menu order.
    pub fn hero_table() -> IndexMap<AbilityKind, AbilitySlot> {
        Self::ALL.iter().map(|k| (*k, k.default_slot())).collect()
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbilityKind::HeroicStrike => "Heroic Strike",
            AbilityKind::QuickRecovery => "Quick Recovery",
            AbilityKind::Whirlwind => "Whirlwind",
        };
        f.write_str(s)
    }
}

impl FromStr for AbilityKind {
    type Err = AbilityFailure;

    /// Accepts both `heroic_strike` and `Heroic Strike` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        AbilityKind::ALL
            .into_iter()
            .find(|k| k.id() == key)
            .ok_or_else(|| AbilityFailure::UnknownAbility { name: s.to_string() })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub unlock_level: u32,
    pub cooldown_remaining: u32,
    pub cooldown_max: u32,
}

impl AbilitySlot {
    pub fn new(unlock_level: u32, cooldown_max: u32) -> Self {
        Self { unlock_level, cooldown_remaining: 0, cooldown_max }
    }

    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= self.unlock_level
    }

    pub fn is_ready(&self, level: u32) -> bool {
        self.is_unlocked(level) && self.cooldown_remaining == 0
    }
}

/// Why an ability could not be used. No state is touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbilityFailure {
    #[error("{ability} unlocks at level {unlock_level}")]
    NotUnlocked { ability: AbilityKind, unlock_level: u32 },
    #[error("{ability} is on cooldown for {remaining} more turns")]
    OnCooldown { ability: AbilityKind, remaining: u32 },
    #[error("no target for {ability}")]
    NoTarget { ability: AbilityKind },
    #[error("unknown ability '{name}'")]
    UnknownAbility { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityHit {
    pub target: String,
    pub damage: i32,
    pub defeated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbilityOutcome {
    pub ability: AbilityKind,
    pub hits: Vec<AbilityHit>,
    pub healed: i32,
}

pub type AbilityResult = Result<AbilityOutcome, AbilityFailure>;

/// Use the named ability against `targets`. Ability damage is direct: no crit,
/// dodge or defense applies.
pub fn use_ability(
    actor: &mut Combatant,
    name: &str,
    targets: &mut [&mut Combatant],
    dice: &mut Dice,
) -> AbilityResult {
    let unknown = || AbilityFailure::UnknownAbility { name: name.to_string() };
    let ability: AbilityKind = name.parse().map_err(|_| unknown())?;
    let slot = *actor.abilities.get(&ability).ok_or_else(unknown)?;

    if !slot.is_unlocked(actor.level) {
        return Err(AbilityFailure::NotUnlocked { ability, unlock_level: slot.unlock_level });
    }
    if slot.cooldown_remaining > 0 {
        return Err(AbilityFailure::OnCooldown { ability, remaining: slot.cooldown_remaining });
    }

    let mut outcome = AbilityOutcome { ability, hits: Vec::new(), healed: 0 };
    match ability {
        AbilityKind::HeroicStrike => {
            let target = targets.first_mut().ok_or(AbilityFailure::NoTarget { ability })?;
            let damage = roll_damage(dice, &actor.weapon) * 2;
            outcome.hits.push(strike(target, damage));
        }
        AbilityKind::QuickRecovery => {
            outcome.healed = actor.health.heal(actor.health.max_hp / 3);
        }
        AbilityKind::Whirlwind => {
            if targets.is_empty() {
                return Err(AbilityFailure::NoTarget { ability });
            }
            let damage = roll_damage(dice, &actor.weapon) / 2;
            for target in targets.iter_mut() {
                outcome.hits.push(strike(target, damage));
            }
        }
    }

    if let Some(slot) = actor.abilities.get_mut(&ability) {
        slot.cooldown_remaining = slot.cooldown_max;
    }
    debug!(
        actor = %actor.name,
        %ability,
        hits = outcome.hits.len(),
        healed = outcome.healed,
        "ability used"
    );
    Ok(outcome)
}

fn strike(target: &mut Combatant, damage: i32) -> AbilityHit {
    target.health.apply_damage(damage);
    AbilityHit {
        target: target.name.clone(),
        damage,
        defeated: !target.is_alive(),
    }
}

/// Tick every running cooldown the combatant owns down by one.
pub fn update_cooldowns(combatant: &mut Combatant) {
    for slot in combatant.abilities.values_mut() {
        slot.cooldown_remaining = slot.cooldown_remaining.saturating_sub(1);
    }
}
