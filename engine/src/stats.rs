use serde::{Deserialize, Serialize};

pub const BASE_STAT: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Strength,
    Defense,
    Speed,
}

/// Base stats plus the temporary bonuses granted by buffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: i32,
    pub defense: i32,
    pub speed: i32,
    #[serde(default)]
    pub strength_bonus: i32,
    #[serde(default)]
    pub defense_bonus: i32,
    #[serde(default)]
    pub speed_bonus: i32,
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new(BASE_STAT, BASE_STAT, BASE_STAT)
    }
}

/// Effective stat = base + bonus. Bonuses are additive only.
pub fn effective_stat(base: i32, bonus: i32) -> i32 {
    base + bonus
}

impl StatBlock {
    pub fn new(strength: i32, defense: i32, speed: i32) -> Self {
        Self {
            strength,
            defense,
            speed,
            strength_bonus: 0,
            defense_bonus: 0,
            speed_bonus: 0,
        }
    }

    /// Level scaling for regular enemies: +2 STR, +1 DEF, +1 SPD per level above 1.
    pub fn for_enemy_level(level: u32) -> Self {
        let above = level.saturating_sub(1) as i32;
        Self::new(BASE_STAT + 2 * above, BASE_STAT + above, BASE_STAT + above)
    }

    pub fn base(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Defense => self.defense,
            Stat::Speed => self.speed,
        }
    }

    pub fn bonus(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Strength => self.strength_bonus,
            Stat::Defense => self.defense_bonus,
            Stat::Speed => self.speed_bonus,
        }
    }

    pub fn effective(&self, stat: Stat) -> i32 {
        effective_stat(self.base(stat), self.bonus(stat))
    }

    pub fn raise_base(&mut self, stat: Stat, by: i32) {
        match stat {
            Stat::Strength => self.strength += by,
            Stat::Defense => self.defense += by,
            Stat::Speed => self.speed += by,
        }
    }

    pub fn set_bonus(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Strength => self.strength_bonus = value,
            Stat::Defense => self.defense_bonus = value,
            Stat::Speed => self.speed_bonus = value,
        }
    }

    pub fn clear_bonuses(&mut self) {
        self.strength_bonus = 0;
        self.defense_bonus = 0;
        self.speed_bonus = 0;
    }
}
