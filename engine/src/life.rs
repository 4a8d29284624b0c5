use serde::{Deserialize, Serialize};

/// A clamped health pool: `0 <= hp <= max_hp` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub hp: i32,
    pub max_hp: i32,
}

impl Health {
    pub fn new(max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self { hp: max_hp, max_hp }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Apply damage, clamping at 0. Returns true if the pool dropped to 0 this call.
    pub fn apply_damage(&mut self, dmg: i32) -> bool {
        let before = self.hp;
        self.hp = (self.hp - dmg.max(0)).max(0);
        before > 0 && self.hp == 0
    }

    /// Heal up to `max_hp`; returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_full(&mut self) {
        self.hp = self.max_hp;
    }

    pub fn raise_max(&mut self, by: i32) {
        self.max_hp = (self.max_hp + by).max(1);
        self.hp = self.hp.min(self.max_hp);
    }

    /// Set current health directly, clamped into range.
    pub fn set(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }
}
