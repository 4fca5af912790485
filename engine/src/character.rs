use serde::{Deserialize, Serialize};

/// Flat damage added to every regular attack.
pub const BASE_DAMAGE: i32 = 5;
/// Fixed damage of a super attack, independent of stats.
pub const SUPER_ATTACK_DAMAGE: i32 = 10;
/// Defense gained per defend action.
pub const DEFENSE_STEP: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub health: i32,
    pub intelligence: i32,
    pub defense: i32,
}

impl Character {
    /// Negative starting health is clamped to 0.
    pub fn new(name: impl Into<String>, health: i32, intelligence: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            health: health.max(0),
            intelligence,
            defense,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Damage this character's regular attack deals against `other`.
    ///
    /// Computed in `i64` and capped at `i32::MAX`, so extreme stats cannot overflow.
    pub fn attack_damage(&self, other: &Character) -> i32 {
        let gap = (i64::from(self.intelligence) - i64::from(other.defense)).abs();
        let dmg = gap.max(0) + i64::from(BASE_DAMAGE);
        i32::try_from(dmg).unwrap_or(i32::MAX)
    }

    /// Returns the health actually removed from `other`.
    pub fn attack(&self, other: &mut Character) -> i32 {
        let dmg = self.attack_damage(other);
        other.take_damage(dmg)
    }

    /// Saturates at `i32::MAX`.
    pub fn increase_defense(&mut self) {
        self.defense = self.defense.saturating_add(DEFENSE_STEP);
    }

    /// Returns the health actually removed from `other`.
    pub fn super_attack(&self, other: &mut Character) -> i32 {
        other.take_damage(SUPER_ATTACK_DAMAGE)
    }

    fn take_damage(&mut self, dmg: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_sub(dmg).max(0);
        before - self.health
    }
}
