//! Hero entity - A player-controlled adventurer
//!
//! Heroes are owned by the hero store; the engine holds a transient copy for
//! the session and expects the store to be told about every mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::HeroId;

/// A player's hero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    /// Unique within the game
    pub name: String,
    /// Id of the player on the chat platform, when known
    pub external_id: Option<String>,
    /// May drop to or below zero, meaning defeated
    pub health: i32,
    /// Monotonically non-decreasing
    pub experience: u32,
    pub joined_at: DateTime<Utc>,
}

impl Hero {
    /// Health a hero starts a session with
    pub const BASELINE_HEALTH: i32 = 20;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: HeroId::new(),
            name: name.into(),
            external_id: None,
            health: Self::BASELINE_HEALTH,
            experience: 0,
            joined_at: Utc::now(),
        }
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Back to full baseline health, called when a session picks the hero up.
    pub fn reset_health(&mut self) {
        self.health = Self::BASELINE_HEALTH;
    }

    pub fn gain_experience(&mut self, amount: u32) {
        self.experience += amount;
    }

    /// A counter-hit always costs exactly one health.
    pub fn take_hit(&mut self) {
        self.health -= 1;
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hero_starts_at_baseline() {
        let hero = Hero::new("Aldric").with_external_id("chat-1234");
        assert_eq!(hero.health, Hero::BASELINE_HEALTH);
        assert_eq!(hero.experience, 0);
        assert_eq!(hero.external_id.as_deref(), Some("chat-1234"));
        assert!(!hero.is_defeated());
    }

    #[test]
    fn test_health_can_drop_below_zero() {
        let mut hero = Hero::new("Mira");
        for _ in 0..Hero::BASELINE_HEALTH + 1 {
            hero.take_hit();
        }
        assert_eq!(hero.health, -1);
        assert!(hero.is_defeated());
        hero.reset_health();
        assert_eq!(hero.health, Hero::BASELINE_HEALTH);
    }
}
