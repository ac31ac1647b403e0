//! Enemy species and spawned enemy instances
//!
//! A species is the prototype declared once in campaign content. Combat only
//! ever happens against an instance produced by [`EnemySpecies::spawn`]:
//! fresh health and an empty damage ledger, so two areas referencing the
//! same species never share mutable state.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ElementalKind, HeroId};

/// An enemy prototype: declared once, never fought directly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpecies {
    pub name: String,
    pub max_health: i32,
    /// Base experience split among everyone who damaged a spawned instance
    pub experience: u32,
    /// The instance's own elemental kind, if any. Attacks of this kind are
    /// resisted; attacks of this kind's weakness deal bonus damage.
    pub kind: Option<ElementalKind>,
}

impl EnemySpecies {
    pub fn new(name: impl Into<String>, max_health: i32, experience: u32) -> Self {
        Self {
            name: name.into(),
            max_health,
            experience,
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: ElementalKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Spawn a fresh instance of this species.
    pub fn spawn(&self) -> Enemy {
        Enemy {
            species: self.clone(),
            health: self.max_health,
            damage_ledger: Vec::new(),
        }
    }
}

/// How the enemy reacted to a single wound
#[derive(Debug, Clone, Copy, Default)]
pub struct WoundOutcome {
    /// The attack matched the enemy's declared weakness: bonus damage
    pub weak: bool,
    /// The attack matched the enemy's own kind: damage resisted
    pub strong: bool,
}

/// A spawned, fightable enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    species: EnemySpecies,
    health: i32,
    /// Cumulative damage per hero, in first-hit order
    damage_ledger: Vec<(HeroId, u32)>,
}

impl Enemy {
    pub fn name(&self) -> &str {
        &self.species.name
    }

    pub fn kind(&self) -> Option<ElementalKind> {
        self.species.kind
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn experience_value(&self) -> u32 {
        self.species.experience
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply one wound. Base damage is 1, +1 when the attack kind matches
    /// this enemy's weakness, -1 (floored at zero) when it matches the
    /// enemy's own kind. The attacker is recorded in the damage ledger.
    pub fn wound(
        &mut self,
        attacker: Option<HeroId>,
        attack_kind: Option<ElementalKind>,
    ) -> WoundOutcome {
        let mut outcome = WoundOutcome::default();
        let mut damage: i32 = 1;

        if let (Some(attack), Some(own)) = (attack_kind, self.species.kind) {
            if attack == own.weakness() {
                outcome.weak = true;
                damage += 1;
            }
            if attack == own {
                outcome.strong = true;
                damage -= 1;
            }
        }

        let damage = damage.max(0) as u32;
        self.health -= damage as i32;
        if let Some(hero) = attacker {
            self.record_damage(hero, damage);
        }

        outcome
    }

    /// Finish the enemy off, crediting its entire remaining health (clamped
    /// at zero) to the killer. Health ends at exactly zero.
    pub fn kill(&mut self, attacker: Option<HeroId>) {
        if let Some(hero) = attacker {
            let remaining = self.health.max(0) as u32;
            self.record_damage(hero, remaining);
        }
        self.health = 0;
    }

    pub fn heal(&mut self) {
        self.health = self.species.max_health;
    }

    fn record_damage(&mut self, hero: HeroId, amount: u32) {
        if let Some(entry) = self.damage_ledger.iter_mut().find(|(h, _)| *h == hero) {
            entry.1 += amount;
        } else {
            self.damage_ledger.push((hero, amount));
        }
    }

    /// Even experience split across every hero in the ledger. Integer
    /// division; the remainder is discarded, not redistributed.
    pub fn experience_shares(&self) -> Vec<(HeroId, u32)> {
        let participants = self.damage_ledger.len() as u32;
        if participants == 0 {
            return Vec::new();
        }
        let share = self.species.experience / participants;
        self.damage_ledger
            .iter()
            .map(|(hero, _)| (*hero, share))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghoul() -> EnemySpecies {
        EnemySpecies::new("Ghoul", 3, 8).with_kind(ElementalKind::Necrotic)
    }

    #[test]
    fn test_spawn_produces_fresh_instances() {
        let species = ghoul();
        let mut first = species.spawn();
        first.wound(Some(HeroId::new()), None);

        let second = species.spawn();
        assert_eq!(second.health(), 3);
        assert!(second.experience_shares().is_empty());
        assert_eq!(first.health(), 2);
    }

    #[test]
    fn test_wound_weakness_and_resistance() {
        let mut enemy = ghoul().spawn();

        // Necrotic is weak to holy: two damage.
        let outcome = enemy.wound(None, Some(ElementalKind::Holy));
        assert!(outcome.weak);
        assert!(!outcome.strong);
        assert_eq!(enemy.health(), 1);

        // Matching the enemy's own kind is fully resisted.
        let outcome = enemy.wound(None, Some(ElementalKind::Necrotic));
        assert!(outcome.strong);
        assert!(!outcome.weak);
        assert_eq!(enemy.health(), 1);
    }

    #[test]
    fn test_wound_never_overshoots_max_single_hit() {
        let mut enemy = ghoul().spawn();
        enemy.wound(None, None);
        enemy.wound(None, None);
        let before = enemy.health();
        enemy.wound(None, Some(ElementalKind::Holy));
        assert!(enemy.health() >= before - 2);
        assert!(enemy.is_dead());
    }

    #[test]
    fn test_kill_sets_health_to_exactly_zero() {
        let killer = HeroId::new();
        let mut enemy = ghoul().spawn();
        enemy.kill(Some(killer));
        assert_eq!(enemy.health(), 0);
        assert!(enemy.is_dead());
        // The whole remaining health went to the killer, so the full
        // experience value is theirs alone.
        assert_eq!(enemy.experience_shares(), vec![(killer, 8)]);
    }

    #[test]
    fn test_experience_split_discards_remainder() {
        let heroes = [HeroId::new(), HeroId::new(), HeroId::new()];
        let mut enemy = ghoul().spawn();
        for hero in heroes {
            enemy.wound(Some(hero), None);
        }
        let shares = enemy.experience_shares();
        assert_eq!(shares.len(), 3);
        // 8 xp over 3 heroes: 2 each, remainder of 2 discarded.
        for (i, (hero, amount)) in shares.iter().enumerate() {
            assert_eq!(*hero, heroes[i]);
            assert_eq!(*amount, 2);
        }
    }
}
