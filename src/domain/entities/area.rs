//! Area entity - A named combat zone with a weighted spawn table
//!
//! Population draws independent weighted selections with replacement; the
//! weights are arbitrary positive numbers normalized by their sum, so a
//! table does not need to add up to 100.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::domain::entities::{Enemy, EnemySpecies};
use crate::domain::errors::GameError;

/// A combat zone inside a quest
#[derive(Debug, Clone)]
pub struct Area {
    name: String,
    prologue: String,
    epilogue: String,
    /// Species prototype and relative spawn weight
    spawn_table: Vec<(EnemySpecies, u32)>,
    num_enemies: usize,
    boss: Enemy,
    /// Spawned but not yet encountered, consumed from the end
    enemies: Vec<Enemy>,
}

impl Area {
    pub fn new(
        name: impl Into<String>,
        num_enemies: usize,
        spawn_table: Vec<(EnemySpecies, u32)>,
        boss: &EnemySpecies,
    ) -> Self {
        let name = name.into();
        let prologue = format!("The heroes enter {name}");
        let epilogue = format!("The heroes leave {name}");
        Self {
            name,
            prologue,
            epilogue,
            spawn_table,
            num_enemies,
            boss: boss.spawn(),
            enemies: Vec::new(),
        }
    }

    pub fn with_prologue(mut self, prologue: impl Into<String>) -> Self {
        self.prologue = prologue.into();
        self
    }

    pub fn with_epilogue(mut self, epilogue: impl Into<String>) -> Self {
        self.epilogue = epilogue.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prologue(&self) -> &str {
        &self.prologue
    }

    pub fn epilogue(&self) -> &str {
        &self.epilogue
    }

    pub fn boss(&self) -> &Enemy {
        &self.boss
    }

    pub fn boss_mut(&mut self) -> &mut Enemy {
        &mut self.boss
    }

    /// A table that can never spawn anything is a content bug; catching it
    /// here keeps the quest from ever being offered.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.spawn_table.is_empty() {
            return Err(GameError::InvalidConfiguration(format!(
                "area '{}' has an empty spawn table",
                self.name
            )));
        }
        if self.spawn_table.iter().all(|(_, weight)| *weight == 0) {
            return Err(GameError::InvalidConfiguration(format!(
                "area '{}' has no positive spawn weights",
                self.name
            )));
        }
        Ok(())
    }

    /// Fill the spawn list with exactly `num_enemies` freshly spawned
    /// enemies and heal the boss to full. Any previous list is discarded, so
    /// repopulating on a quest restart always yields a correctly sized list.
    ///
    /// Invariant: the boss is one extra entity and never counts against
    /// `num_enemies`.
    pub fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        self.validate()?;
        let weights = self.spawn_table.iter().map(|(_, weight)| *weight);
        let distribution = WeightedIndex::new(weights).map_err(|e| {
            GameError::InvalidConfiguration(format!("area '{}': {e}", self.name))
        })?;

        self.enemies.clear();
        for _ in 0..self.num_enemies {
            let (species, _) = &self.spawn_table[distribution.sample(rng)];
            self.enemies.push(species.spawn());
        }
        self.boss.heal();
        Ok(())
    }

    /// Pop the next pending enemy off the end of the spawn list.
    pub fn pop_enemy(&mut self) -> Option<Enemy> {
        self.enemies.pop()
    }

    pub fn has_pending_enemies(&self) -> bool {
        !self.enemies.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.enemies.len()
    }

    /// Everything slain and the boss down.
    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty() && self.boss.is_dead()
    }

    /// Pending spawns grouped by species, most numerous first.
    pub fn census(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for enemy in &self.enemies {
            if let Some(entry) = counts.iter_mut().find(|(name, _)| name == enemy.name()) {
                entry.1 += 1;
            } else {
                counts.push((enemy.name().to_string(), 1));
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wretch() -> EnemySpecies {
        EnemySpecies::new("Bog Wretch", 1, 3)
    }

    fn leech() -> EnemySpecies {
        EnemySpecies::new("Mire Leech", 2, 4)
    }

    fn boss() -> EnemySpecies {
        EnemySpecies::new("The Mire King", 8, 80)
    }

    #[test]
    fn test_populate_spawns_exactly_num_enemies() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut area = Area::new("The Pit", 12, vec![(wretch(), 70), (leech(), 30)], &boss());
        area.populate(&mut rng).unwrap();
        // The boss is one extra entity, never part of the spawn list.
        assert_eq!(area.pending_count(), 12);
        assert!(!area.boss().is_dead());
    }

    #[test]
    fn test_repopulate_discards_previous_list_and_heals_boss() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut area = Area::new("The Pit", 5, vec![(wretch(), 100)], &boss());
        area.populate(&mut rng).unwrap();
        area.pop_enemy();
        area.pop_enemy();
        area.boss_mut().wound(None, None);

        area.populate(&mut rng).unwrap();
        assert_eq!(area.pending_count(), 5);
        assert_eq!(area.boss().health(), 8);
    }

    #[test]
    fn test_pop_drains_to_none() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut area = Area::new("The Pit", 3, vec![(wretch(), 1)], &boss());
        area.populate(&mut rng).unwrap();
        for _ in 0..3 {
            assert!(area.pop_enemy().is_some());
        }
        assert!(area.pop_enemy().is_none());
        assert!(!area.has_pending_enemies());
    }

    #[test]
    fn test_empty_spawn_table_is_invalid_configuration() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut area = Area::new("Nowhere", 3, vec![], &boss());
        assert!(matches!(
            area.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            area.populate(&mut rng),
            Err(GameError::InvalidConfiguration(_))
        ));

        let zeroed = Area::new("Nowhere Else", 3, vec![(wretch(), 0)], &boss());
        assert!(matches!(
            zeroed.validate(),
            Err(GameError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_spawn_weights_hold_up_empirically() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut area = Area::new("The Pit", 100, vec![(wretch(), 70), (leech(), 30)], &boss());

        let mut wretches = 0usize;
        let mut total = 0usize;
        for _ in 0..50 {
            area.populate(&mut rng).unwrap();
            for (name, count) in area.census() {
                if name == "Bog Wretch" {
                    wretches += count;
                }
                total += count;
            }
        }

        assert_eq!(total, 5000);
        let ratio = wretches as f64 / total as f64;
        assert!(
            (0.65..=0.75).contains(&ratio),
            "expected ~0.7, got {ratio}"
        );
    }
}
