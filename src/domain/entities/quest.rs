//! Quest entity - An area bound to narrative text and a completion reward

use crate::domain::entities::Area;
use crate::domain::value_objects::HeroId;

/// A quest: one area, its framing story, and the reward for clearing it
#[derive(Debug, Clone)]
pub struct Quest {
    name: String,
    area: Area,
    prologue: String,
    epilogue: String,
    completion_experience: u32,
    /// Heroes who damaged anything during this quest, in first-blood order
    participants: Vec<HeroId>,
}

impl Quest {
    pub fn new(name: impl Into<String>, area: Area, completion_experience: u32) -> Self {
        Self {
            name: name.into(),
            area,
            prologue: String::new(),
            epilogue: String::new(),
            completion_experience,
            participants: Vec::new(),
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

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn area_mut(&mut self) -> &mut Area {
        &mut self.area
    }

    pub fn prologue(&self) -> &str {
        &self.prologue
    }

    pub fn epilogue(&self) -> &str {
        &self.epilogue
    }

    pub fn completion_experience(&self) -> u32 {
        self.completion_experience
    }

    pub fn mark_participant(&mut self, hero: HeroId) {
        if !self.participants.contains(&hero) {
            self.participants.push(hero);
        }
    }

    pub fn participants(&self) -> &[HeroId] {
        &self.participants
    }

    /// Complete once the spawn list is empty AND the boss is dead.
    pub fn is_complete(&self) -> bool {
        self.area.is_cleared()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EnemySpecies;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quest(num_enemies: usize) -> Quest {
        let grunt = EnemySpecies::new("Grunt", 1, 3);
        let boss = EnemySpecies::new("Warden", 4, 12);
        Quest::new(
            "Trial",
            Area::new("The Yard", num_enemies, vec![(grunt, 100)], &boss),
            50,
        )
    }

    #[test]
    fn test_incomplete_while_enemies_remain() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut quest = quest(2);
        quest.area_mut().populate(&mut rng).unwrap();

        assert!(!quest.is_complete());
        quest.area_mut().boss_mut().kill(None);
        // Boss down but the spawn list still has enemies.
        assert!(!quest.is_complete());
    }

    #[test]
    fn test_incomplete_while_boss_lives() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut quest = quest(1);
        quest.area_mut().populate(&mut rng).unwrap();
        quest.area_mut().pop_enemy();

        // Spawn list empty but the boss still stands.
        assert!(!quest.is_complete());
        quest.area_mut().boss_mut().kill(None);
        assert!(quest.is_complete());
    }

    #[test]
    fn test_participants_keep_first_blood_order() {
        let mut quest = quest(1);
        let first = HeroId::new();
        let second = HeroId::new();
        quest.mark_participant(first);
        quest.mark_participant(second);
        quest.mark_participant(first);
        assert_eq!(quest.participants(), &[first, second]);
    }
}
