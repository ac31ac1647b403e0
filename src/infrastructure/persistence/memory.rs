//! In-memory hero store
//!
//! Backs engine tests and throwaway sessions. Insertion order doubles as
//! first-observation order for scoreboard ties.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::HeroStorePort;
use crate::domain::entities::Hero;
use crate::domain::events::ScoreEntry;

#[derive(Default)]
pub struct InMemoryHeroStore {
    heroes: RwLock<Vec<Hero>>,
}

impl InMemoryHeroStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peek at a stored hero by name.
    pub async fn find(&self, name: &str) -> Option<Hero> {
        self.heroes
            .read()
            .await
            .iter()
            .find(|hero| hero.name == name)
            .cloned()
    }
}

#[async_trait]
impl HeroStorePort for InMemoryHeroStore {
    async fn fetch_or_create(&self, name: &str, external_id: Option<&str>) -> Result<Hero> {
        let mut heroes = self.heroes.write().await;
        if let Some(hero) = heroes.iter_mut().find(|hero| hero.name == name) {
            hero.reset_health();
            return Ok(hero.clone());
        }

        let mut hero = Hero::new(name);
        if let Some(external_id) = external_id {
            hero = hero.with_external_id(external_id);
        }
        heroes.push(hero.clone());
        Ok(hero)
    }

    async fn save(&self, hero: &Hero) -> Result<()> {
        let mut heroes = self.heroes.write().await;
        if let Some(stored) = heroes.iter_mut().find(|stored| stored.id == hero.id) {
            *stored = hero.clone();
        } else {
            heroes.push(hero.clone());
        }
        Ok(())
    }

    async fn list_by_score(&self, limit: u32) -> Result<Vec<ScoreEntry>> {
        let heroes = self.heroes.read().await;
        let mut entries: Vec<ScoreEntry> = heroes
            .iter()
            .filter(|hero| hero.experience > 0)
            .map(|hero| ScoreEntry {
                name: hero.name.clone(),
                experience: hero.experience,
            })
            .collect();
        // Stable sort keeps insertion order on ties.
        entries.sort_by(|a, b| b.experience.cmp(&a.experience));
        entries.truncate(limit as usize);
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_resets_health_and_keeps_experience() {
        let store = InMemoryHeroStore::new();
        let mut hero = store.fetch_or_create("Tam", None).await.unwrap();
        hero.health = 1;
        hero.gain_experience(6);
        store.save(&hero).await.unwrap();

        let again = store.fetch_or_create("Tam", None).await.unwrap();
        assert_eq!(again.id, hero.id);
        assert_eq!(again.experience, 6);
        assert_eq!(again.health, Hero::BASELINE_HEALTH);
    }

    #[tokio::test]
    async fn test_scoreboard_ties_keep_insertion_order() {
        let store = InMemoryHeroStore::new();
        for name in ["Aldric", "Mira", "Tam"] {
            let mut hero = store.fetch_or_create(name, None).await.unwrap();
            hero.gain_experience(5);
            store.save(&hero).await.unwrap();
        }

        let entries = store.list_by_score(10).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        assert_eq!(names, vec!["Aldric", "Mira", "Tam"]);
    }
}
