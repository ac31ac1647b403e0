//! SQLite-backed hero store

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::application::ports::outbound::HeroStorePort;
use crate::domain::entities::Hero;
use crate::domain::events::ScoreEntry;
use crate::domain::value_objects::HeroId;

pub struct SqliteHeroStore {
    pool: SqlitePool,
}

impl SqliteHeroStore {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS heroes (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                external_id TEXT UNIQUE,
                health INTEGER NOT NULL,
                experience INTEGER NOT NULL DEFAULT 0,
                joined_at TIMESTAMP NOT NULL
            )
        "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl HeroStorePort for SqliteHeroStore {
    async fn fetch_or_create(&self, name: &str, external_id: Option<&str>) -> Result<Hero> {
        let row: Option<(String, String, Option<String>, i64, DateTime<Utc>)> = sqlx::query_as(
            "SELECT id, name, external_id, experience, joined_at FROM heroes WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .context("failed to look up hero")?;

        let hero = match row {
            Some((id, name, external_id, experience, joined_at)) => {
                let id = Uuid::parse_str(&id)
                    .with_context(|| format!("malformed hero id for '{name}'"))?;
                tracing::debug!(hero = %name, "existing hero fetched");
                Hero {
                    id: HeroId::from_uuid(id),
                    name,
                    external_id,
                    // Fetching starts a fresh session.
                    health: Hero::BASELINE_HEALTH,
                    experience: experience as u32,
                    joined_at,
                }
            }
            None => {
                let mut hero = Hero::new(name);
                if let Some(external_id) = external_id {
                    hero = hero.with_external_id(external_id);
                }
                tracing::info!(hero = %name, id = %hero.id, "new hero created");
                hero
            }
        };

        self.save(&hero).await?;
        Ok(hero)
    }

    async fn save(&self, hero: &Hero) -> Result<()> {
        sqlx::query(
            "INSERT OR REPLACE INTO heroes (id, name, external_id, health, experience, joined_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(hero.id.to_string())
        .bind(&hero.name)
        .bind(&hero.external_id)
        .bind(hero.health)
        .bind(hero.experience as i64)
        .bind(hero.joined_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to save hero '{}'", hero.name))?;
        Ok(())
    }

    async fn list_by_score(&self, limit: u32) -> Result<Vec<ScoreEntry>> {
        // joined_at breaks ties in first-observation order; it never changes
        // after creation.
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT name, experience FROM heroes WHERE experience > 0 \
             ORDER BY experience DESC, joined_at ASC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .context("failed to load scoreboard")?;

        Ok(rows
            .into_iter()
            .map(|(name, experience)| ScoreEntry {
                name,
                experience: experience as u32,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteHeroStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        SqliteHeroStore::new(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_fetch_or_create_round_trips_and_resets_health() {
        let store = store().await;

        let mut hero = store.fetch_or_create("Mira", Some("chat-77")).await.unwrap();
        assert_eq!(hero.health, Hero::BASELINE_HEALTH);

        hero.health = 3;
        hero.gain_experience(9);
        store.save(&hero).await.unwrap();

        let again = store.fetch_or_create("Mira", None).await.unwrap();
        assert_eq!(again.id, hero.id);
        assert_eq!(again.experience, 9);
        assert_eq!(again.external_id.as_deref(), Some("chat-77"));
        // A fresh fetch is a fresh session.
        assert_eq!(again.health, Hero::BASELINE_HEALTH);
    }

    #[tokio::test]
    async fn test_scoreboard_orders_and_omits_zero_scores() {
        let store = store().await;

        for (name, experience) in [("Aldric", 5u32), ("Mira", 9), ("Tam", 5), ("Idle", 0)] {
            let mut hero = store.fetch_or_create(name, None).await.unwrap();
            hero.gain_experience(experience);
            store.save(&hero).await.unwrap();
        }

        let entries = store.list_by_score(10).await.unwrap();
        let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
        // Descending score, ties in first-observation order, zero omitted.
        assert_eq!(names, vec!["Mira", "Aldric", "Tam"]);

        let top = store.list_by_score(1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Mira");
        assert_eq!(top[0].experience, 9);
    }
}
