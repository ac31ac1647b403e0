//! Hero store port - Interface for hero persistence
//!
//! The engine mutates heroes in memory and expects the store to be told
//! about every mutation before the triggering operation returns. Application
//! code depends on this trait, never on a concrete store.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::Hero;
use crate::domain::events::ScoreEntry;

/// Persistence port for heroes
#[async_trait]
pub trait HeroStorePort: Send + Sync {
    /// Fetch a hero by name, creating one on first sight. Health comes back
    /// at the full baseline on every fetch: picking a hero up means starting
    /// a fresh session.
    async fn fetch_or_create(&self, name: &str, external_id: Option<&str>) -> Result<Hero>;

    /// Persist the hero's current state.
    async fn save(&self, hero: &Hero) -> Result<()>;

    /// Heroes ranked by experience descending, ties in first-observation
    /// order, heroes without any experience omitted.
    async fn list_by_score(&self, limit: u32) -> Result<Vec<ScoreEntry>>;
}

#[async_trait]
impl<S: HeroStorePort> HeroStorePort for Arc<S> {
    async fn fetch_or_create(&self, name: &str, external_id: Option<&str>) -> Result<Hero> {
        self.as_ref().fetch_or_create(name, external_id).await
    }

    async fn save(&self, hero: &Hero) -> Result<()> {
        self.as_ref().save(hero).await
    }

    async fn list_by_score(&self, limit: u32) -> Result<Vec<ScoreEntry>> {
        self.as_ref().list_by_score(limit).await
    }
}
