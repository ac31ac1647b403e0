//! Darkmoor Engine - Turn-based adventure game engine
//!
//! The engine resolves player actions (search, fight, quest management) into
//! an ordered event stream. This binary wires it to the default campaign, a
//! SQLite hero store, and a console transport client.

mod application;
mod domain;
mod infrastructure;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sqlx::SqlitePool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::application::services::GameEngine;
use crate::infrastructure::campaign;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::console::ConsoleClient;
use crate::infrastructure::persistence::SqliteHeroStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darkmoor_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Darkmoor Engine");

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::info!("  Database: {}", config.database_url);
    if let Some(seed) = config.rng_seed {
        tracing::info!("  RNG seed: {seed}");
    }

    // Hero store
    let pool = SqlitePool::connect(&config.database_url).await?;
    let store = SqliteHeroStore::new(pool).await?;

    // Quest catalog
    let quests = campaign::default_quests()?;
    tracing::info!("Loaded {} quests", quests.len());

    // One engine instance is one game session.
    let engine = match config.rng_seed {
        Some(seed) => GameEngine::with_rng(store, quests, StdRng::seed_from_u64(seed)),
        None => GameEngine::new(store, quests),
    };

    let mut client = ConsoleClient::new(engine, &config.player_name).await?;
    client.run().await
}
