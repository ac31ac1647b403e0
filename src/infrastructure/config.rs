//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string for the hero store
    pub database_url: String,
    /// Fixed RNG seed for reproducible sessions; unset means entropy
    pub rng_seed: Option<u64>,
    /// Hero name the console client plays as
    pub player_name: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://darkmoor.db?mode=rwc".to_string()),
            rng_seed: env::var("DARKMOOR_SEED")
                .ok()
                .map(|raw| raw.parse())
                .transpose()
                .context("DARKMOOR_SEED must be an unsigned integer")?,
            player_name: env::var("PLAYER_NAME").unwrap_or_else(|_| "Wanderer".to_string()),
        })
    }
}
