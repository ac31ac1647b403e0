//! Persistence adapters for the hero store port

mod hero_repository;
mod memory;

pub use hero_repository::SqliteHeroStore;
pub use memory::InMemoryHeroStore;
