//! Outbound ports - Interfaces the engine requires from external systems

mod hero_store_port;

pub use hero_store_port::HeroStorePort;
