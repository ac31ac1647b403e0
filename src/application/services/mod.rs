//! Application services - Use case implementations
//!
//! The engine service owns session state and orchestrates the player
//! actions; the combat service resolves individual attacks. Both follow
//! hexagonal architecture principles: collaborators come in through ports.

pub mod combat_service;
pub mod engine_service;

pub use combat_service::{CombatResolver, FightOptions, FightReport, FlavorProfile};
pub use engine_service::{GameEngine, PlayerAction};
