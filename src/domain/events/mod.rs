//! Domain events - What happened, reported to the transport layer

mod game_events;

pub use game_events::{CombatantReport, EventMetadata, GameEvent, ScoreEntry};
