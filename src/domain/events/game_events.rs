//! Game events - The typed stream the engine reports outcomes through
//!
//! Every player action resolves into one event, possibly a composite
//! [`GameEvent::Multi`] wrapping an ordered sub-sequence. Transports flatten
//! composites in timeline order: index 0 happened first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base data attached to every event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventMetadata {
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// Optional correlation ID for tracing
    pub correlation_id: Option<String>,
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self {
            timestamp: Utc::now(),
            correlation_id: None,
        }
    }
}

/// One side's view of a fight resolution
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CombatantReport {
    /// Health after the exchange
    pub health: i32,
    /// Whether this side landed its attack
    pub hit: bool,
    pub crit: bool,
    /// The attack matched the defender's declared weakness
    pub weak: bool,
    /// The attack matched the defender's own kind and was resisted
    pub strong: bool,
}

/// A single scoreboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub experience: u32,
}

/// All events the engine emits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    QuestStarted {
        metadata: EventMetadata,
        quest: String,
        area: String,
        prologue: String,
        area_prologue: String,
    },

    QuestCompleted {
        metadata: EventMetadata,
        quest: String,
        epilogue: String,
        area_epilogue: String,
    },

    QuestAbandoned {
        metadata: EventMetadata,
        /// The quest given up, if one was underway
        quest: Option<String>,
    },

    /// Reporting event for the `quest` command and for start attempts while
    /// a quest is already underway
    CurrentQuest {
        metadata: EventMetadata,
        quest: Option<String>,
    },

    EnemyAppeared {
        metadata: EventMetadata,
        enemy: String,
        health: i32,
    },

    BossAppeared {
        metadata: EventMetadata,
        boss: String,
        health: i32,
    },

    FightResult {
        metadata: EventMetadata,
        hero: String,
        enemy: String,
        verb: String,
        hero_result: CombatantReport,
        enemy_result: CombatantReport,
    },

    EnemyExperienceAwarded {
        metadata: EventMetadata,
        hero: String,
        amount: u32,
        enemy: String,
    },

    QuestExperienceAwarded {
        metadata: EventMetadata,
        hero: String,
        amount: u32,
        quest: String,
    },

    SearchResult {
        metadata: EventMetadata,
        hero: String,
        found_enemy: bool,
    },

    Score {
        metadata: EventMetadata,
        entries: Vec<ScoreEntry>,
    },

    NoOp {
        metadata: EventMetadata,
    },

    /// Ordered sub-sequence of events from one resolution
    Multi {
        metadata: EventMetadata,
        events: Vec<GameEvent>,
    },
}

impl GameEvent {
    pub fn no_op() -> Self {
        Self::NoOp {
            metadata: EventMetadata::default(),
        }
    }

    pub fn multi(events: Vec<GameEvent>) -> Self {
        Self::Multi {
            metadata: EventMetadata::default(),
            events,
        }
    }

    /// Get the metadata for this event
    pub fn metadata(&self) -> &EventMetadata {
        match self {
            GameEvent::QuestStarted { metadata, .. } => metadata,
            GameEvent::QuestCompleted { metadata, .. } => metadata,
            GameEvent::QuestAbandoned { metadata, .. } => metadata,
            GameEvent::CurrentQuest { metadata, .. } => metadata,
            GameEvent::EnemyAppeared { metadata, .. } => metadata,
            GameEvent::BossAppeared { metadata, .. } => metadata,
            GameEvent::FightResult { metadata, .. } => metadata,
            GameEvent::EnemyExperienceAwarded { metadata, .. } => metadata,
            GameEvent::QuestExperienceAwarded { metadata, .. } => metadata,
            GameEvent::SearchResult { metadata, .. } => metadata,
            GameEvent::Score { metadata, .. } => metadata,
            GameEvent::NoOp { metadata } => metadata,
            GameEvent::Multi { metadata, .. } => metadata,
        }
    }

    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            GameEvent::QuestStarted { .. } => "QuestStarted",
            GameEvent::QuestCompleted { .. } => "QuestCompleted",
            GameEvent::QuestAbandoned { .. } => "QuestAbandoned",
            GameEvent::CurrentQuest { .. } => "CurrentQuest",
            GameEvent::EnemyAppeared { .. } => "EnemyAppeared",
            GameEvent::BossAppeared { .. } => "BossAppeared",
            GameEvent::FightResult { .. } => "FightResult",
            GameEvent::EnemyExperienceAwarded { .. } => "EnemyExperienceAwarded",
            GameEvent::QuestExperienceAwarded { .. } => "QuestExperienceAwarded",
            GameEvent::SearchResult { .. } => "SearchResult",
            GameEvent::Score { .. } => "Score",
            GameEvent::NoOp { .. } => "NoOp",
            GameEvent::Multi { .. } => "Multi",
        }
    }

    /// Flatten composites into a leaf-event sequence, preserving timeline
    /// order at every nesting level.
    pub fn flatten(self) -> Vec<GameEvent> {
        match self {
            GameEvent::Multi { events, .. } => {
                events.into_iter().flat_map(GameEvent::flatten).collect()
            }
            leaf => vec![leaf],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_nested_order() {
        let inner = GameEvent::multi(vec![
            GameEvent::SearchResult {
                metadata: EventMetadata::default(),
                hero: "Aldric".to_string(),
                found_enemy: true,
            },
            GameEvent::EnemyAppeared {
                metadata: EventMetadata::default(),
                enemy: "Ghoul".to_string(),
                health: 3,
            },
        ]);
        let outer = GameEvent::multi(vec![inner, GameEvent::no_op()]);

        let names: Vec<&str> = outer
            .flatten()
            .iter()
            .map(|event| event.event_type())
            .collect();
        assert_eq!(names, vec!["SearchResult", "EnemyAppeared", "NoOp"]);
    }

    #[test]
    fn test_events_serialize_with_type_tag() {
        let event = GameEvent::no_op();
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"no_op\""));
    }
}
