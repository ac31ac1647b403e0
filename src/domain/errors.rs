//! Game rule errors
//!
//! Deliberately small: most "bad" input degrades to a no-op event instead of
//! an error, so the interaction stays forgiving. Only starting a second
//! quest and offering a malformed area are real failures.

/// Errors raised by game rules
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A quest is already underway; the existing quest is left untouched.
    #[error("already on quest: {quest}")]
    AlreadyOnQuest { quest: String },

    /// A quest or area definition that can never play out, caught at
    /// construction so the content is never offered to players.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
