//! Turn entity - one atomic entry in a diagnostic transcript.
//!
//! A turn is either a system utterance (a question or the rendered final
//! result) or a user utterance (a rendered answer label). Turns are immutable
//! once appended to a transcript.

use crate::domain::foundation::{Timestamp, ValidationError};
use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The diagnosis engine (questions and the final result).
    System,
    /// The person answering the questionnaire.
    User,
}

/// An immutable transcript entry.
///
/// # Invariants
///
/// - `content` is non-empty (validated at construction)
/// - `created_at` is set at construction and never changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    content: String,
    created_at: Timestamp,
}

impl Turn {
    /// Creates a new turn with the given speaker and content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if content is empty or whitespace
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(Self {
            speaker,
            content,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a system turn.
    pub fn system(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Speaker::System, content)
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(Speaker::User, content)
    }

    /// Returns who produced the turn.
    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    /// Returns the turn content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the turn was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_turn_has_system_speaker() {
        let turn = Turn::system("Does the engine crank?").unwrap();
        assert_eq!(turn.speaker(), Speaker::System);
        assert_eq!(turn.content(), "Does the engine crank?");
    }

    #[test]
    fn user_turn_has_user_speaker() {
        let turn = Turn::user("Yes").unwrap();
        assert_eq!(turn.speaker(), Speaker::User);
    }

    #[test]
    fn turn_rejects_empty_content() {
        assert!(Turn::system("").is_err());
        assert!(Turn::user("   ").is_err());
    }
}
