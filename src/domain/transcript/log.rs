//! Append-only transcript log.

use serde::{Deserialize, Serialize};

use super::Turn;

/// Ordered log of exchanged turns.
///
/// The transcript is the sole source of truth for re-rendering a session,
/// including reconstructed historical sessions. It is append-only: no turn is
/// ever removed, edited, or reordered, and failure recovery never rewrites
/// history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Creates an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the log. O(1), no content validation.
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Returns the ordered sequence of turns for display.
    ///
    /// Idempotent and non-mutating; callers render from this view.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if no turns have been appended.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the most recently appended turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transcript::Speaker;

    #[test]
    fn new_transcript_is_empty() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.len(), 0);
        assert!(transcript.last().is_none());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::system("Q1").unwrap());
        transcript.append(Turn::user("Yes").unwrap());
        transcript.append(Turn::system("Q2").unwrap());

        let contents: Vec<&str> = transcript.turns().iter().map(Turn::content).collect();
        assert_eq!(contents, vec!["Q1", "Yes", "Q2"]);
    }

    #[test]
    fn turns_view_is_idempotent() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::system("Q1").unwrap());

        let first: Vec<Turn> = transcript.turns().to_vec();
        let second: Vec<Turn> = transcript.turns().to_vec();
        assert_eq!(first, second);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn last_returns_most_recent_turn() {
        let mut transcript = Transcript::new();
        transcript.append(Turn::system("Q1").unwrap());
        transcript.append(Turn::user("No").unwrap());
        assert_eq!(transcript.last().unwrap().content(), "No");
        assert_eq!(transcript.last().unwrap().speaker(), Speaker::User);
    }
}
