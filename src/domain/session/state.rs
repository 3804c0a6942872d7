//! Session lifecycle states.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle state of a diagnostic session.
///
/// Drives which operations are legal: `begin` only from `NotStarted`,
/// answers only while `AwaitingAnswer`, nothing after `Concluded` (a new
/// diagnostic is a fresh session object, never a reset of this one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NotStarted,
    AwaitingAnswer,
    Concluded,
}

impl StateMachine for SessionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionState::*;
        matches!(
            (self, target),
            (NotStarted, AwaitingAnswer)
                | (AwaitingAnswer, AwaitingAnswer)
                | (AwaitingAnswer, Concluded)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionState::*;
        match self {
            NotStarted => vec![AwaitingAnswer],
            AwaitingAnswer => vec![AwaitingAnswer, Concluded],
            Concluded => vec![],
        }
    }
}
