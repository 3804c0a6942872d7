//! Diagnostic session aggregate.
//!
//! The aggregate owns the transcript and the state machine for one session.
//! Every transition appends its turns and advances the state inside a single
//! `&mut self` call, so no observer can see a transcript with a user turn
//! appended but the state not yet advanced.
//!
//! # Invariants
//!
//! - exactly one of `current_question` / `result` is present once started
//! - the transcript is append-only and grows by one system turn per question,
//!   one user turn per answer, and one final system turn at conclusion
//! - `session_id` is absent before start and immutable afterward
//! - a concluded session is permanently read-only

use crate::domain::diagnosis::{render_result, Answer, DiagnosticResult, DiagnosticType};
use crate::domain::foundation::{SessionId, StateMachine};
use crate::domain::transcript::{Transcript, Turn};

use super::{SessionError, SessionRecord, SessionState};

/// One complete or in-progress questionnaire interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticSession {
    session_id: Option<SessionId>,
    diagnostic_type: Option<DiagnosticType>,
    state: SessionState,
    current_question: Option<String>,
    transcript: Transcript,
    result: Option<DiagnosticResult>,
}

impl DiagnosticSession {
    /// Creates a session that has not yet contacted the engine.
    pub fn new(diagnostic_type: Option<DiagnosticType>) -> Self {
        Self {
            session_id: None,
            diagnostic_type,
            state: SessionState::NotStarted,
            current_question: None,
            transcript: Transcript::new(),
            result: None,
        }
    }

    /// Rebuilds a read-only concluded session from a stored history record.
    ///
    /// Historical sessions are never replayed through the state machine; the
    /// transcript is reproduced in stored conversation order and the result
    /// is rendered by the same formatter a live conclusion uses.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a stored question is empty
    pub fn reconstitute(record: SessionRecord) -> Result<Self, SessionError> {
        let mut transcript = Transcript::new();
        for exchange in &record.conversation {
            transcript.append(Turn::system(exchange.question.clone())?);
            transcript.append(Turn::user(exchange.answer.label())?);
        }
        transcript.append(Turn::system(render_result(&record.diagnostic_result))?);

        Ok(Self {
            session_id: Some(record.id),
            diagnostic_type: None,
            state: SessionState::Concluded,
            current_question: None,
            transcript,
            result: Some(record.diagnostic_result),
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the engine-assigned session id, absent before start.
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Returns the diagnostic type selected before start, if any.
    pub fn diagnostic_type(&self) -> Option<&DiagnosticType> {
        self.diagnostic_type.as_ref()
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the question pending an answer, present iff awaiting one.
    pub fn current_question(&self) -> Option<&str> {
        self.current_question.as_deref()
    }

    /// Returns the transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Returns the structured result, present iff concluded.
    pub fn result(&self) -> Option<&DiagnosticResult> {
        self.result.as_ref()
    }

    /// Returns true once the session has a result.
    pub fn is_concluded(&self) -> bool {
        self.state == SessionState::Concluded
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Starts the session with the engine-assigned id and first question.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `NotStarted`
    /// - `ValidationFailed` if the question is empty
    pub fn begin(&mut self, session_id: SessionId, question: String) -> Result<(), SessionError> {
        self.guard("begin", SessionState::NotStarted)?;
        let turn = Turn::system(question.clone())?;
        let next = self.state.transition_to(SessionState::AwaitingAnswer)?;

        self.session_id = Some(session_id);
        self.current_question = Some(question);
        self.transcript.append(turn);
        self.state = next;
        Ok(())
    }

    /// Records a non-terminal round: the user's answer and the next question.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `AwaitingAnswer`
    /// - `ValidationFailed` if the next question is empty
    pub fn record_continuation(
        &mut self,
        answer: Answer,
        next_question: String,
    ) -> Result<(), SessionError> {
        self.guard("answer", SessionState::AwaitingAnswer)?;
        let question_turn = Turn::system(next_question.clone())?;
        let answer_turn = Turn::user(answer.label())?;
        let next = self.state.transition_to(SessionState::AwaitingAnswer)?;

        self.transcript.append(answer_turn);
        self.transcript.append(question_turn);
        self.current_question = Some(next_question);
        self.state = next;
        Ok(())
    }

    /// Records the terminal round: the user's answer and the final result.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is `AwaitingAnswer`
    pub fn conclude(
        &mut self,
        answer: Answer,
        result: DiagnosticResult,
    ) -> Result<(), SessionError> {
        self.guard("answer", SessionState::AwaitingAnswer)?;
        let result_turn = Turn::system(render_result(&result))?;
        let answer_turn = Turn::user(answer.label())?;
        let next = self.state.transition_to(SessionState::Concluded)?;

        self.transcript.append(answer_turn);
        self.transcript.append(result_turn);
        self.current_question = None;
        self.result = Some(result);
        self.state = next;
        Ok(())
    }

    /// Rejects the operation unless the session is in the expected state.
    ///
    /// Transition legality alone is not enough: `AwaitingAnswer` is reachable
    /// from both `NotStarted` and itself, so each operation also pins the
    /// state it is legal in. Never mutates.
    fn guard(&self, operation: &'static str, expected: SessionState) -> Result<(), SessionError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SessionError::invalid_state(operation, self.state))
        }
    }
}
