//! Scripted diagnosis engine for testing.
//!
//! Queue-driven implementation of the DiagnosisEngine port: start and answer
//! responses (including injected errors) are consumed in the order they were
//! scripted, and every call is recorded for verification. Tests drive the
//! whole protocol without a network.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::domain::diagnosis::{Answer, DiagnosticResult, DiagnosticType};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionRecord;
use crate::ports::{AnswerOutcome, DiagnosisEngine, EngineError, StartedSession};

/// Scripted engine; responses are consumed in order.
#[derive(Default)]
pub struct ScriptedEngine {
    starts: Mutex<VecDeque<Result<StartedSession, EngineError>>>,
    answers: Mutex<VecDeque<Result<AnswerOutcome, EngineError>>>,
    sessions: Mutex<Option<Result<Vec<SessionRecord>, EngineError>>>,
    start_calls: Mutex<Vec<Option<DiagnosticType>>>,
    answer_calls: Mutex<Vec<(SessionId, Answer)>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a successful start.
    pub fn with_started(self, session_id: &str, question: &str) -> Self {
        self.starts.lock().unwrap().push_back(Ok(StartedSession {
            session_id: SessionId::new(session_id).expect("non-empty scripted id"),
            question: question.to_string(),
        }));
        self
    }

    /// Scripts a failing start.
    pub fn with_start_error(self, error: EngineError) -> Self {
        self.starts.lock().unwrap().push_back(Err(error));
        self
    }

    /// Scripts a continuation response.
    pub fn with_next_question(self, question: &str) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(AnswerOutcome::NextQuestion(question.to_string())));
        self
    }

    /// Scripts a terminal response.
    pub fn with_conclusion(self, result: DiagnosticResult) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(Ok(AnswerOutcome::Concluded(result)));
        self
    }

    /// Scripts a failing answer call.
    pub fn with_answer_error(self, error: EngineError) -> Self {
        self.answers.lock().unwrap().push_back(Err(error));
        self
    }

    /// Scripts the history listing.
    pub fn with_sessions(self, records: Vec<SessionRecord>) -> Self {
        *self.sessions.lock().unwrap() = Some(Ok(records));
        self
    }

    /// Scripts a failing history listing.
    pub fn with_sessions_error(self, error: EngineError) -> Self {
        *self.sessions.lock().unwrap() = Some(Err(error));
        self
    }

    /// Returns the diagnostic types passed to start, in call order.
    pub fn start_calls(&self) -> Vec<Option<DiagnosticType>> {
        self.start_calls.lock().unwrap().clone()
    }

    /// Returns the (session id, answer) pairs submitted, in call order.
    pub fn answer_calls(&self) -> Vec<(SessionId, Answer)> {
        self.answer_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiagnosisEngine for ScriptedEngine {
    async fn start(
        &self,
        diagnostic_type: Option<&DiagnosticType>,
    ) -> Result<StartedSession, EngineError> {
        self.start_calls
            .lock()
            .unwrap()
            .push(diagnostic_type.cloned());
        self.starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::transport("scripted start queue exhausted")))
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        answer: Answer,
    ) -> Result<AnswerOutcome, EngineError> {
        self.answer_calls
            .lock()
            .unwrap()
            .push((session_id.clone(), answer));
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::transport("scripted answer queue exhausted")))
    }

    async fn list_sessions(&self) -> Result<Vec<SessionRecord>, EngineError> {
        self.sessions
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}
