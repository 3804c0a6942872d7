//! Diagnosis Engine Port - interface to the remote session authority.
//!
//! The engine owns question selection and probability computation; this
//! client only drives the protocol. Per session the calls are strictly
//! sequential: `start` completes before any `answer`, and each `answer`
//! completes before the next. Implementations must not share mutable state
//! across sessions, so independent sessions never serialize each other.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::diagnosis::{Answer, DiagnosticResult, DiagnosticType};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionRecord;

/// Port for the remote diagnosis engine.
///
/// # Contract
///
/// - `start` is called at most once per session, before any `answer`
/// - errors leave nothing applied; the caller decides whether to re-issue
/// - authentication rejection is always `AuthenticationExpired`, whichever
///   call produced it
#[async_trait]
pub trait DiagnosisEngine: Send + Sync {
    /// Opens a session, returning its id and the first question.
    ///
    /// The diagnostic type is optional; whether the deployment requires one
    /// is decided by configuration, and the engine rejects a missing required
    /// type with `ValidationRejected`.
    async fn start(
        &self,
        diagnostic_type: Option<&DiagnosticType>,
    ) -> Result<StartedSession, EngineError>;

    /// Relays an answer for the given session.
    ///
    /// The response is a tagged union: either the next question or the final
    /// result, never neither, never both.
    async fn answer(
        &self,
        session_id: &SessionId,
        answer: Answer,
    ) -> Result<AnswerOutcome, EngineError>;

    /// Lists the caller's concluded sessions.
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>, EngineError>;
}

/// A successfully opened session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedSession {
    pub session_id: SessionId,
    pub question: String,
}

/// The engine's response to an answer, as an explicit discriminated type.
///
/// A wire response carrying neither branch, or both, is never represented
/// here; adapters must surface it as [`EngineError::MalformedResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerOutcome {
    /// The questionnaire continues with this question.
    NextQuestion(String),
    /// The terminal answer; the session is concluded with this result.
    Concluded(DiagnosticResult),
}

/// Failures of a remote engine call.
///
/// Every variant guarantees the session the call was issued for was not
/// mutated; duplicate or ghost turns cannot arise from a failed call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// Credential rejected or absent. Caller must re-authenticate;
    /// never retried automatically.
    #[error("authentication expired")]
    AuthenticationExpired,

    /// Request rejected by the engine's validation rules. User-correctable.
    #[error("request rejected: {message}")]
    ValidationRejected { message: String },

    /// Response matched neither the next-question nor the result shape.
    /// Fatal to the current session.
    #[error("malformed engine response: {detail}")]
    MalformedResponse { detail: String },

    /// Network, timeout, or unreachable engine. Caller may retry manually.
    #[error("engine transport failure: {message}")]
    Transport { message: String },
}

impl EngineError {
    pub fn validation_rejected(message: impl Into<String>) -> Self {
        EngineError::ValidationRejected {
            message: message.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        EngineError::MalformedResponse {
            detail: detail.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        EngineError::Transport {
            message: message.into(),
        }
    }
}
