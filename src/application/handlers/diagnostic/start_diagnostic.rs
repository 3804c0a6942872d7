//! StartDiagnosticHandler - opens a new diagnostic session.

use std::sync::Arc;

use crate::application::{ActiveSession, ApplyOutcome, DiagnosticError};
use crate::domain::diagnosis::DiagnosticType;
use crate::domain::foundation::SessionId;
use crate::domain::session::{DiagnosticSession, SessionError, SessionState};
use crate::ports::DiagnosisEngine;

/// Command to start a diagnostic session.
#[derive(Debug, Clone)]
pub struct StartDiagnosticCommand {
    /// Problem domain selected by the caller; optional unless the deployment
    /// requires one.
    pub diagnostic_type: Option<DiagnosticType>,
}

/// Result of a start attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum StartDiagnosticResult {
    /// The session is live and awaiting the first answer.
    Started {
        session_id: SessionId,
        question: String,
    },
    /// Another start won the race for this surface; this response was
    /// dropped without touching the active session.
    Superseded,
}

/// Handler for starting diagnostic sessions.
pub struct StartDiagnosticHandler {
    engine: Arc<dyn DiagnosisEngine>,
    slot: ActiveSession,
    require_diagnostic_type: bool,
}

impl StartDiagnosticHandler {
    pub fn new(
        engine: Arc<dyn DiagnosisEngine>,
        slot: ActiveSession,
        require_diagnostic_type: bool,
    ) -> Self {
        Self {
            engine,
            slot,
            require_diagnostic_type,
        }
    }

    /// Starts a session.
    ///
    /// Contract checks run before any network traffic: starting while a
    /// session is awaiting an answer is a violation, and a deployment that
    /// requires a diagnostic type rejects a start without one. A prior
    /// concluded session is simply discarded by a successful start.
    pub async fn handle(
        &self,
        cmd: StartDiagnosticCommand,
    ) -> Result<StartDiagnosticResult, DiagnosticError> {
        if self.require_diagnostic_type && cmd.diagnostic_type.is_none() {
            return Err(SessionError::validation(
                "diagnostic_type",
                "a diagnostic type must be selected before starting",
            )
            .into());
        }

        if self.slot.state().await == Some(SessionState::AwaitingAnswer) {
            return Err(
                SessionError::invalid_state("start", SessionState::AwaitingAnswer).into(),
            );
        }

        let started = self.engine.start(cmd.diagnostic_type.as_ref()).await?;

        let mut session = DiagnosticSession::new(cmd.diagnostic_type);
        session.begin(started.session_id.clone(), started.question.clone())?;

        match self.slot.install(session).await {
            ApplyOutcome::Applied => {
                tracing::info!(session_id = %started.session_id, "diagnostic session started");
                Ok(StartDiagnosticResult::Started {
                    session_id: started.session_id,
                    question: started.question,
                })
            }
            ApplyOutcome::Superseded => {
                tracing::warn!(
                    session_id = %started.session_id,
                    "start response dropped; surface was taken by another session"
                );
                Ok(StartDiagnosticResult::Superseded)
            }
        }
    }
}
