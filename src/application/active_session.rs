//! Active session slot shared between handlers.
//!
//! One slot represents one diagnostic surface (e.g. one open chat view).
//! Independent slots never share state, so concurrent sessions proceed
//! without serializing each other. The lock is held only to read a snapshot
//! or to apply a completed outcome, never across a network await.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::{DiagnosticSession, SessionError, SessionState};

/// Whether a completed remote call was applied, or dropped because the
/// session that issued it had been superseded in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    Superseded,
}

/// Holder of the session a diagnostic surface is currently driving.
#[derive(Clone, Default)]
pub struct ActiveSession {
    inner: Arc<Mutex<Option<DiagnosticSession>>>,
}

impl ActiveSession {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the current session for rendering.
    pub async fn current(&self) -> Option<DiagnosticSession> {
        self.inner.lock().await.clone()
    }

    /// Returns the current session's lifecycle state, if any.
    pub async fn state(&self) -> Option<SessionState> {
        self.inner.lock().await.as_ref().map(|s| s.state())
    }

    /// Abandons the in-memory session, if any.
    ///
    /// Persistence of concluded sessions is the engine's responsibility;
    /// discarding here loses nothing durable.
    pub async fn clear(&self) {
        *self.inner.lock().await = None;
    }

    /// Returns the id of the session currently awaiting an answer.
    ///
    /// This is the pre-call snapshot for `answer`: it fails fast, before any
    /// network traffic, when no session is awaiting one.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the slot is empty or the session is not awaiting
    ///   an answer
    pub async fn awaiting_session_id(&self) -> Result<SessionId, SessionError> {
        let guard = self.inner.lock().await;
        match guard.as_ref() {
            Some(session) if session.state() == SessionState::AwaitingAnswer => session
                .session_id()
                .cloned()
                .ok_or_else(|| SessionError::invalid_state("answer", session.state())),
            Some(session) => Err(SessionError::invalid_state("answer", session.state())),
            None => Err(SessionError::invalid_state(
                "answer",
                SessionState::NotStarted,
            )),
        }
    }

    /// Installs a freshly started session.
    ///
    /// A prior concluded (or never-started) session is discarded. If another
    /// start won the race and the slot now holds a session awaiting an
    /// answer, the new session is dropped instead of corrupting it.
    pub async fn install(&self, session: DiagnosticSession) -> ApplyOutcome {
        let mut guard = self.inner.lock().await;
        if let Some(existing) = guard.as_ref() {
            if existing.state() == SessionState::AwaitingAnswer {
                return ApplyOutcome::Superseded;
            }
        }
        *guard = Some(session);
        ApplyOutcome::Applied
    }

    /// Applies a completed answer outcome to the session that issued it.
    ///
    /// The mutation runs only if the slot still holds the session with the
    /// given id; a response arriving for a superseded or abandoned session
    /// is dropped as a no-op. Turn appending and the state transition happen
    /// inside one aggregate call under the lock, so they are observed
    /// together or not at all.
    pub async fn apply<F>(&self, target: &SessionId, mutate: F) -> Result<ApplyOutcome, SessionError>
    where
        F: FnOnce(&mut DiagnosticSession) -> Result<(), SessionError>,
    {
        let mut guard = self.inner.lock().await;
        match guard.as_mut() {
            Some(session) if session.session_id() == Some(target) => {
                mutate(session)?;
                Ok(ApplyOutcome::Applied)
            }
            _ => Ok(ApplyOutcome::Superseded),
        }
    }
}
