//! Application-level error type.

use thiserror::Error;

use crate::domain::session::SessionError;
use crate::ports::EngineError;

/// Failures surfaced to callers of the diagnostic handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosticError {
    /// Contract violation or invalid input, caught before any remote call.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A remote engine call failed; the session was left untouched.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
