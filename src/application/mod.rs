//! Application layer - command handlers driving the session protocol.

mod active_session;
mod errors;
pub mod handlers;

pub use active_session::{ActiveSession, ApplyOutcome};
pub use errors::DiagnosticError;
