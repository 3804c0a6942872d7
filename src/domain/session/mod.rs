//! Session module - the diagnostic session aggregate and its lifecycle.

mod aggregate;
mod errors;
mod history;
mod state;

pub use aggregate::DiagnosticSession;
pub use errors::SessionError;
pub use history::{Exchange, SessionRecord};
pub use state::SessionState;
