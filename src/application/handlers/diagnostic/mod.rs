//! Diagnostic protocol handlers - one per protocol operation.

mod fetch_history;
mod start_diagnostic;
mod submit_answer;

pub use fetch_history::FetchHistoryHandler;
pub use start_diagnostic::{
    StartDiagnosticCommand, StartDiagnosticHandler, StartDiagnosticResult,
};
pub use submit_answer::{SubmitAnswerCommand, SubmitAnswerHandler, SubmitAnswerResult};
