//! Diagnosis module - protocol vocabulary and the diagnostic result.

mod answer;
mod diagnostic_type;
mod formatter;
mod result;

pub use answer::Answer;
pub use diagnostic_type::DiagnosticType;
pub use formatter::render_result;
pub use result::{DiagnosticResult, ProbabilityTable};
