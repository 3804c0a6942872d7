//! Result formatter - renders a diagnostic result into the transcript's
//! final turn.
//!
//! The rendering is a pure function of the result, so a reconstructed
//! historical session produces exactly the same text as the live conclusion
//! it was stored from.

use super::DiagnosticResult;

/// Renders a concluded session's result.
///
/// Structure is fixed: header, most probable problem, narrative, then one
/// `"<label>: <percentage>%"` line per probability entry in received order.
/// Percentages are the fraction times 100, rounded half-up to one decimal.
pub fn render_result(result: &DiagnosticResult) -> String {
    let mut out = String::new();
    out.push_str("Diagnosis Result:\n\n");
    out.push_str("Most probable problem: ");
    out.push_str(result.most_probable_problem());
    out.push_str("\n\n");
    out.push_str(result.narrative());
    out.push_str("\n\nProbabilities:\n");
    for (label, fraction) in result.probabilities().entries() {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&format_percentage(fraction));
        out.push_str("%\n");
    }
    out
}

/// Formats a `[0, 1]` fraction as a percentage with one decimal, half-up.
///
/// Rounding is done on integer tenths-of-a-percent to avoid the
/// half-to-even behavior of float formatting.
fn format_percentage(fraction: f64) -> String {
    let tenths = (fraction * 1000.0).round() as i64;
    format!("{}.{}", tenths / 10, tenths % 10)
}
