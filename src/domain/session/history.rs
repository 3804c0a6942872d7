//! History record shapes returned by the diagnosis engine.

use serde::{Deserialize, Serialize};

use crate::domain::diagnosis::{Answer, DiagnosticResult};
use crate::domain::foundation::SessionId;

/// One question/answer round as stored by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: Answer,
}

/// A concluded session as returned by the engine's history listing.
///
/// Records are write-once from this client's perspective; reconstituting one
/// must reproduce the same transcript and rendered result as the live
/// session that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub conversation: Vec<Exchange>,
    pub diagnostic_result: DiagnosticResult,
}
