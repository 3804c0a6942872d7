//! FetchHistoryHandler - rebuilds read-only views of concluded sessions.

use std::sync::Arc;

use crate::application::DiagnosticError;
use crate::domain::session::DiagnosticSession;
use crate::ports::DiagnosisEngine;

/// Handler for fetching and reconstituting diagnostic history.
///
/// Historical sessions are always concluded; they are rebuilt directly from
/// the stored records, never replayed through start/answer. Which entry a
/// UI highlights is local presentation state and no concern of this handler.
pub struct FetchHistoryHandler {
    engine: Arc<dyn DiagnosisEngine>,
}

impl FetchHistoryHandler {
    pub fn new(engine: Arc<dyn DiagnosisEngine>) -> Self {
        Self { engine }
    }

    /// Lists the caller's concluded sessions as read-only views.
    pub async fn handle(&self) -> Result<Vec<DiagnosticSession>, DiagnosticError> {
        let records = self.engine.list_sessions().await?;
        tracing::debug!(count = records.len(), "reconstituting diagnostic history");

        records
            .into_iter()
            .map(|record| DiagnosticSession::reconstitute(record).map_err(DiagnosticError::from))
            .collect()
    }
}
