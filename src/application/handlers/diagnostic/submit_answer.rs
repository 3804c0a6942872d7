//! SubmitAnswerHandler - relays one answer and applies the engine's response.

use std::sync::Arc;

use crate::application::{ActiveSession, ApplyOutcome, DiagnosticError};
use crate::domain::diagnosis::{Answer, DiagnosticResult};
use crate::ports::{AnswerOutcome, DiagnosisEngine};

/// Command to answer the pending question.
#[derive(Debug, Clone, Copy)]
pub struct SubmitAnswerCommand {
    pub answer: Answer,
}

/// Result of an answer round.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAnswerResult {
    /// The questionnaire continues.
    Continued { question: String },
    /// The answer was terminal; the session is concluded.
    Concluded { result: DiagnosticResult },
    /// The response arrived for a session the surface has since abandoned;
    /// it was dropped without touching the active session.
    Superseded,
}

/// Handler for submitting answers.
pub struct SubmitAnswerHandler {
    engine: Arc<dyn DiagnosisEngine>,
    slot: ActiveSession,
}

impl SubmitAnswerHandler {
    pub fn new(engine: Arc<dyn DiagnosisEngine>, slot: ActiveSession) -> Self {
        Self { engine, slot }
    }

    /// Relays the answer for the session currently awaiting one.
    ///
    /// The session id is snapshotted before the call; answering with no
    /// session awaiting one fails fast without network traffic. On engine
    /// failure nothing is appended, so a manual retry of the same logical
    /// answer produces exactly one user turn. On success the turn appends
    /// and the state transition are applied in one step, and only to the
    /// session that issued the call.
    pub async fn handle(
        &self,
        cmd: SubmitAnswerCommand,
    ) -> Result<SubmitAnswerResult, DiagnosticError> {
        let session_id = self.slot.awaiting_session_id().await?;

        let outcome = self.engine.answer(&session_id, cmd.answer).await?;

        let applied = match &outcome {
            AnswerOutcome::NextQuestion(question) => {
                let question = question.clone();
                self.slot
                    .apply(&session_id, move |session| {
                        session.record_continuation(cmd.answer, question)
                    })
                    .await?
            }
            AnswerOutcome::Concluded(result) => {
                let result = result.clone();
                self.slot
                    .apply(&session_id, move |session| {
                        session.conclude(cmd.answer, result)
                    })
                    .await?
            }
        };

        if applied == ApplyOutcome::Superseded {
            tracing::warn!(session_id = %session_id, "answer response dropped; session superseded");
            return Ok(SubmitAnswerResult::Superseded);
        }

        Ok(match outcome {
            AnswerOutcome::NextQuestion(question) => {
                tracing::debug!(session_id = %session_id, "questionnaire continues");
                SubmitAnswerResult::Continued { question }
            }
            AnswerOutcome::Concluded(result) => {
                tracing::info!(session_id = %session_id, "session concluded");
                SubmitAnswerResult::Concluded { result }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::adapters::engine::ScriptedEngine;
    use crate::domain::diagnosis::{DiagnosticType, ProbabilityTable};
    use crate::domain::foundation::SessionId;
    use crate::domain::session::{DiagnosticSession, SessionError, SessionRecord, SessionState};
    use crate::ports::{EngineError, StartedSession};

    fn test_result() -> DiagnosticResult {
        DiagnosticResult::new(
            "Worn brake pads",
            ProbabilityTable::from_entries(vec![
                ("Worn brake pads".to_string(), 0.62),
                ("Air in brake lines".to_string(), 0.38),
            ])
            .unwrap(),
            "Inspect pads.",
        )
        .unwrap()
    }

    async fn slot_with_started(id: &str) -> ActiveSession {
        let slot = ActiveSession::new();
        let mut session = DiagnosticSession::new(None);
        session
            .begin(SessionId::new(id).unwrap(), "Q1?".to_string())
            .unwrap();
        slot.install(session).await;
        slot
    }

    #[tokio::test]
    async fn continuation_advances_the_session() {
        let engine = Arc::new(ScriptedEngine::new().with_next_question("Q2?"));
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine.clone(), slot.clone());

        let result = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap();

        assert_eq!(
            result,
            SubmitAnswerResult::Continued {
                question: "Q2?".to_string()
            }
        );
        let session = slot.current().await.unwrap();
        assert_eq!(session.state(), SessionState::AwaitingAnswer);
        assert_eq!(session.current_question(), Some("Q2?"));
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(
            engine.answer_calls(),
            vec![(SessionId::new("s1").unwrap(), Answer::Yes)]
        );
    }

    #[tokio::test]
    async fn terminal_answer_concludes_the_session() {
        let engine = Arc::new(ScriptedEngine::new().with_conclusion(test_result()));
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine, slot.clone());

        let result = handler
            .handle(SubmitAnswerCommand { answer: Answer::No })
            .await
            .unwrap();

        assert_eq!(
            result,
            SubmitAnswerResult::Concluded {
                result: test_result()
            }
        );
        let session = slot.current().await.unwrap();
        assert!(session.is_concluded());
        assert!(session.current_question().is_none());
        assert_eq!(session.transcript().len(), 3);
    }

    #[tokio::test]
    async fn answer_before_start_fails_without_a_call() {
        let engine = Arc::new(ScriptedEngine::new());
        let slot = ActiveSession::new();
        let handler = SubmitAnswerHandler::new(engine.clone(), slot);

        let err = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DiagnosticError::Session(SessionError::InvalidState { .. })
        ));
        assert!(engine.answer_calls().is_empty());
    }

    #[tokio::test]
    async fn answer_after_conclusion_fails_without_a_call() {
        let engine = Arc::new(ScriptedEngine::new().with_conclusion(test_result()));
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine.clone(), slot.clone());

        handler
            .handle(SubmitAnswerCommand { answer: Answer::No })
            .await
            .unwrap();

        let err = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DiagnosticError::Session(SessionError::InvalidState { .. })
        ));
        assert_eq!(engine.answer_calls().len(), 1);
        assert_eq!(slot.current().await.unwrap().transcript().len(), 3);
    }

    #[tokio::test]
    async fn failed_answer_leaves_session_untouched_and_retry_appends_once() {
        let engine = Arc::new(
            ScriptedEngine::new()
                .with_answer_error(EngineError::transport("timed out"))
                .with_next_question("Q2?"),
        );
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine.clone(), slot.clone());

        let err = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DiagnosticError::Engine(EngineError::Transport { .. })
        ));

        // No ghost turn, state unchanged.
        let session = slot.current().await.unwrap();
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.state(), SessionState::AwaitingAnswer);

        // Retrying the same logical answer appends exactly one user turn.
        handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap();
        let session = slot.current().await.unwrap();
        assert_eq!(session.transcript().len(), 3);
        assert_eq!(engine.answer_calls().len(), 2);
    }

    #[tokio::test]
    async fn authentication_expiry_surfaces_without_mutation() {
        let engine =
            Arc::new(ScriptedEngine::new().with_answer_error(EngineError::AuthenticationExpired));
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine, slot.clone());

        let err = handler
            .handle(SubmitAnswerCommand { answer: Answer::No })
            .await
            .unwrap_err();

        assert_eq!(err, DiagnosticError::Engine(EngineError::AuthenticationExpired));
        assert_eq!(slot.current().await.unwrap().transcript().len(), 1);
    }

    #[tokio::test]
    async fn malformed_response_is_fatal_and_applies_nothing() {
        let engine = Arc::new(
            ScriptedEngine::new()
                .with_answer_error(EngineError::malformed("neither branch present")),
        );
        let slot = slot_with_started("s1").await;
        let handler = SubmitAnswerHandler::new(engine, slot.clone());

        let err = handler
            .handle(SubmitAnswerCommand { answer: Answer::No })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DiagnosticError::Engine(EngineError::MalformedResponse { .. })
        ));
        assert_eq!(slot.current().await.unwrap().transcript().len(), 1);
    }

    /// Engine that abandons the slot while the answer is in flight, as when
    /// the user discards the session before the response lands.
    struct AbandoningEngine {
        slot: ActiveSession,
        replacement: Option<DiagnosticSession>,
    }

    #[async_trait]
    impl crate::ports::DiagnosisEngine for AbandoningEngine {
        async fn start(
            &self,
            _diagnostic_type: Option<&DiagnosticType>,
        ) -> Result<StartedSession, EngineError> {
            Err(EngineError::transport("not scripted"))
        }

        async fn answer(
            &self,
            _session_id: &SessionId,
            _answer: Answer,
        ) -> Result<AnswerOutcome, EngineError> {
            self.slot.clear().await;
            if let Some(replacement) = &self.replacement {
                self.slot.install(replacement.clone()).await;
            }
            Ok(AnswerOutcome::NextQuestion("Q2?".to_string()))
        }

        async fn list_sessions(&self) -> Result<Vec<SessionRecord>, EngineError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn late_response_for_abandoned_session_is_dropped() {
        let slot = slot_with_started("s1").await;
        let engine = Arc::new(AbandoningEngine {
            slot: slot.clone(),
            replacement: None,
        });
        let handler = SubmitAnswerHandler::new(engine, slot.clone());

        let result = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap();

        assert_eq!(result, SubmitAnswerResult::Superseded);
        assert!(slot.current().await.is_none());
    }

    #[tokio::test]
    async fn late_response_never_corrupts_the_superseding_session() {
        let slot = slot_with_started("s1").await;

        let mut replacement = DiagnosticSession::new(None);
        replacement
            .begin(SessionId::new("s2").unwrap(), "Fresh Q1?".to_string())
            .unwrap();

        let engine = Arc::new(AbandoningEngine {
            slot: slot.clone(),
            replacement: Some(replacement),
        });
        let handler = SubmitAnswerHandler::new(engine, slot.clone());

        let result = handler
            .handle(SubmitAnswerCommand { answer: Answer::Yes })
            .await
            .unwrap();

        assert_eq!(result, SubmitAnswerResult::Superseded);
        let active = slot.current().await.unwrap();
        assert_eq!(active.session_id(), Some(&SessionId::new("s2").unwrap()));
        assert_eq!(active.transcript().len(), 1);
        assert_eq!(active.current_question(), Some("Fresh Q1?"));
    }
}
