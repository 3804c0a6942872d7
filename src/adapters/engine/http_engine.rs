//! HTTP implementation of the DiagnosisEngine port.
//!
//! Talks JSON to the Car Expert diagnosis API:
//!
//! - `POST {base}/api/diagnostic/start`
//! - `POST {base}/api/diagnostic/{session_id}/answer`
//! - `GET  {base}/api/diagnostic/sessions`
//!
//! Every request carries a bearer credential fetched from the injected
//! [`CredentialProvider`] at call time; the token is never cached here.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::domain::diagnosis::{Answer, DiagnosticResult, DiagnosticType};
use crate::domain::foundation::SessionId;
use crate::domain::session::SessionRecord;
use crate::ports::{
    AnswerOutcome, CredentialProvider, DiagnosisEngine, EngineError, StartedSession,
};

/// Configuration for the HTTP engine adapter.
#[derive(Debug, Clone)]
pub struct HttpEngineConfig {
    /// Base URL of the engine API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpEngineConfig {
    /// Creates a configuration for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl From<&EngineConfig> for HttpEngineConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
        }
    }
}

/// HTTP adapter for the remote diagnosis engine.
pub struct HttpDiagnosisEngine {
    config: HttpEngineConfig,
    credentials: Arc<dyn CredentialProvider>,
    client: Client,
}

impl HttpDiagnosisEngine {
    /// Creates a new engine adapter with the given configuration and
    /// credential source.
    pub fn new(config: HttpEngineConfig, credentials: Arc<dyn CredentialProvider>) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            credentials,
            client,
        }
    }

    fn start_url(&self) -> String {
        format!("{}/api/diagnostic/start", self.config.base_url)
    }

    fn answer_url(&self, session_id: &SessionId) -> String {
        format!(
            "{}/api/diagnostic/{}/answer",
            self.config.base_url,
            session_id.as_str()
        )
    }

    fn sessions_url(&self) -> String {
        format!("{}/api/diagnostic/sessions", self.config.base_url)
    }

    /// Attaches the bearer credential and a per-request correlation id.
    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, EngineError> {
        let token = self.credentials.bearer_token().await?;
        Ok(request
            .bearer_auth(token.expose_secret())
            .header("x-request-id", Uuid::new_v4().to_string()))
    }

    /// Maps transport-level failures.
    fn map_send_error(&self, err: reqwest::Error) -> EngineError {
        if err.is_timeout() {
            EngineError::transport(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else if err.is_connect() {
            EngineError::transport(format!("connection failed: {}", err))
        } else {
            EngineError::transport(err.to_string())
        }
    }

    /// Maps non-success statuses to the protocol error taxonomy.
    async fn handle_response_status(&self, response: Response) -> Result<Response, EngineError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => Err(EngineError::AuthenticationExpired),
            StatusCode::UNPROCESSABLE_ENTITY => {
                Err(EngineError::validation_rejected(extract_detail(&error_body)))
            }
            _ => Err(EngineError::transport(format!(
                "unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

/// Pulls a human-readable message out of an error body, falling back to the
/// raw text.
fn extract_detail(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = parsed.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }
    if body.is_empty() {
        "request body rejected".to_string()
    } else {
        body.to_string()
    }
}

#[derive(Serialize)]
struct StartRequestBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic_type: Option<&'a DiagnosticType>,
}

#[derive(Deserialize)]
struct StartResponseBody {
    session_id: SessionId,
    question: String,
}

#[derive(Serialize)]
struct AnswerRequestBody {
    answer: Answer,
}

/// Raw shape of the answer response before tagged-union enforcement.
#[derive(Deserialize)]
struct AnswerResponseBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    diagnostic_result: Option<DiagnosticResult>,
}

impl AnswerResponseBody {
    /// Enforces the exactly-one-branch rule of the protocol.
    fn into_outcome(self) -> Result<AnswerOutcome, EngineError> {
        match (self.question, self.diagnostic_result) {
            (Some(question), None) => Ok(AnswerOutcome::NextQuestion(question)),
            (None, Some(result)) => Ok(AnswerOutcome::Concluded(result)),
            (Some(_), Some(_)) => Err(EngineError::malformed(
                "response carries both a question and a result",
            )),
            (None, None) => Err(EngineError::malformed(
                "response carries neither a question nor a result",
            )),
        }
    }
}

#[async_trait]
impl DiagnosisEngine for HttpDiagnosisEngine {
    async fn start(
        &self,
        diagnostic_type: Option<&DiagnosticType>,
    ) -> Result<StartedSession, EngineError> {
        tracing::debug!(?diagnostic_type, "starting diagnostic session");

        let request = self
            .authorize(self.client.post(self.start_url()))
            .await?
            .json(&StartRequestBody { diagnostic_type });

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let response = self.handle_response_status(response).await?;

        let body: StartResponseBody = response
            .json()
            .await
            .map_err(|e| EngineError::malformed(format!("invalid start response: {}", e)))?;

        tracing::debug!(session_id = %body.session_id, "session started");
        Ok(StartedSession {
            session_id: body.session_id,
            question: body.question,
        })
    }

    async fn answer(
        &self,
        session_id: &SessionId,
        answer: Answer,
    ) -> Result<AnswerOutcome, EngineError> {
        tracing::debug!(session_id = %session_id, answer = answer.as_wire(), "submitting answer");

        let request = self
            .authorize(self.client.post(self.answer_url(session_id)))
            .await?
            .json(&AnswerRequestBody { answer });

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let response = self.handle_response_status(response).await?;

        let body: AnswerResponseBody = response
            .json()
            .await
            .map_err(|e| EngineError::malformed(format!("invalid answer response: {}", e)))?;

        body.into_outcome()
    }

    async fn list_sessions(&self) -> Result<Vec<SessionRecord>, EngineError> {
        tracing::debug!("listing diagnostic history");

        let request = self.authorize(self.client.get(self.sessions_url())).await?;

        let response = request.send().await.map_err(|e| self.map_send_error(e))?;
        let response = self.handle_response_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| EngineError::malformed(format!("invalid sessions response: {}", e)))
    }
}
