//! Credential Provider Port - supplies the bearer credential for engine calls.
//!
//! The credential is an explicit dependency injected into adapters, never
//! ambient global state. Issuance and refresh are owned by the identity
//! provider; this port only hands out the current token.

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

use super::EngineError;

/// Supplies the bearer token attached to every engine call.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Returns the current bearer token.
    ///
    /// # Errors
    ///
    /// - `Missing` if no credential is available (not logged in)
    /// - `Expired` if the provider knows the credential is no longer valid
    async fn bearer_token(&self) -> Result<Secret<String>, CredentialError>;
}

/// Failure to obtain a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("no credential available")]
    Missing,
    #[error("credential expired")]
    Expired,
}

// Absence and rejection surface as the same distinguished condition,
// regardless of which call needed the credential.
impl From<CredentialError> for EngineError {
    fn from(_: CredentialError) -> Self {
        EngineError::AuthenticationExpired
    }
}
