//! Static credential provider.
//!
//! Holds one pre-issued bearer token. Suitable for tests and for deployments
//! where the surrounding application performs the login flow and hands the
//! token in explicitly. Refresh is out of scope; once the engine rejects the
//! token the caller must re-authenticate and build a new provider.

use async_trait::async_trait;
use secrecy::Secret;
use std::sync::RwLock;

use crate::ports::{CredentialError, CredentialProvider};

/// Credential provider backed by a single injected token.
pub struct StaticCredentialProvider {
    token: RwLock<Option<Secret<String>>>,
}

impl StaticCredentialProvider {
    /// Creates a provider holding the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(Secret::new(token.into()))),
        }
    }

    /// Creates a provider with no credential (not logged in).
    pub fn empty() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }

    /// Replaces the held token after a re-authentication.
    pub fn replace(&self, token: impl Into<String>) {
        *self.token.write().expect("credential lock poisoned") =
            Some(Secret::new(token.into()));
    }

    /// Drops the held token (logout).
    pub fn clear(&self) {
        *self.token.write().expect("credential lock poisoned") = None;
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn bearer_token(&self) -> Result<Secret<String>, CredentialError> {
        self.token
            .read()
            .expect("credential lock poisoned")
            .clone()
            .ok_or(CredentialError::Missing)
    }
}
