//! Ports - interfaces the core consumes from the outside world.

mod credential_provider;
mod diagnosis_engine;

pub use credential_provider::{CredentialError, CredentialProvider};
pub use diagnosis_engine::{AnswerOutcome, DiagnosisEngine, EngineError, StartedSession};
