//! Session-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::SessionState;

/// Session-specific errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Operation is illegal in the session's current state.
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
}

impl SessionError {
    pub fn invalid_state(operation: &'static str, state: SessionState) -> Self {
        SessionError::InvalidState { operation, state }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::InvalidState { state, .. } => match state {
                SessionState::NotStarted => ErrorCode::SessionNotStarted,
                SessionState::Concluded => ErrorCode::SessionConcluded,
                SessionState::AwaitingAnswer => ErrorCode::InvalidStateTransition,
            },
            SessionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SessionError::InvalidState { operation, state } => {
                format!("Cannot {} while session is {:?}", operation, state)
            }
            SessionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SessionError {}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        SessionError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SessionError {
    fn from(err: DomainError) -> Self {
        SessionError::ValidationFailed {
            field: err
                .details
                .get("field")
                .cloned()
                .unwrap_or_else(|| "unknown".to_string()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_state_codes_reflect_the_offending_state() {
        let err = SessionError::invalid_state("answer", SessionState::NotStarted);
        assert_eq!(err.code(), ErrorCode::SessionNotStarted);

        let err = SessionError::invalid_state("answer", SessionState::Concluded);
        assert_eq!(err.code(), ErrorCode::SessionConcluded);

        let err = SessionError::invalid_state("begin", SessionState::AwaitingAnswer);
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn display_names_operation_and_state() {
        let err = SessionError::invalid_state("answer", SessionState::NotStarted);
        assert_eq!(err.to_string(), "Cannot answer while session is NotStarted");
    }

    #[test]
    fn validation_error_carries_field_through() {
        let err: SessionError = ValidationError::empty_field("question").into();
        match err {
            SessionError::ValidationFailed { field, .. } => assert_eq!(field, "question"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
