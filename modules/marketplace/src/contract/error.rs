use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to the presentation layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketplaceError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Invalid session: {message}")]
    InvalidSession { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error")]
    Internal,
}

impl MarketplaceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn invalid_session(message: impl Into<String>) -> Self {
        Self::InvalidSession {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for MarketplaceError {
    fn from(domain_error: DomainError) -> Self {
        use DomainError::*;
        let message = domain_error.to_string();
        match domain_error {
            PasswordMismatch | MissingField { .. } | Validation { .. } => Self::validation(message),
            InvalidCredentials | NotAuthenticated => Self::unauthorized(message),
            InvalidSession { .. } => Self::invalid_session(message),
            UserNotFound { .. } | ProjectNotFound { .. } => Self::not_found(message),
            InvalidTransition { .. } => Self::conflict(message),
            Persistence { .. } => Self::internal(),
        }
    }
}
