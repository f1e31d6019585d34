use thiserror::Error;

use crate::contract::model::{ProjectId, ProjectStatus, UserId};

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid session: {reason}")]
    InvalidSession { reason: String },

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("User not found: {id}")]
    UserNotFound { id: UserId },

    #[error("Project not found: {id}")]
    ProjectNotFound { id: ProjectId },

    #[error("Project {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: ProjectId,
        from: ProjectStatus,
        to: ProjectStatus,
    },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Persistence error: {message}")]
    Persistence { message: String },
}

impl DomainError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_session(reason: impl Into<String>) -> Self {
        Self::InvalidSession {
            reason: reason.into(),
        }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn project_not_found(id: ProjectId) -> Self {
        Self::ProjectNotFound { id }
    }

    pub fn invalid_transition(id: ProjectId, from: ProjectStatus, to: ProjectStatus) -> Self {
        Self::InvalidTransition { id, from, to }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence {
            message: message.into(),
        }
    }
}
