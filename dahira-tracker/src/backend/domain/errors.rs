//! Typed failures raised by the domain services.
//!
//! Services return `anyhow::Result`; callers that need to tell the cases
//! apart use `err.downcast_ref::<DahiraError>()`.

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DahiraError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Identifiants invalides ou compte désactivé.")]
    InvalidCredentials,
    #[error("Account is disabled: {0}")]
    AccountDisabled(String),
    #[error("No planning row has both a date and a host assigned")]
    EmptySubmission,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Planning duration must be 1, 3, 6 or 12 months (got {0})")]
    InvalidPlanningDuration(u32),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidMonth(String),
}

impl DahiraError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DahiraError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DahiraError::Validation(message.into())
    }
}

/// Shorthand for matching a typed error inside an `anyhow::Error`
pub fn error_kind(err: &anyhow::Error) -> Option<&DahiraError> {
    err.downcast_ref::<DahiraError>()
}
