//! Error types for the service layer.
//!
//! Two failure kinds leave the analysis pipeline: a request parameter the
//! resolver rejected, and a fetch the event store could not serve. Zero
//! qualifying transitions is NOT an error; it produces an empty result.

use crate::db::repository::RepositoryError;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for the analysis services.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A query parameter failed validation. Always recoverable by the
    /// caller correcting its input; never retried internally.
    #[error("Invalid parameter `{field}`: {reason} (got `{value}`)")]
    InvalidParameter {
        /// Name of the offending query parameter.
        field: &'static str,
        /// The raw value as received.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The event store could not return data. Propagated unchanged; retry
    /// policy belongs to the repository or the caller, not this layer.
    #[error("Upstream fetch failed: {0}")]
    UpstreamFetch(#[from] RepositoryError),
}

impl ServiceError {
    /// Create an [`ServiceError::InvalidParameter`] for a named field.
    pub fn invalid_parameter(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// The offending field name, when this is a parameter error.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            Self::UpstreamFetch(_) => None,
        }
    }
}
