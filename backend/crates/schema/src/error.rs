//! Schema Error Types
//!
//! `SchemaError` covers faults in shape construction and inside a constraint
//! engine. `ValidateError` is what a [`Validator`](crate::Validator) call
//! returns: either a classified [`DomainError`] or an unclassified fault that
//! passed through untouched.

use kernel::error::domain_error::DomainError;
use kernel::error::kind::ErrorKind;
use thiserror::Error;

/// Shape construction / engine result type alias
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Validator result type alias
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Faults in shape construction or engine internals
///
/// These indicate a programming error, never a bad payload.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Field declared with an empty name
    #[error("Field name cannot be empty")]
    EmptyFieldName,

    /// Field declared twice in the same shape
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// Regex passed to `pattern` does not compile
    #[error("Invalid pattern {pattern}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Engine reported a failed evaluation without any violation
    #[error("Constraint engine returned an empty violation report")]
    EmptyReport,

    /// Any other engine-internal fault
    #[error("Constraint engine fault: {0}")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SchemaError {
    /// Wrap an arbitrary engine fault
    pub fn engine(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SchemaError::Engine(err.into())
    }
}

/// Outcome of a failed `validate` call
#[derive(Debug, Error)]
pub enum ValidateError {
    /// Payload rejected; carries the classified error
    #[error(transparent)]
    Rejected(#[from] DomainError),

    /// Engine fault, propagated unchanged
    #[error(transparent)]
    Engine(#[from] SchemaError),

    /// Normalized value did not fit the requested Rust type
    #[error("Failed to decode validated payload: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ValidateError {
    /// Classified error, if the payload was rejected
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            ValidateError::Rejected(err) => Some(err),
            _ => None,
        }
    }

    /// Take the classified error, or give back `self`
    pub fn into_domain(self) -> Result<DomainError, Self> {
        match self {
            ValidateError::Rejected(err) => Ok(err),
            other => Err(other),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.domain().map(DomainError::kind)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ValidateError::Rejected(_))
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            // Logged with its path and rule when classified
            ValidateError::Rejected(_) => {}
            ValidateError::Engine(e) => {
                tracing::warn!(error = %e, "Constraint engine fault");
            }
            ValidateError::Decode(e) => {
                tracing::warn!(error = %e, "Validated payload decode failed");
            }
        }
    }
}
