//! Constraint Engine Trait
//!
//! Interface for evaluating a payload against a shape. Implementation is in
//! the infrastructure layer; the validator only sees this trait.

use serde_json::Value;

use crate::domain::violation::ViolationReport;
use crate::error::SchemaResult;

/// What to do with keys the shape does not declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFields {
    /// Drop them from the normalized output
    #[default]
    Strip,
    /// Keep them at the top level
    Allow,
}

/// Result of a completed evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// Normalized payload, coercions applied
    Valid(Value),
    /// At least one violation, in declaration order
    Invalid(ViolationReport),
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Evaluation::Valid(_))
    }
}

/// Constraint engine trait
///
/// `Err` means the engine itself failed; a bad payload is always
/// `Ok(Evaluation::Invalid(_))`.
pub trait ConstraintEngine: Send + Sync {
    /// Shape representation this engine understands
    type Shape: Send + Sync;

    fn evaluate(
        &self,
        shape: &Self::Shape,
        payload: &Value,
        unknown_fields: UnknownFields,
    ) -> SchemaResult<Evaluation>;
}
