//! Payload Validation
//!
//! Validates untrusted payloads against a declared shape and reports
//! failures as classified [`DomainError`]s.
//!
//! Clean Architecture structure:
//! - `domain/` - Field descriptors, shape, violations, engine trait
//! - `application/` - Validator use case and configuration
//! - `infra/` - Native constraint engine
//! - `types` - Field builders
//!
//! ## Classification
//! - Empty payload (`null`, `{}`, `[]`, `""`, absent) is `BadRequest` ("Payload is Empty")
//! - First violation is a missing required field: `BadRequest`
//! - First violation is anything else: `InvalidArgument`
//! - Engine faults are returned unchanged as [`ValidateError::Engine`]

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod types;

// Re-exports for convenience
pub use application::config::{EngineConfig, ValidatorConfig};
pub use application::validator::{
    EMPTY_PAYLOAD_MESSAGE, Validator, classify, is_empty_payload, make_validator,
};
pub use domain::engine::{ConstraintEngine, Evaluation, UnknownFields};
pub use domain::field::Field;
pub use domain::shape::{Shape, ShapeBuilder};
pub use domain::violation::{FieldPath, PathSegment, RuleTag, Violation, ViolationReport};
pub use error::{SchemaError, SchemaResult, ValidateError, ValidateResult};
pub use infra::native::NativeEngine;

// Re-export kernel error types for unified error handling
pub use kernel::error::{DomainError, DomainResult, ErrorKind, is_domain_error};
