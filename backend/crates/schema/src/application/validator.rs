//! Validate Payload Use Case
//!
//! Turns a constraint engine's verdict into either a normalized payload or a
//! single classified [`DomainError`]:
//! 1. Reject an empty payload outright (`BadRequest`, "Payload is Empty")
//! 2. Evaluate the payload against the shape
//! 3. Classify the first violation: a missing required field is
//!    `BadRequest`, anything else is `InvalidArgument`
//!
//! Engine faults are passed through untouched.

use kernel::error::domain_error::DomainError;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::config::ValidatorConfig;
use crate::domain::engine::{ConstraintEngine, Evaluation};
use crate::domain::shape::Shape;
use crate::domain::violation::ViolationReport;
use crate::error::{SchemaError, ValidateError, ValidateResult};
use crate::infra::native::NativeEngine;

/// Message of the empty-payload rejection
pub const EMPTY_PAYLOAD_MESSAGE: &str = "Payload is Empty";

/// Validator bound to one shape
///
/// Holds no mutable state; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Validator<E: ConstraintEngine = NativeEngine> {
    engine: E,
    shape: E::Shape,
    config: ValidatorConfig,
}

impl Validator<NativeEngine> {
    pub fn new(shape: Shape, config: ValidatorConfig) -> Self {
        Self::with_engine(NativeEngine::default(), shape, config)
    }
}

impl<E: ConstraintEngine> Validator<E> {
    /// Validator backed by a custom engine
    pub fn with_engine(engine: E, shape: E::Shape, config: ValidatorConfig) -> Self {
        Self {
            engine,
            shape,
            config,
        }
    }

    pub fn shape(&self) -> &E::Shape {
        &self.shape
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate `payload`, returning the normalized value
    ///
    /// Accepts `&Value`, `Option<&Value>` or `None`.
    pub fn validate<'a>(&self, payload: impl Into<Option<&'a Value>>) -> ValidateResult<Value> {
        let result = self.run(payload.into());
        match &result {
            Ok(_) => tracing::trace!("Payload accepted"),
            Err(err) => err.log(),
        }
        result
    }

    /// Validate, then decode the normalized value into `T`
    pub fn validate_as<'a, T: DeserializeOwned>(
        &self,
        payload: impl Into<Option<&'a Value>>,
    ) -> ValidateResult<T> {
        let value = self.validate(payload)?;
        serde_json::from_value(value).map_err(|e| {
            let err = ValidateError::Decode(e);
            err.log();
            err
        })
    }

    fn run(&self, payload: Option<&Value>) -> ValidateResult<Value> {
        let payload = match payload {
            Some(value) if !is_empty_payload(value) => value,
            _ => {
                let err = DomainError::bad_request(EMPTY_PAYLOAD_MESSAGE);
                tracing::debug!(kind = %err.kind(), "Payload rejected: empty");
                return Err(err.into());
            }
        };

        let unknown_fields = self.config.unknown_fields();
        match self.engine.evaluate(&self.shape, payload, unknown_fields)? {
            Evaluation::Valid(value) => Ok(value),
            Evaluation::Invalid(report) => {
                let err = classify(&report).ok_or(SchemaError::EmptyReport)?;
                if let Some(first) = report.first() {
                    tracing::debug!(
                        kind = %err.kind(),
                        path = %first.path().label(),
                        rule = %first.code(),
                        "Payload rejected"
                    );
                }
                Err(err.into())
            }
        }
    }
}

/// Validator for `shape` on the native engine
pub fn make_validator(shape: Shape, config: ValidatorConfig) -> Validator {
    Validator::new(shape, config)
}

/// `null`, `{}`, `[]` and `""` are empty
///
/// Other scalars, `0` and `false` included, are not: they reach the engine
/// and fail there as a non-object root.
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Classify a report by its first violation
///
/// Returns `None` for an empty report.
pub fn classify(report: &ViolationReport) -> Option<DomainError> {
    let first = report.first()?;
    let message = report.message();
    let err = if first.rule().is_required() {
        DomainError::bad_request(message)
    } else {
        DomainError::invalid_argument(message)
    };
    Some(err.with_trace(report.trace()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::violation::{FieldPath, RuleTag, Violation};
    use kernel::error::kind::ErrorKind;
    use serde_json::json;

    fn violation(name: &str, rule: RuleTag, code: &'static str, message: &str) -> Violation {
        Violation::new(FieldPath::root().key(name), rule, code, message)
    }

    #[test]
    fn test_empty_payloads() {
        assert!(is_empty_payload(&json!(null)));
        assert!(is_empty_payload(&json!({})));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!("")));
        assert!(!is_empty_payload(&json!(0)));
        assert!(!is_empty_payload(&json!(false)));
        assert!(!is_empty_payload(&json!({ "a": 1 })));
    }

    #[test]
    fn test_classify_required_first() {
        let report = ViolationReport::new(vec![
            violation("id", RuleTag::Required, "any.required", "\"id\" is required"),
            violation("age", RuleTag::Base, "number.base", "\"age\" must be a number"),
        ]);

        let err = classify(&report).unwrap();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert_eq!(err.codes(), (400, 9));
        assert_eq!(err.trace().len(), 2);
    }

    #[test]
    fn test_classify_other_first() {
        let report = ViolationReport::new(vec![
            violation("age", RuleTag::Base, "number.base", "\"age\" must be a number"),
            violation("id", RuleTag::Required, "any.required", "\"id\" is required"),
        ]);

        let err = classify(&report).unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.codes(), (422, 3));
        assert_eq!(err.message(), "\"age\" must be a number. \"id\" is required");
    }

    #[test]
    fn test_classify_empty_report() {
        assert!(classify(&ViolationReport::default()).is_none());
    }
}
