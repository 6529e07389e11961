//! Field Descriptors
//!
//! A `Field` is one entry of a declared shape: the required/optional policy,
//! an optional default and the type-specific rules the engine enforces.
//! Descriptors are built through [`crate::types`] and are immutable after
//! construction.

use chrono::{DateTime, Utc};
use platform::address::AddressOptions;
use platform::encoding::BinaryEncoding;
use platform::network::{CidrPolicy, IpVersion};
use platform::text::{Case, NormalizationForm};
use regex::Regex;
use serde_json::Value;

use crate::domain::shape::Shape;

/// One declared field
#[derive(Debug, Clone)]
pub struct Field {
    pub(crate) required: bool,
    pub(crate) default: Option<Value>,
    pub(crate) kind: FieldKind,
}

impl Field {
    pub(crate) fn new(required: bool, default: Option<Value>, kind: FieldKind) -> Self {
        Self {
            required,
            default,
            kind,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value used when an optional field is not provided
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Type name used in violation codes (`number`, `string`, ...)
    pub fn type_name(&self) -> &'static str {
        self.kind.type_name()
    }
}

/// Type-specific rules
#[derive(Debug, Clone)]
pub enum FieldKind {
    Object(ObjectRules),
    Number(NumberRules),
    String(StringRules),
    Array(ArrayRules),
    Binary(BinaryRules),
    Boolean,
    Date(DateRules),
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Object(_) => "object",
            FieldKind::Number(_) => "number",
            FieldKind::String(_) => "string",
            FieldKind::Array(_) => "array",
            FieldKind::Binary(_) => "binary",
            FieldKind::Boolean => "boolean",
            FieldKind::Date(_) => "date",
        }
    }
}

/// Exact / minimum / maximum count
///
/// When `exact` is set the bounds are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountRule {
    pub exact: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl CountRule {
    pub(crate) fn new(exact: Option<usize>, min: Option<usize>, max: Option<usize>) -> Self {
        match exact {
            Some(_) => Self {
                exact,
                min: None,
                max: None,
            },
            None => Self { exact, min, max },
        }
    }

    pub(crate) fn exact(exact: Option<usize>) -> Self {
        Self::new(exact, None, None)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObjectRules {
    /// Declared keys; `None` accepts any key
    pub(crate) keys: Option<Shape>,
    /// Keep undeclared keys regardless of the policy
    pub(crate) unknown: bool,
    pub(crate) count: CountRule,
    /// Parse strings holding a JSON object
    pub(crate) parse_json: bool,
}

/// Sign constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Default)]
pub struct NumberRules {
    pub(crate) integer: bool,
    pub(crate) port: bool,
    pub(crate) sign: Option<Sign>,
    pub(crate) greater: Option<f64>,
    pub(crate) less: Option<f64>,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    /// Accept values beyond +/-(2^53 - 1)
    pub(crate) allow_unsafe: bool,
    /// Round to this many decimal places
    pub(crate) precision: Option<u32>,
}

/// Named string formats
#[derive(Debug, Clone, Default)]
pub enum StringFormat {
    #[default]
    Any,
    Alphanum,
    Token,
    Email(AddressOptions),
    Pattern {
        regex: Regex,
        name: Option<String>,
    },
    CreditCard,
    DataUri {
        padding_required: bool,
    },
    Domain(AddressOptions),
    Hex {
        byte_aligned: bool,
    },
    Ip {
        versions: Vec<IpVersion>,
        cidr: CidrPolicy,
    },
    Base64 {
        padding_required: bool,
        url_safe: bool,
    },
}

#[derive(Debug, Clone, Default)]
pub struct StringRules {
    pub(crate) trim: bool,
    pub(crate) case: Option<Case>,
    pub(crate) normalize: Option<NormalizationForm>,
    pub(crate) format: StringFormat,
    pub(crate) length: CountRule,
}

#[derive(Debug, Clone, Default)]
pub struct ArrayRules {
    /// Rule applied to every item; `None` accepts any item
    pub(crate) item: Option<Box<Field>>,
    pub(crate) count: CountRule,
}

#[derive(Debug, Clone, Default)]
pub struct BinaryRules {
    pub(crate) encoding: BinaryEncoding,
    /// Byte count after decoding
    pub(crate) count: CountRule,
}

/// Numeric timestamp unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFormat {
    /// Milliseconds since the epoch
    #[default]
    Javascript,
    /// Seconds since the epoch
    Unix,
}

impl TimestampFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampFormat::Javascript => "javascript",
            TimestampFormat::Unix => "unix",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateRules {
    /// Only ISO 8601 strings
    pub(crate) iso: bool,
    /// Only numeric timestamps
    pub(crate) timestamp: Option<TimestampFormat>,
    pub(crate) greater: Option<DateTime<Utc>>,
    pub(crate) less: Option<DateTime<Utc>>,
    pub(crate) min: Option<DateTime<Utc>>,
    pub(crate) max: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_count_drops_bounds() {
        let rule = CountRule::new(Some(3), Some(1), Some(10));
        assert_eq!(rule.exact, Some(3));
        assert_eq!(rule.min, None);
        assert_eq!(rule.max, None);

        let rule = CountRule::new(None, Some(1), Some(10));
        assert_eq!((rule.min, rule.max), (Some(1), Some(10)));
    }

    #[test]
    fn test_type_names() {
        let field = Field::new(true, None, FieldKind::Boolean);
        assert_eq!(field.type_name(), "boolean");
        assert!(field.is_required());
        assert!(field.default_value().is_none());
    }
}
