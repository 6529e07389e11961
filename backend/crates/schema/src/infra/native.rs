//! Native Constraint Engine
//!
//! Walks a [`Shape`] over a JSON payload in declaration order, applying
//! coercions and collecting violations.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use platform::{address, encoding, network, text};
use serde_json::{Map, Number, Value};

use crate::application::config::EngineConfig;
use crate::domain::engine::{ConstraintEngine, Evaluation, UnknownFields};
use crate::domain::field::{
    ArrayRules, BinaryRules, CountRule, DateRules, Field, FieldKind, NumberRules, ObjectRules,
    Sign, StringFormat, StringRules, TimestampFormat,
};
use crate::domain::shape::Shape;
use crate::domain::violation::{FieldPath, RuleTag, Violation, ViolationReport};
use crate::error::{SchemaError, SchemaResult};

/// Largest integer a double represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Built-in engine for [`Shape`]
#[derive(Debug, Clone, Default)]
pub struct NativeEngine {
    config: EngineConfig,
}

impl NativeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl ConstraintEngine for NativeEngine {
    type Shape = Shape;

    fn evaluate(
        &self,
        shape: &Shape,
        payload: &Value,
        unknown_fields: UnknownFields,
    ) -> SchemaResult<Evaluation> {
        let mut pass = Pass {
            abort_early: self.config.abort_early,
            strip_unknown: unknown_fields == UnknownFields::Strip,
            violations: Vec::new(),
        };

        let root = FieldPath::root();
        let output = match payload {
            Value::Object(map) => {
                pass.keys(shape, map, &root, unknown_fields == UnknownFields::Allow)
            }
            _ => pass.report(&root, RuleTag::Base, "object.base", "must be of type object"),
        };

        tracing::trace!(violations = pass.violations.len(), "Shape evaluated");

        match output {
            _ if !pass.violations.is_empty() => {
                Ok(Evaluation::Invalid(ViolationReport::new(pass.violations)))
            }
            Some(value) => Ok(Evaluation::Valid(value)),
            None => Err(SchemaError::EmptyReport),
        }
    }
}

/// What a count rule counts
#[derive(Debug, Clone, Copy)]
enum Unit {
    Keys,
    Characters,
    Items,
    Bytes,
}

impl Unit {
    fn type_name(&self) -> &'static str {
        match self {
            Unit::Keys => "object",
            Unit::Characters => "string",
            Unit::Items => "array",
            Unit::Bytes => "binary",
        }
    }

    fn reason(&self, tag: RuleTag, limit: usize) -> String {
        let bound = match tag {
            RuleTag::Min => "at least ",
            RuleTag::Max => "less than or equal to ",
            _ => "",
        };
        match self {
            Unit::Keys => {
                let keys = if limit == 1 { "key" } else { "keys" };
                format!("must have {}{} {}", bound, limit, keys)
            }
            Unit::Characters => format!("length must be {}{} characters long", bound, limit),
            Unit::Items => format!("must contain {}{} items", bound, limit),
            Unit::Bytes => format!("must be {}{} bytes", bound, limit),
        }
    }
}

fn code(type_name: &str, tag: RuleTag) -> String {
    format!("{}.{}", type_name, tag.as_str())
}

/// Value emitted for a not-provided optional field
fn absent(field: &Field) -> Value {
    field.default.clone().unwrap_or(Value::Null)
}

/// `null` and `""` count as not provided
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// State of one evaluation
struct Pass {
    abort_early: bool,
    strip_unknown: bool,
    violations: Vec<Violation>,
}

impl Pass {
    fn halted(&self) -> bool {
        self.abort_early && !self.violations.is_empty()
    }

    /// Record a violation; always yields `None`
    fn report<T>(
        &mut self,
        path: &FieldPath,
        rule: RuleTag,
        code: impl Into<Cow<'static, str>>,
        reason: impl AsRef<str>,
    ) -> Option<T> {
        let message = format!("\"{}\" {}", path.label(), reason.as_ref());
        self.violations
            .push(Violation::new(path.clone(), rule, code, message));
        None
    }

    fn keys(
        &mut self,
        shape: &Shape,
        input: &Map<String, Value>,
        path: &FieldPath,
        allow_unknown: bool,
    ) -> Option<Value> {
        let mut output = Map::new();
        let mut failed = false;

        for (name, field) in shape.iter() {
            match self.field(field, input.get(name), &path.key(name)) {
                Some(value) => {
                    output.insert(name.to_string(), value);
                }
                None => failed = true,
            }
            if self.halted() {
                return None;
            }
        }

        for (key, value) in input.iter().filter(|(key, _)| !shape.contains(key)) {
            if allow_unknown {
                output.insert(key.clone(), value.clone());
            } else if !self.strip_unknown {
                failed = true;
                let child = path.key(key);
                self.report::<()>(&child, RuleTag::Unknown, "object.unknown", "is not allowed");
                if self.halted() {
                    return None;
                }
            }
        }

        (!failed).then_some(Value::Object(output))
    }

    fn field(&mut self, field: &Field, value: Option<&Value>, path: &FieldPath) -> Option<Value> {
        match value {
            None if field.required => {
                self.report(path, RuleTag::Required, "any.required", "is required")
            }
            None => Some(absent(field)),
            Some(value) if !field.required && is_blank(value) => Some(absent(field)),
            Some(value) => self.value(field, value, path),
        }
    }

    fn value(&mut self, field: &Field, value: &Value, path: &FieldPath) -> Option<Value> {
        match &field.kind {
            FieldKind::Object(rules) => self.object(rules, value, path),
            FieldKind::Number(rules) => self.number(rules, value, path),
            FieldKind::String(rules) => self.string(field, rules, value, path),
            FieldKind::Array(rules) => self.array(rules, value, path),
            FieldKind::Binary(rules) => self.binary(rules, value, path),
            FieldKind::Boolean => self.boolean(value, path),
            FieldKind::Date(rules) => self.date(rules, value, path),
        }
    }

    fn count(
        &mut self,
        rule: &CountRule,
        actual: usize,
        path: &FieldPath,
        unit: Unit,
    ) -> Option<()> {
        let violated = if let Some(limit) = rule.exact {
            (actual != limit).then_some((RuleTag::Length, limit))
        } else if let Some(limit) = rule.min.filter(|&limit| actual < limit) {
            Some((RuleTag::Min, limit))
        } else {
            rule.max
                .filter(|&limit| actual > limit)
                .map(|limit| (RuleTag::Max, limit))
        };

        match violated {
            Some((tag, limit)) => {
                self.report(path, tag, code(unit.type_name(), tag), unit.reason(tag, limit))
            }
            None => Some(()),
        }
    }

    fn object(&mut self, rules: &ObjectRules, value: &Value, path: &FieldPath) -> Option<Value> {
        let parsed;
        let map = match value {
            Value::Object(map) => map,
            Value::String(s) if rules.parse_json && s.trim_start().starts_with('{') => {
                match serde_json::from_str::<Value>(s) {
                    Ok(Value::Object(map)) => {
                        parsed = map;
                        &parsed
                    }
                    _ => {
                        let reason = "must be valid JSON";
                        return self.report(path, RuleTag::Format, "object.json", reason);
                    }
                }
            }
            _ => return self.report(path, RuleTag::Base, "object.base", "must be of type object"),
        };

        let output = match &rules.keys {
            Some(shape) => self.keys(shape, map, path, rules.unknown)?,
            None => Value::Object(map.clone()),
        };

        let keys = output.as_object().map_or(0, Map::len);
        self.count(&rules.count, keys, path, Unit::Keys)?;
        Some(output)
    }

    fn number(&mut self, rules: &NumberRules, value: &Value, path: &FieldPath) -> Option<Value> {
        let Some(n) = numeric(value) else {
            return self.report(path, RuleTag::Base, "number.base", "must be a number");
        };

        if !rules.allow_unsafe && n.abs() > MAX_SAFE_INTEGER {
            return self.report(path, RuleTag::Unsafe, "number.unsafe", "must be a safe number");
        }
        if rules.port && (n.fract() != 0.0 || !(0.0..=65535.0).contains(&n)) {
            return self.report(path, RuleTag::Port, "number.port", "must be a valid port");
        }
        if rules.integer && n.fract() != 0.0 {
            return self.report(path, RuleTag::Integer, "number.integer", "must be an integer");
        }

        let n = match rules.precision {
            Some(places) => round(n, places),
            None => n,
        };

        let sign = match rules.sign {
            Some(Sign::Positive) if n <= 0.0 => Some((RuleTag::Positive, "positive")),
            Some(Sign::Negative) if n >= 0.0 => Some((RuleTag::Negative, "negative")),
            _ => None,
        };
        if let Some((tag, name)) = sign {
            let reason = format!("must be a {} number", name);
            return self.report(path, tag, code("number", tag), reason);
        }

        for (limit, tag) in bounds(rules.greater, rules.less, rules.min, rules.max) {
            if !within(tag, n, limit) {
                let reason = format!("must be {} {}", relation(tag), limit);
                return self.report(path, tag, code("number", tag), reason);
            }
        }

        Some(number_value(n, value))
    }

    fn string(
        &mut self,
        field: &Field,
        rules: &StringRules,
        value: &Value,
        path: &FieldPath,
    ) -> Option<Value> {
        let Value::String(raw) = value else {
            return self.report(path, RuleTag::Base, "string.base", "must be a string");
        };

        let mut s = Cow::Borrowed(raw.as_str());
        if let Some(form) = rules.normalize {
            s = Cow::Owned(text::normalize(&s, form));
        }
        if let Some(case) = rules.case {
            s = Cow::Owned(case.apply(&s));
        }
        if rules.trim && s.trim().len() != s.len() {
            s = Cow::Owned(s.trim().to_string());
        }

        if s.is_empty() {
            return if field.required {
                self.report(path, RuleTag::Empty, "string.empty", "is not allowed to be empty")
            } else {
                Some(absent(field))
            };
        }

        if let Some((tag, code, reason)) = format_failure(&rules.format, &s) {
            return self.report(path, tag, code, reason);
        }
        if let StringFormat::Hex { byte_aligned: true } = rules.format {
            s = Cow::Owned(encoding::align_hex(&s));
        }

        self.count(&rules.length, text::char_len(&s), path, Unit::Characters)?;
        Some(Value::String(s.into_owned()))
    }

    fn array(&mut self, rules: &ArrayRules, value: &Value, path: &FieldPath) -> Option<Value> {
        let Value::Array(items) = value else {
            return self.report(path, RuleTag::Base, "array.base", "must be an array");
        };

        let mut output = Vec::with_capacity(items.len());
        let mut failed = false;
        for (index, item) in items.iter().enumerate() {
            let checked = match &rules.item {
                Some(field) => self.field(field, Some(item), &path.index(index)),
                None => Some(item.clone()),
            };
            match checked {
                Some(item) => output.push(item),
                None => failed = true,
            }
            if self.halted() {
                return None;
            }
        }
        if failed {
            return None;
        }

        self.count(&rules.count, output.len(), path, Unit::Items)?;
        Some(Value::Array(output))
    }

    fn binary(&mut self, rules: &BinaryRules, value: &Value, path: &FieldPath) -> Option<Value> {
        let bytes = match value {
            Value::String(s) => rules.encoding.decode(s).ok(),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_u64().and_then(|b| u8::try_from(b).ok()))
                .collect::<Option<Vec<u8>>>(),
            _ => None,
        };
        let Some(bytes) = bytes else {
            return self.report(path, RuleTag::Base, "binary.base", "must be a buffer or a string");
        };

        self.count(&rules.count, bytes.len(), path, Unit::Bytes)?;
        Some(value.clone())
    }

    fn boolean(&mut self, value: &Value, path: &FieldPath) -> Option<Value> {
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        };

        match parsed {
            Some(b) => Some(Value::Bool(b)),
            None => self.report(path, RuleTag::Base, "boolean.base", "must be a boolean"),
        }
    }

    fn date(&mut self, rules: &DateRules, value: &Value, path: &FieldPath) -> Option<Value> {
        let parsed = match (rules.timestamp, rules.iso) {
            (Some(unit), _) => match numeric(value).and_then(|n| from_timestamp(n, unit)) {
                Some(date) => date,
                None => {
                    let reason = match unit {
                        TimestampFormat::Javascript => {
                            "must be in timestamp or number of milliseconds format"
                        }
                        TimestampFormat::Unix => "must be in timestamp or number of seconds format",
                    };
                    return self.report(path, RuleTag::Format, "date.format", reason);
                }
            },
            (None, true) => match value.as_str().and_then(parse_iso) {
                Some(date) => date,
                None => {
                    let reason = "must be in ISO 8601 date format";
                    return self.report(path, RuleTag::Format, "date.format", reason);
                }
            },
            (None, false) => match parse_any_date(value) {
                Some(date) => date,
                None => {
                    return self.report(path, RuleTag::Base, "date.base", "must be a valid date");
                }
            },
        };

        for (limit, tag) in bounds(rules.greater, rules.less, rules.min, rules.max) {
            if !within(tag, parsed, limit) {
                let reason = format!("must be {} \"{}\"", relation(tag), format_date(&limit));
                return self.report(path, tag, code("date", tag), reason);
            }
        }

        Some(Value::String(format_date(&parsed)))
    }
}

fn format_failure(format: &StringFormat, s: &str) -> Option<(RuleTag, &'static str, String)> {
    let failure = match format {
        StringFormat::Alphanum if !text::is_alphanum(s) => (
            RuleTag::Format,
            "string.alphanum",
            "must only contain alpha-numeric characters".to_string(),
        ),
        StringFormat::Token if !text::is_token(s) => (
            RuleTag::Format,
            "string.token",
            "must only contain alpha-numeric and underscore characters".to_string(),
        ),
        StringFormat::Email(options) if !address::is_valid_email(s, options) => (
            RuleTag::Format,
            "string.email",
            "must be a valid email".to_string(),
        ),
        StringFormat::Pattern { regex, name } if !regex.is_match(s) => match name {
            Some(name) => (
                RuleTag::Pattern,
                "string.pattern.name",
                format!("with value \"{}\" fails to match the {} pattern", s, name),
            ),
            None => (
                RuleTag::Pattern,
                "string.pattern.base",
                format!(
                    "with value \"{}\" fails to match the required pattern: /{}/",
                    s,
                    regex.as_str()
                ),
            ),
        },
        StringFormat::CreditCard if !encoding::is_credit_card(s) => (
            RuleTag::Format,
            "string.creditCard",
            "must be a credit card".to_string(),
        ),
        StringFormat::DataUri { padding_required }
            if !encoding::is_data_uri(s, *padding_required) =>
        {
            (
                RuleTag::Format,
                "string.dataUri",
                "must be a valid dataUri string".to_string(),
            )
        }
        StringFormat::Domain(options) if !address::is_valid_domain(s, options) => (
            RuleTag::Format,
            "string.domain",
            "must contain a valid domain name".to_string(),
        ),
        StringFormat::Hex { .. } if !encoding::is_hex(s) => (
            RuleTag::Format,
            "string.hex",
            "must only contain hexadecimal characters".to_string(),
        ),
        StringFormat::Ip { versions, cidr } => {
            let Err(reason) = network::check_ip(s, versions, *cidr) else {
                return None;
            };
            tracing::trace!(%reason, "IP literal rejected");
            if versions.is_empty() {
                (
                    RuleTag::Format,
                    "string.ip",
                    format!("must be a valid ip address with a {} CIDR", cidr.as_str()),
                )
            } else {
                let versions: Vec<&str> = versions.iter().map(|v| v.as_str()).collect();
                (
                    RuleTag::Format,
                    "string.ipVersion",
                    format!(
                        "must be a valid ip address of one of the following versions [{}] \
                         with a {} CIDR",
                        versions.join(", "),
                        cidr.as_str()
                    ),
                )
            }
        }
        StringFormat::Base64 {
            padding_required,
            url_safe,
        } if !encoding::is_base64(s, *padding_required, *url_safe) => (
            RuleTag::Format,
            "string.base64",
            "must be a valid base64 string".to_string(),
        ),
        _ => return None,
    };
    Some(failure)
}

/// Bounds in checking order: greater, less, max, min
fn bounds<T>(
    greater: Option<T>,
    less: Option<T>,
    min: Option<T>,
    max: Option<T>,
) -> impl Iterator<Item = (T, RuleTag)> {
    [
        (greater, RuleTag::Greater),
        (less, RuleTag::Less),
        (max, RuleTag::Max),
        (min, RuleTag::Min),
    ]
    .into_iter()
    .filter_map(|(limit, tag)| limit.map(|limit| (limit, tag)))
}

fn within<T: PartialOrd>(tag: RuleTag, value: T, limit: T) -> bool {
    match tag {
        RuleTag::Greater => value > limit,
        RuleTag::Less => value < limit,
        RuleTag::Max => value <= limit,
        _ => value >= limit,
    }
}

fn relation(tag: RuleTag) -> &'static str {
    match tag {
        RuleTag::Greater => "greater than",
        RuleTag::Less => "less than",
        RuleTag::Max => "less than or equal to",
        _ => "greater than or equal to",
    }
}

fn round(n: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places.min(15) as i32);
    (n * factor).round() / factor
}

/// Keep the input number when unchanged so wide integers stay exact
fn number_value(n: f64, original: &Value) -> Value {
    if let Value::Number(number) = original {
        if number.as_f64() == Some(n) {
            return original.clone();
        }
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

fn numeric(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn from_timestamp(n: f64, unit: TimestampFormat) -> Option<DateTime<Utc>> {
    let millis = match unit {
        TimestampFormat::Javascript => n,
        TimestampFormat::Unix => n * 1000.0,
    };
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis.round() as i64)
}

fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    DateTime::parse_from_rfc3339(s)
        .map(|date| date.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|date| date.and_utc())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
                .ok()
                .map(|date| date.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|date| date.and_utc())
        })
}

fn parse_any_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_iso(s)
            .or_else(|| {
                NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M:%S%.f")
                    .ok()
                    .map(|date| date.and_utc())
            })
            .or_else(|| {
                DateTime::parse_from_rfc2822(s.trim())
                    .ok()
                    .map(|date| date.with_timezone(&Utc))
            })
            .or_else(|| {
                numeric(value).and_then(|n| from_timestamp(n, TimestampFormat::Javascript))
            }),
        Value::Number(_) => {
            numeric(value).and_then(|n| from_timestamp(n, TimestampFormat::Javascript))
        }
        _ => None,
    }
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{self, Args, FloatProps, HexArgs, HexProps, IntegerProps, ObjectProps};
    use crate::types::{DateProps, LengthProps, PortProps, StringArgs, StringProps};
    use serde_json::json;

    fn eval(shape: &Shape, payload: Value) -> Evaluation {
        NativeEngine::default()
            .evaluate(shape, &payload, UnknownFields::Strip)
            .unwrap()
    }

    fn first(evaluation: Evaluation) -> Violation {
        match evaluation {
            Evaluation::Invalid(report) => report.first().cloned().unwrap(),
            Evaluation::Valid(value) => panic!("expected violation, got {}", value),
        }
    }

    fn valid(evaluation: Evaluation) -> Value {
        match evaluation {
            Evaluation::Valid(value) => value,
            Evaluation::Invalid(report) => panic!("unexpected violations: {}", report.message()),
        }
    }

    #[test]
    fn test_required_message() {
        let shape = Shape::builder()
            .field("id", types::integer(true, IntegerProps::default(), Args::default()))
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({})));
        assert_eq!(violation.rule(), RuleTag::Required);
        assert_eq!(violation.code(), "any.required");
        assert_eq!(violation.message(), "\"id\" is required");
    }

    #[test]
    fn test_non_object_payload() {
        let shape = Shape::default();
        let violation = first(eval(&shape, json!(42)));
        assert_eq!(violation.rule(), RuleTag::Base);
        assert_eq!(violation.message(), "\"value\" must be of type object");
    }

    #[test]
    fn test_numeric_string_coerced() {
        let shape = Shape::builder()
            .field("age", types::integer(true, IntegerProps::default(), Args::default()))
            .field("ratio", types::float(true, FloatProps::default(), Args::default()))
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "age": " 42 ", "ratio": "0.5" })));
        assert_eq!(value, json!({ "age": 42, "ratio": 0.5 }));
    }

    #[test]
    fn test_zero_bounds_enforced() {
        let shape = Shape::builder()
            .field(
                "n",
                types::integer(
                    true,
                    IntegerProps {
                        gt: Some(0.0),
                        ..Default::default()
                    },
                    Args::default(),
                ),
            )
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "n": 0 })));
        assert_eq!(violation.rule(), RuleTag::Greater);
        assert_eq!(violation.message(), "\"n\" must be greater than 0");
    }

    #[test]
    fn test_float_precision_rounds() {
        let shape = Shape::builder()
            .field(
                "price",
                types::float(
                    true,
                    FloatProps {
                        precision: Some(2),
                        ..Default::default()
                    },
                    Args::default(),
                ),
            )
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "price": 1.23456 })));
        assert_eq!(value, json!({ "price": 1.23 }));
    }

    #[test]
    fn test_unsafe_integer_rejected() {
        let shape = Shape::builder()
            .field("big", types::integer(true, IntegerProps::default(), Args::default()))
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "big": 9_007_199_254_740_993_u64 })));
        assert_eq!(violation.rule(), RuleTag::Unsafe);
    }

    #[test]
    fn test_port_violations() {
        let shape = Shape::builder()
            .field("port", types::port(true, PortProps::default(), Args::default()))
            .build()
            .unwrap();

        for port in [json!(80.5), json!(70000), json!(-1)] {
            let violation = first(eval(&shape, json!({ "port": port })));
            assert_eq!(violation.rule(), RuleTag::Port);
            assert_eq!(violation.code(), "number.port");
            assert_eq!(violation.message(), "\"port\" must be a valid port");
        }
        assert_eq!(valid(eval(&shape, json!({ "port": "8080" }))), json!({ "port": 8080 }));
    }

    #[test]
    fn test_optional_defaults() {
        let shape = Shape::builder()
            .field(
                "count",
                types::integer(
                    false,
                    IntegerProps::default(),
                    Args {
                        default: Some(json!(0)),
                    },
                ),
            )
            .field(
                "flag",
                types::boolean(
                    false,
                    Args {
                        default: Some(json!(false)),
                    },
                ),
            )
            .field("note", types::string(false, StringProps::default(), StringArgs::default()))
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "count": null, "note": "   " })));
        assert_eq!(value, json!({ "count": 0, "flag": false, "note": null }));
    }

    #[test]
    fn test_required_null_is_type_violation() {
        let shape = Shape::builder()
            .field("name", types::string(true, StringProps::default(), StringArgs::default()))
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "name": null })));
        assert_eq!(violation.rule(), RuleTag::Base);
        assert_eq!(violation.message(), "\"name\" must be a string");

        let violation = first(eval(&shape, json!({ "name": "" })));
        assert_eq!(violation.rule(), RuleTag::Empty);
    }

    #[test]
    fn test_string_length_message() {
        let shape = Shape::builder()
            .field(
                "name",
                types::string(
                    true,
                    StringProps {
                        min: Some(3),
                        ..Default::default()
                    },
                    StringArgs::default(),
                ),
            )
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "name": " ab " })));
        assert_eq!(violation.rule(), RuleTag::Min);
        assert_eq!(violation.code(), "string.min");
        assert_eq!(
            violation.message(),
            "\"name\" length must be at least 3 characters long"
        );
    }

    #[test]
    fn test_nested_paths() {
        let address = Shape::builder()
            .field("city", types::string(true, StringProps::default(), StringArgs::default()))
            .build()
            .unwrap();
        let shape = Shape::builder()
            .field(
                "address",
                types::object(true, address, ObjectProps::default(), Args::default()),
            )
            .field(
                "tags",
                types::array(
                    false,
                    Some(types::integer(true, IntegerProps::default(), Args::default())),
                    LengthProps::default(),
                    Args::default(),
                ),
            )
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "address": {} })));
        assert_eq!(violation.path().to_string(), "address.city");
        assert_eq!(violation.message(), "\"address.city\" is required");

        let violation = first(eval(
            &shape,
            json!({ "address": { "city": "Kyoto" }, "tags": [1, "x"] }),
        ));
        assert_eq!(violation.path().to_string(), "tags[1]");
        assert_eq!(violation.message(), "\"tags[1]\" must be a number");
    }

    #[test]
    fn test_unknown_keys_by_policy() {
        let inner = Shape::builder()
            .field("a", types::integer(false, IntegerProps::default(), Args::default()))
            .build()
            .unwrap();
        let shape = Shape::builder()
            .field(
                "inner",
                types::object(false, inner, ObjectProps::default(), Args::default()),
            )
            .build()
            .unwrap();
        let payload = json!({ "inner": { "a": 1, "b": 2 }, "top": true });
        let engine = NativeEngine::default();

        let stripped = engine
            .evaluate(&shape, &payload, UnknownFields::Strip)
            .unwrap();
        assert_eq!(stripped, Evaluation::Valid(json!({ "inner": { "a": 1 } })));

        let violation = first(
            engine
                .evaluate(&shape, &payload, UnknownFields::Allow)
                .unwrap(),
        );
        assert_eq!(violation.rule(), RuleTag::Unknown);
        assert_eq!(violation.message(), "\"inner.b\" is not allowed");
    }

    #[test]
    fn test_exhaustive_collects_in_declaration_order() {
        let shape = Shape::builder()
            .field("b", types::integer(true, IntegerProps::default(), Args::default()))
            .field("a", types::integer(true, IntegerProps::default(), Args::default()))
            .build()
            .unwrap();
        let engine = NativeEngine::new(EngineConfig::exhaustive());

        let evaluation = engine
            .evaluate(&shape, &json!({ "a": "x" }), UnknownFields::Strip)
            .unwrap();
        let Evaluation::Invalid(report) = evaluation else {
            panic!("expected violations");
        };
        let rules: Vec<RuleTag> = report.violations().iter().map(Violation::rule).collect();
        assert_eq!(rules, vec![RuleTag::Required, RuleTag::Base]);
    }

    #[test]
    fn test_json_field() {
        let shape = Shape::builder()
            .field("meta", types::json(true, Args::default()))
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "meta": "{\"k\": [1, 2]}" })));
        assert_eq!(value, json!({ "meta": { "k": [1, 2] } }));

        let violation = first(eval(&shape, json!({ "meta": "{not json" })));
        assert_eq!(violation.rule(), RuleTag::Format);
    }

    #[test]
    fn test_hex_byte_aligned() {
        let shape = Shape::builder()
            .field(
                "color",
                types::hex(
                    true,
                    HexProps::default(),
                    HexArgs {
                        byte_aligned: true,
                        ..Default::default()
                    },
                ),
            )
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "color": "fff" })));
        assert_eq!(value, json!({ "color": "0fff" }));
    }

    #[test]
    fn test_date_normalized() {
        let shape = Shape::builder()
            .field("at", types::date(true, DateProps::default(), Args::default()))
            .build()
            .unwrap();

        let value = valid(eval(&shape, json!({ "at": "2024-03-01T09:30:00+09:00" })));
        assert_eq!(value, json!({ "at": "2024-03-01T00:30:00.000Z" }));

        let value = valid(eval(&shape, json!({ "at": 0 })));
        assert_eq!(value, json!({ "at": "1970-01-01T00:00:00.000Z" }));

        let violation = first(eval(&shape, json!({ "at": "yesterday" })));
        assert_eq!(violation.message(), "\"at\" must be a valid date");
    }

    #[test]
    fn test_date_bounds() {
        let limit = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let shape = Shape::builder()
            .field(
                "at",
                types::date(
                    true,
                    DateProps {
                        min: Some(limit),
                        ..Default::default()
                    },
                    Args::default(),
                ),
            )
            .build()
            .unwrap();

        let violation = first(eval(&shape, json!({ "at": "2023-12-31" })));
        assert_eq!(violation.rule(), RuleTag::Min);
        assert_eq!(
            violation.message(),
            "\"at\" must be greater than or equal to \"2024-01-01T00:00:00.000Z\""
        );
        assert!(eval(&shape, json!({ "at": "2024-01-01" })).is_valid());
    }

    #[test]
    fn test_boolean_strings() {
        let shape = Shape::builder()
            .field("ok", types::boolean(true, Args::default()))
            .build()
            .unwrap();

        assert_eq!(valid(eval(&shape, json!({ "ok": "TRUE" }))), json!({ "ok": true }));
        assert_eq!(valid(eval(&shape, json!({ "ok": "false" }))), json!({ "ok": false }));
        assert_eq!(first(eval(&shape, json!({ "ok": "yes" }))).rule(), RuleTag::Base);
    }
}
