//! Field Builders
//!
//! One constructor per field type. Each takes whether the field is required,
//! a props struct (constraints checked by the engine) and an args struct
//! (modifications applied to the value, and its default).
//!
//! ```
//! use schema::types::{self, Args, IntegerProps, StringArgs, StringProps};
//! use schema::Shape;
//!
//! let shape = Shape::builder()
//!     .field("id", types::integer(true, IntegerProps::default(), Args::default()))
//!     .field(
//!         "name",
//!         types::string(
//!             false,
//!             StringProps { min: Some(3), ..Default::default() },
//!             StringArgs::default(),
//!         ),
//!     )
//!     .build()
//!     .unwrap();
//! assert_eq!(shape.len(), 2);
//! ```

use chrono::{DateTime, Utc};
use platform::address::AddressOptions;
use platform::encoding::BinaryEncoding;
use platform::network::{CidrPolicy, IpVersion};
use platform::text::{Case, NormalizationForm};
use regex::Regex;
use serde_json::Value;

use crate::domain::field::{
    ArrayRules, BinaryRules, CountRule, DateRules, Field, FieldKind, NumberRules, ObjectRules,
    Sign, StringFormat, StringRules,
};
use crate::domain::shape::Shape;
use crate::error::{SchemaError, SchemaResult};

pub use crate::domain::field::TimestampFormat;

// =============================================================================
// Args
// =============================================================================

/// Modifications shared by most builders
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Value for a not-provided optional field
    pub default: Option<Value>,
}

/// Modifications for free-text strings
#[derive(Debug, Clone)]
pub struct StringArgs {
    pub default: Option<Value>,
    pub lowercase: bool,
    pub uppercase: bool,
    pub normalize: Option<NormalizationForm>,
    pub trim: bool,
}

impl Default for StringArgs {
    fn default() -> Self {
        Self {
            default: None,
            lowercase: false,
            uppercase: false,
            normalize: None,
            trim: true,
        }
    }
}

/// Modifications for formatted strings
#[derive(Debug, Clone)]
pub struct TrimArgs {
    pub default: Option<Value>,
    pub trim: bool,
}

impl Default for TrimArgs {
    fn default() -> Self {
        Self {
            default: None,
            trim: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HexArgs {
    pub default: Option<Value>,
    pub trim: bool,
    /// Prepend `0` to odd-length values
    pub byte_aligned: bool,
}

impl Default for HexArgs {
    fn default() -> Self {
        Self {
            default: None,
            trim: true,
            byte_aligned: false,
        }
    }
}

// =============================================================================
// Props
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ObjectProps {
    /// Exact key count (wins over `min`/`max`)
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
    /// Keep keys the nested shape does not declare
    pub unknown: bool,
}

#[derive(Debug, Clone, Default)]
pub struct IntegerProps {
    /// Wins over `negative`
    pub positive: bool,
    pub negative: bool,
    pub gt: Option<f64>,
    pub lt: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Accept integers beyond +/-(2^53 - 1)
    pub unsafe_numbers: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FloatProps {
    pub positive: bool,
    pub negative: bool,
    pub gt: Option<f64>,
    pub lt: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Decimal places kept after rounding
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct PortProps {
    pub gt: Option<f64>,
    pub lt: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct StringProps {
    pub alphanum: bool,
    /// Wins over `alphanum`
    pub token: bool,
    pub case: Option<Case>,
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

/// Props for `alphanum` and `token`
#[derive(Debug, Clone, Default)]
pub struct TextProps {
    pub case: Option<Case>,
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct EmailProps {
    pub allow_unicode: bool,
    pub min_domain_segments: usize,
    pub case: Option<Case>,
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Default for EmailProps {
    fn default() -> Self {
        Self {
            allow_unicode: false,
            min_domain_segments: 2,
            case: None,
            length: None,
            min: None,
            max: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternProps {
    /// Name shown in messages instead of the regex
    pub name: Option<String>,
    pub case: Option<Case>,
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Base64Props {
    pub padding_required: bool,
    pub url_safe: bool,
}

impl Default for Base64Props {
    fn default() -> Self {
        Self {
            padding_required: true,
            url_safe: false,
        }
    }
}

/// Length bounds only (credit cards, arrays)
#[derive(Debug, Clone, Default)]
pub struct LengthProps {
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct DataUriProps {
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub padding_required: bool,
}

impl Default for DataUriProps {
    fn default() -> Self {
        Self {
            length: None,
            min: None,
            max: None,
            padding_required: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DomainProps {
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub allow_unicode: bool,
    pub min_domain_segments: usize,
}

impl Default for DomainProps {
    fn default() -> Self {
        Self {
            length: None,
            min: None,
            max: None,
            allow_unicode: false,
            min_domain_segments: 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HexProps {
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct IpProps {
    /// Allowed versions; empty allows all
    pub version: Vec<IpVersion>,
    pub cidr: CidrPolicy,
}

#[derive(Debug, Clone, Default)]
pub struct BinaryProps {
    pub encoding: BinaryEncoding,
    /// Decoded byte counts
    pub length: Option<usize>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct DateProps {
    pub gt: Option<DateTime<Utc>>,
    pub lt: Option<DateTime<Utc>>,
    pub min: Option<DateTime<Utc>>,
    pub max: Option<DateTime<Utc>>,
    /// Only accept ISO 8601 strings
    pub iso: bool,
    /// Only accept numeric timestamps in this unit
    pub timestamp: Option<TimestampFormat>,
}

// =============================================================================
// Builders
// =============================================================================

pub fn object(required: bool, shape: Shape, props: ObjectProps, args: Args) -> Field {
    let rules = ObjectRules {
        keys: Some(shape),
        unknown: props.unknown,
        count: CountRule::new(props.length, props.min, props.max),
        parse_json: false,
    };
    Field::new(required, args.default, FieldKind::Object(rules))
}

/// Object with any keys; strings holding a JSON object are parsed
pub fn json(required: bool, args: Args) -> Field {
    let rules = ObjectRules {
        keys: None,
        unknown: true,
        count: CountRule::default(),
        parse_json: true,
    };
    Field::new(required, args.default, FieldKind::Object(rules))
}

fn sign(positive: bool, negative: bool) -> Option<Sign> {
    if positive {
        Some(Sign::Positive)
    } else if negative {
        Some(Sign::Negative)
    } else {
        None
    }
}

pub fn integer(required: bool, props: IntegerProps, args: Args) -> Field {
    let rules = NumberRules {
        integer: true,
        sign: sign(props.positive, props.negative),
        greater: props.gt,
        less: props.lt,
        min: props.min,
        max: props.max,
        allow_unsafe: props.unsafe_numbers,
        ..Default::default()
    };
    Field::new(required, args.default, FieldKind::Number(rules))
}

pub fn float(required: bool, props: FloatProps, args: Args) -> Field {
    let rules = NumberRules {
        sign: sign(props.positive, props.negative),
        greater: props.gt,
        less: props.lt,
        min: props.min,
        max: props.max,
        precision: props.precision,
        ..Default::default()
    };
    Field::new(required, args.default, FieldKind::Number(rules))
}

/// Integer in `0..=65535`
pub fn port(required: bool, props: PortProps, args: Args) -> Field {
    let rules = NumberRules {
        integer: true,
        port: true,
        greater: props.gt,
        less: props.lt,
        min: props.min,
        max: props.max,
        ..Default::default()
    };
    Field::new(required, args.default, FieldKind::Number(rules))
}

/// Case from args wins over the case prop
fn case(props_case: Option<Case>, args: &StringArgs) -> Option<Case> {
    if args.lowercase {
        Some(Case::Lower)
    } else if args.uppercase {
        Some(Case::Upper)
    } else {
        props_case
    }
}

fn text_field(
    required: bool,
    format: StringFormat,
    props_case: Option<Case>,
    length: CountRule,
    args: StringArgs,
) -> Field {
    let rules = StringRules {
        trim: args.trim,
        case: case(props_case, &args),
        normalize: args.normalize,
        format,
        length,
    };
    Field::new(required, args.default, FieldKind::String(rules))
}

fn formatted_field(
    required: bool,
    format: StringFormat,
    length: CountRule,
    trim: bool,
    default: Option<Value>,
) -> Field {
    let rules = StringRules {
        trim,
        format,
        length,
        ..Default::default()
    };
    Field::new(required, default, FieldKind::String(rules))
}

pub fn string(required: bool, props: StringProps, args: StringArgs) -> Field {
    let format = if props.token {
        StringFormat::Token
    } else if props.alphanum {
        StringFormat::Alphanum
    } else {
        StringFormat::Any
    };
    let length = CountRule::new(props.length, props.min, props.max);
    text_field(required, format, props.case, length, args)
}

/// `a-z`, `A-Z`, `0-9`
pub fn alphanum(required: bool, props: TextProps, args: StringArgs) -> Field {
    let length = CountRule::new(props.length, props.min, props.max);
    text_field(required, StringFormat::Alphanum, props.case, length, args)
}

/// `a-z`, `A-Z`, `0-9` and `_`
pub fn token(required: bool, props: TextProps, args: StringArgs) -> Field {
    let length = CountRule::new(props.length, props.min, props.max);
    text_field(required, StringFormat::Token, props.case, length, args)
}

pub fn email(required: bool, props: EmailProps, args: StringArgs) -> Field {
    let options = AddressOptions {
        allow_unicode: props.allow_unicode,
        min_domain_segments: props.min_domain_segments,
    };
    let length = CountRule::new(props.length, props.min, props.max);
    text_field(required, StringFormat::Email(options), props.case, length, args)
}

/// String matching `regex`
///
/// Fails when the regex does not compile.
pub fn pattern(
    required: bool,
    regex: &str,
    props: PatternProps,
    args: StringArgs,
) -> SchemaResult<Field> {
    let compiled = Regex::new(regex).map_err(|source| SchemaError::InvalidPattern {
        pattern: regex.to_string(),
        source,
    })?;
    let format = StringFormat::Pattern {
        regex: compiled,
        name: props.name,
    };
    let length = CountRule::new(props.length, props.min, props.max);
    Ok(text_field(required, format, props.case, length, args))
}

pub fn base64(required: bool, props: Base64Props, args: Args) -> Field {
    let format = StringFormat::Base64 {
        padding_required: props.padding_required,
        url_safe: props.url_safe,
    };
    formatted_field(required, format, CountRule::default(), false, args.default)
}

/// Digits passing the Luhn checksum
pub fn credit_card(required: bool, props: LengthProps, args: TrimArgs) -> Field {
    let length = CountRule::new(props.length, props.min, props.max);
    formatted_field(
        required,
        StringFormat::CreditCard,
        length,
        args.trim,
        args.default,
    )
}

pub fn data_uri(required: bool, props: DataUriProps, args: TrimArgs) -> Field {
    let format = StringFormat::DataUri {
        padding_required: props.padding_required,
    };
    let length = CountRule::new(props.length, props.min, props.max);
    formatted_field(required, format, length, args.trim, args.default)
}

pub fn domain(required: bool, props: DomainProps, args: TrimArgs) -> Field {
    let format = StringFormat::Domain(AddressOptions {
        allow_unicode: props.allow_unicode,
        min_domain_segments: props.min_domain_segments,
    });
    let length = CountRule::new(props.length, props.min, props.max);
    formatted_field(required, format, length, args.trim, args.default)
}

pub fn hex(required: bool, props: HexProps, args: HexArgs) -> Field {
    let format = StringFormat::Hex {
        byte_aligned: args.byte_aligned,
    };
    formatted_field(
        required,
        format,
        CountRule::exact(props.length),
        args.trim,
        args.default,
    )
}

pub fn ip(required: bool, props: IpProps, args: TrimArgs) -> Field {
    let format = StringFormat::Ip {
        versions: props.version,
        cidr: props.cidr,
    };
    formatted_field(
        required,
        format,
        CountRule::default(),
        args.trim,
        args.default,
    )
}

/// Array whose items all satisfy `item`
pub fn array(required: bool, item: Option<Field>, props: LengthProps, args: Args) -> Field {
    let rules = ArrayRules {
        item: item.map(Box::new),
        count: CountRule::new(props.length, props.min, props.max),
    };
    Field::new(required, args.default, FieldKind::Array(rules))
}

/// Encoded bytes; the normalized value keeps the input
pub fn binary(required: bool, props: BinaryProps, args: Args) -> Field {
    let rules = BinaryRules {
        encoding: props.encoding,
        count: CountRule::new(props.length, props.min, props.max),
    };
    Field::new(required, args.default, FieldKind::Binary(rules))
}

pub fn boolean(required: bool, args: Args) -> Field {
    Field::new(required, args.default, FieldKind::Boolean)
}

/// Date normalized to an RFC 3339 UTC string
pub fn date(required: bool, props: DateProps, args: Args) -> Field {
    let rules = DateRules {
        iso: props.iso,
        timestamp: props.timestamp,
        greater: props.gt,
        less: props.lt,
        min: props.min,
        max: props.max,
    };
    Field::new(required, args.default, FieldKind::Date(rules))
}
