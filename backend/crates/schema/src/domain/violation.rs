//! Violations
//!
//! Structured failures reported by a constraint engine. A report is ordered
//! (declaration order of the shape) so that its first element is stable.

use std::borrow::Cow;
use std::fmt;

use kernel::error::trace::{Frame, Trace};

/// One step in the path to a field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path from the payload root to a field (`address.city`, `tags[0]`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Label used in messages; the root is labelled `value`
    pub fn label(&self) -> String {
        if self.is_root() {
            "value".to_string()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// Rule that a violation broke
///
/// Only [`RuleTag::Required`] is singled out by classification; every other
/// tag is an ordinary constraint failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleTag {
    /// A required field was never supplied
    Required,
    /// Wrong type
    Base,
    /// Required string present but empty
    Empty,
    Min,
    Max,
    Length,
    Greater,
    Less,
    Positive,
    Negative,
    Integer,
    Unsafe,
    Port,
    Pattern,
    /// Named format (email, domain, ip, base64, ...)
    Format,
    /// Key not declared by the shape
    Unknown,
}

impl RuleTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleTag::Required => "required",
            RuleTag::Base => "base",
            RuleTag::Empty => "empty",
            RuleTag::Min => "min",
            RuleTag::Max => "max",
            RuleTag::Length => "length",
            RuleTag::Greater => "greater",
            RuleTag::Less => "less",
            RuleTag::Positive => "positive",
            RuleTag::Negative => "negative",
            RuleTag::Integer => "integer",
            RuleTag::Unsafe => "unsafe",
            RuleTag::Port => "port",
            RuleTag::Pattern => "pattern",
            RuleTag::Format => "format",
            RuleTag::Unknown => "unknown",
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(self, RuleTag::Required)
    }
}

impl fmt::Display for RuleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    path: FieldPath,
    rule: RuleTag,
    /// Dotted code such as `number.base` or `any.required`
    code: Cow<'static, str>,
    message: String,
}

impl Violation {
    pub fn new(
        path: FieldPath,
        rule: RuleTag,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path,
            rule,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn rule(&self) -> RuleTag {
        self.rule
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn frame(&self) -> Frame {
        Frame::new(format!("{} [{}]", self.path.label(), self.code))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Ordered list of violations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViolationReport(Vec<Violation>);

impl ViolationReport {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self(violations)
    }

    pub fn first(&self) -> Option<&Violation> {
        self.0.first()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All messages joined with `". "`
    pub fn message(&self) -> String {
        self.0
            .iter()
            .map(Violation::message)
            .collect::<Vec<_>>()
            .join(". ")
    }

    /// Diagnostic trace with one frame per violation
    pub fn trace(&self) -> Trace {
        self.0.iter().map(Violation::frame).collect()
    }
}

impl From<Vec<Violation>> for ViolationReport {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}
