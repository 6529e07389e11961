//! Diagnostic Trace
//!
//! Ordered frame descriptors attached to a [`DomainError`](super::domain_error::DomainError).
//! A trace is diagnostic only and never affects classification.

use std::borrow::Cow;
use std::fmt;
use std::panic::Location;

use serde::Serialize;

/// トレースの 1 フレーム（自由形式の記述子）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Frame(Cow<'static, str>);

impl Frame {
    /// 任意の記述子からフレームを作成
    pub fn new(descriptor: impl Into<Cow<'static, str>>) -> Self {
        Self(descriptor.into())
    }

    /// 呼び出し元のソース位置 (`file:line:column`) をフレームとして取得
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self(
            format!(
                "{}:{}:{}",
                location.file(),
                location.line(),
                location.column()
            )
            .into(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Frame {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Frame {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// 診断用トレース
///
/// フレームの順序付きリストです。呼び出し側が指定しない場合、
/// エラー生成箇所のソース位置が 1 フレームとして記録されます。
///
/// ## Examples
/// ```rust
/// use kernel::error::trace::{Frame, Trace};
///
/// let trace: Trace = vec![Frame::new("handler"), Frame::new("router")].into();
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.frames()[0].as_str(), "handler");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Trace(Vec<Frame>);

impl Trace {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self(frames)
    }

    /// 呼び出し元のソース位置を記録したトレースを作成
    #[track_caller]
    pub fn capture() -> Self {
        Self(vec![Frame::caller()])
    }

    pub fn frames(&self) -> &[Frame] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.0.iter()
    }
}

impl From<Vec<Frame>> for Trace {
    fn from(frames: Vec<Frame>) -> Self {
        Self(frames)
    }
}

impl FromIterator<Frame> for Trace {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "    at {}", frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_caller() {
        let trace = Trace::capture();
        assert_eq!(trace.len(), 1);
        assert!(trace.frames()[0].as_str().contains("trace.rs"));
    }

    #[test]
    fn test_display() {
        let trace: Trace = ["a", "b"].into_iter().map(Frame::from).collect();
        assert_eq!(trace.to_string(), "    at a\n    at b");
    }

    #[test]
    fn test_serialize_transparent() {
        let trace = Trace::new(vec![Frame::new("x")]);
        assert_eq!(serde_json::to_string(&trace).unwrap(), "[\"x\"]");
    }
}
