//! The heterogeneous value type produced by leaf resolvers, library
//! functions and expression evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw or computed telemetry value.
///
/// The expression evaluator operates on floats and strings only.
/// `Integer` exists at the boundary (resolver output, function results,
/// configuration samples) and is widened to `Float` before it enters any
/// arithmetic.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer value (64-bit signed), pre-widening
    Integer(i64),

    /// Floating-point value, the only numeric type in the operand algebra
    Float(f64),

    /// String value
    String(String),
}

impl Value {
    /// Widen an integral value to float; floats and strings pass through.
    pub fn widen(self) -> Value {
        match self {
            Value::Integer(i) => Value::Float(i as f64),
            other => other,
        }
    }

    /// True if this value is a string.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Try to view this value as a float (integers widen).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::String(_) => None,
        }
    }

    /// Try to view this value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

/// Display renders the value the way string concatenation sees it:
/// integral floats print without a fractional part and no exponent
/// notation is used.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "Integer({i})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::String(s) => write!(f, "String({s:?})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widen_converts_integers_only() {
        assert_eq!(Value::Integer(7).widen(), Value::Float(7.0));
        assert_eq!(Value::Float(1.5).widen(), Value::Float(1.5));
        assert_eq!(
            Value::String("x".into()).widen(),
            Value::String("x".into())
        );
    }

    #[test]
    fn display_formats_integral_floats_without_fraction() {
        assert_eq!(Value::Float(20_000_000.0).to_string(), "20000000");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Integer(41).to_string(), "41");
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::String("s".into()).as_f64(), None);
        assert_eq!(Value::String("s".into()).as_str(), Some("s"));
        assert_eq!(Value::Float(0.0).as_str(), None);
    }
}
