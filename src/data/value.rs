use chrono::NaiveDateTime;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Plain decimal literal: optional sign, digits with optional fraction, optional exponent.
    static ref DECIMAL_LITERAL: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("decimal literal pattern is valid");
}

/// A single cell of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Missing,
}

impl Value {
    /// Apply the numeric-string coercion rule.
    ///
    /// Text that is a finite decimal literal becomes a `Number`; everything
    /// else is returned unchanged, so coercing twice is the same as once.
    pub fn coerce(self) -> Value {
        match self {
            Value::Text(s) => match parse_decimal(&s) {
                Some(v) => Value::Number(v),
                None => Value::Text(s),
            },
            other => other,
        }
    }

    /// The finite number held by this value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::Date(dt)
    }
}

/// Parse `s` as a finite decimal number, ignoring surrounding whitespace.
/// `inf`, `NaN`, hex and empty strings are rejected.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if !DECIMAL_LITERAL.is_match(trimmed) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_decimal_text() {
        assert_eq!(Value::from("42").coerce(), Value::Number(42.0));
        assert_eq!(Value::from(" -1.5e3 ").coerce(), Value::Number(-1500.0));
        assert_eq!(Value::from(".5").coerce(), Value::Number(0.5));
        assert_eq!(Value::from("3.").coerce(), Value::Number(3.0));
    }

    #[test]
    fn leaves_non_decimal_text_alone() {
        for s in ["abc", "", "inf", "NaN", "infinity", "0x10", "1,000", "12abc", "1e"] {
            assert_eq!(Value::from(s).coerce(), Value::Text(s.to_string()), "{s}");
        }
    }

    #[test]
    fn overflowing_literal_stays_text() {
        assert_eq!(Value::from("1e400").coerce(), Value::Text("1e400".to_string()));
    }

    #[test]
    fn coercion_is_idempotent() {
        for v in [Value::from("7.25"), Value::from("x"), Value::Number(3.0), Value::Missing] {
            let once = v.clone().coerce();
            assert_eq!(once.clone().coerce(), once);
        }
    }

    #[test]
    fn missing_serializes_as_null() {
        let json = serde_json::to_string(&vec![Value::Missing, Value::Number(1.5), Value::from("a")]).unwrap();
        assert_eq!(json, r#"[null,1.5,"a"]"#);
    }
}
