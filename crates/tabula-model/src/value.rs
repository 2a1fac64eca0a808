//! Field values and their string forms.
//!
//! Records carry loosely typed values (text, numbers, flags, and lists of
//! those). Search, export, and the fallback sort comparison all work on a
//! single canonical string form produced by [`Value::to_display_string`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator used when a list value is flattened to text.
pub const LIST_SEPARATOR: &str = ", ";

/// A single field value.
///
/// Deserializes from plain JSON scalars and arrays (`null`, `true`, `3`,
/// `2.5`, `"text"`, `["a", "b"]`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
}

impl Value {
    /// Whether the value is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, `None` for anything that is not a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Canonical string form.
    ///
    /// Returns an empty string for `Null`, formats floats without trailing
    /// zeros, and joins list elements with [`LIST_SEPARATOR`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tabula_model::Value;
    ///
    /// assert_eq!(Value::Null.to_display_string(), "");
    /// assert_eq!(Value::Float(40.0).to_display_string(), "40");
    /// assert_eq!(
    ///     Value::List(vec![Value::from("north"), Value::Int(2)]).to_display_string(),
    ///     "north, 2"
    /// );
    /// ```
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => format_numeric(*v),
            Value::Text(s) => s.clone(),
            Value::List(items) => items
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
        }
    }

    /// Exact-match comparison used by column filters.
    ///
    /// Numbers compare numerically (`3 == 3.0`), text compares byte for
    /// byte, lists compare element-wise. A scalar compared against a value
    /// of a different scalar kind matches when the canonical strings are
    /// equal, so a filter value `"5"` selects a numeric field holding `5`.
    pub fn exact_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.exact_eq(y))
            }
            (Value::List(_), _) | (_, Value::List(_)) => false,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => self.to_display_string() == other.to_display_string(),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Only trims trailing zeros if the number contains a decimal point.
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
///
/// # Examples
///
/// ```
/// use tabula_model::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Parses a string to `f64`, returning `None` for blank or non-finite input.
pub fn parse_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Infers a scalar value from raw text (CSV cells, command-line arguments).
///
/// Blank text becomes `Null`, `true`/`false` become flags, integers without
/// leading zeros become `Int`, other finite numbers become `Float`, and
/// everything else stays text. Codes such as `"007"` are kept as text so
/// their leading zeros survive.
pub fn parse_scalar(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
    let leading_zero = digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.");
    if leading_zero {
        return Value::Text(trimmed.to_string());
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        return Value::Int(v);
    }
    if let Some(v) = parse_f64(trimmed) {
        return Value::Float(v);
    }
    Value::Text(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_string_for_each_kind() {
        assert_eq!(Value::Bool(true).to_display_string(), "true");
        assert_eq!(Value::Int(-3).to_display_string(), "-3");
        assert_eq!(Value::Float(2.50).to_display_string(), "2.5");
        assert_eq!(Value::from("Acme").to_display_string(), "Acme");
        assert_eq!(Value::from(vec!["a", "b"]).to_display_string(), "a, b");
    }

    #[test]
    fn exact_eq_unifies_numbers() {
        assert!(Value::Int(3).exact_eq(&Value::Float(3.0)));
        assert!(!Value::Int(3).exact_eq(&Value::Float(3.5)));
    }

    #[test]
    fn exact_eq_is_not_substring_or_case_insensitive() {
        let value = Value::from("Scheduled");
        assert!(value.exact_eq(&Value::from("Scheduled")));
        assert!(!value.exact_eq(&Value::from("scheduled")));
        assert!(!value.exact_eq(&Value::from("Sched")));
    }

    #[test]
    fn exact_eq_text_against_number() {
        assert!(Value::Int(5).exact_eq(&Value::from("5")));
        assert!(Value::from("5").exact_eq(&Value::Int(5)));
        assert!(!Value::Null.exact_eq(&Value::from("")));
    }

    #[test]
    fn exact_eq_lists() {
        let a = Value::from(vec!["x", "y"]);
        assert!(a.exact_eq(&Value::from(vec!["x", "y"])));
        assert!(!a.exact_eq(&Value::from(vec!["y", "x"])));
        assert!(!a.exact_eq(&Value::from("x, y")));
    }

    #[test]
    fn parse_scalar_inference() {
        assert_eq!(parse_scalar(""), Value::Null);
        assert_eq!(parse_scalar(" 42 "), Value::Int(42));
        assert_eq!(parse_scalar("-7"), Value::Int(-7));
        assert_eq!(parse_scalar("0"), Value::Int(0));
        assert_eq!(parse_scalar("0.25"), Value::Float(0.25));
        assert_eq!(parse_scalar("007"), Value::from("007"));
        assert_eq!(parse_scalar("false"), Value::Bool(false));
        assert_eq!(parse_scalar("NaN"), Value::from("NaN"));
        assert_eq!(parse_scalar("Acme Ltd"), Value::from("Acme Ltd"));
    }

    #[test]
    fn deserializes_json_scalars_and_lists() {
        let values: Vec<Value> =
            serde_json::from_str(r#"[null, true, 3, 2.5, "x", ["a", 1]]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Int(3),
                Value::Float(2.5),
                Value::from("x"),
                Value::List(vec![Value::from("a"), Value::Int(1)]),
            ]
        );
    }
}
