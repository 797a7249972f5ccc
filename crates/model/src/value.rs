use serde::{Deserialize, Serialize};
use std::fmt;

/// A value bound to a `$n` placeholder in generated SQL.
///
/// Only the shapes the filter compiler can produce are represented here;
/// array values are bound as a single array-typed parameter, never as one
/// parameter per element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SqlValue {
    Text(String),
    Number(f64),
    TextArray(Vec<String>),
}

impl SqlValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            SqlValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => write!(f, "'{}'", s),
            SqlValue::Number(n) => write!(f, "{}", n),
            SqlValue::TextArray(values) => write!(f, "{{{}}}", values.join(",")),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<f64> for SqlValue {
    fn from(n: f64) -> Self {
        SqlValue::Number(n)
    }
}
