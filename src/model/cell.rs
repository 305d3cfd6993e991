//! Cell values.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Signed integer or decimal, optional `,` thousands grouping, optional exponent.
static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d{1,3}(?:,\d{3})+|\d+)?(?:\.\d+)?(?:[eE][+-]?\d+)?$")
        .expect("numeric pattern is valid")
});

/// A single typed cell value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum CellValue {
    /// Text content
    String(String),
    /// Numeric content (coerced from text during bulk parsing)
    Number(f64),
    /// No content
    #[default]
    Empty,
}

impl CellValue {
    /// Build a cell from normalized text without type inference.
    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.is_empty() {
            Self::Empty
        } else {
            Self::String(text)
        }
    }

    /// Build a cell from normalized text, turning numeric strings into numbers.
    pub fn infer(text: impl Into<String>) -> Self {
        let text = text.into();
        match parse_number(&text) {
            Some(n) => Self::Number(n),
            None => Self::text(text),
        }
    }

    /// Check if the cell is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Get the numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the text value, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compare two cells, treating a numeric string and the number it coerces to as equal.
    pub fn matches(&self, other: &CellValue) -> bool {
        match (self, other) {
            (Self::String(s), Self::Number(n)) | (Self::Number(n), Self::String(s)) => {
                parse_number(s) == Some(*n)
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{}", n),
            Self::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Parse a numeric string the way the bulk parser coerces cells.
///
/// Returns `None` for anything that is not a plain finite number, so words like
/// `nan` or `inf` stay text.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    if !NUMERIC_RE.is_match(text) {
        return None;
    }
    let value: f64 = text.replace(',', "").parse().ok()?;
    value.is_finite().then_some(value)
}
