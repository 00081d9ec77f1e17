//! # Summary Rows
//!
//! One [`SummaryRow`] per ledger line. A row serialises as a flat JSON
//! object: the well-known attributes (`line`, `format`, `bold`) sit next to
//! arbitrary named fields such as `description`, `gasoline`, or `maxDiesel`.
//!
//! ```json
//! {"line": 6, "description": "Retained", "gasoline": 7500, "diesel": 0, "format": "number"}
//! ```
//!
//! Rows without a `line` are header/footer rows that carry no ledger data.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LcfsError;

/// Display format declared by a row for its numeric fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowFormat {
    /// Dollar amount with two fraction digits.
    Currency,
    /// Plain number with thousands separators.
    Number,
}

impl RowFormat {
    /// The wire tag for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Currency => "currency",
            Self::Number => "number",
        }
    }
}

impl std::fmt::Display for RowFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RowFormat {
    type Err = LcfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "currency" => Ok(Self::Currency),
            "number" => Ok(Self::Number),
            other => Err(LcfsError::UnknownFormat(other.to_string())),
        }
    }
}

/// One line of a compliance summary ledger.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Regulator-defined 1-based line number. `None` for non-data rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// Display format for this row's numeric fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<RowFormat>,
    /// Bold display hint.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    /// All other named fields, keyed by column id.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl SummaryRow {
    /// Create an empty row for the given ledger line.
    pub fn with_line(line: u32) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    /// Builder: set a numeric field.
    pub fn number(mut self, field: impl Into<String>, value: f64) -> Self {
        self.set_number(field, value);
        self
    }

    /// Builder: set a text field.
    pub fn text(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), Value::String(value.into()));
        self
    }

    /// Builder: set the row format.
    pub fn formatted(mut self, format: RowFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Raw access to a named field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field is present and non-null.
    pub fn has_value(&self, field: &str) -> bool {
        matches!(self.fields.get(field), Some(v) if !v.is_null())
    }

    /// Numeric value of a field, treating absent, null, non-numeric, or
    /// non-finite values as `0`. Numeric strings are parsed.
    pub fn numeric(&self, field: &str) -> f64 {
        self.fields.get(field).map(numeric_value).unwrap_or(0.0)
    }

    /// Replace a field with a raw JSON value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Replace a field with a number. Non-finite inputs are stored as `0`.
    pub fn set_number(&mut self, field: impl Into<String>, value: f64) {
        self.fields.insert(field.into(), number_value(value));
    }
}

/// Interpret a JSON value as a finite number, defaulting to `0`.
pub fn numeric_value(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

/// Encode a number as JSON, preferring an integer representation for whole
/// values so that `7500.0` is stored as `7500`.
pub fn number_value(value: f64) -> Value {
    if !value.is_finite() {
        return Value::from(0);
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Value::from(value as i64);
    }
    serde_json::Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or_else(|| Value::from(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_flat_object() {
        let row: SummaryRow = serde_json::from_value(json!({
            "line": 6,
            "description": "Retained",
            "gasoline": 7500,
            "diesel": null,
            "format": "number",
            "bold": true
        }))
        .unwrap();
        assert_eq!(row.line, Some(6));
        assert_eq!(row.format, Some(RowFormat::Number));
        assert!(row.bold);
        assert_eq!(row.numeric("gasoline"), 7500.0);
        assert_eq!(row.numeric("diesel"), 0.0);
        assert!(!row.has_value("diesel"));
        assert_eq!(row.get("description"), Some(&json!("Retained")));
    }

    #[test]
    fn header_rows_have_no_line() {
        let row: SummaryRow = serde_json::from_value(json!({"description": "Totals"})).unwrap();
        assert_eq!(row.line, None);
        assert!(!row.bold);
    }

    #[test]
    fn numeric_is_total() {
        let row = SummaryRow::with_line(1)
            .text("a", "12.5")
            .text("b", "$12")
            .number("c", f64::NAN);
        assert_eq!(row.numeric("a"), 12.5);
        assert_eq!(row.numeric("b"), 0.0);
        assert_eq!(row.numeric("c"), 0.0);
        assert_eq!(row.numeric("missing"), 0.0);
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let row = SummaryRow::with_line(4).number("gasoline", 150_000.0);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, json!({"line": 4, "gasoline": 150000}));
    }

    #[test]
    fn bold_false_is_omitted() {
        let json = serde_json::to_string(&SummaryRow::with_line(1)).unwrap();
        assert_eq!(json, r#"{"line":1}"#);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!("percent".parse::<RowFormat>().is_err());
        assert_eq!("currency".parse::<RowFormat>().unwrap(), RowFormat::Currency);
    }
}
