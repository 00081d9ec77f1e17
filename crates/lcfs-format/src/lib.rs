//! # lcfs-format — Ledger Display Formatters
//!
//! Pure functions turning raw ledger values into display strings. Used by
//! the grid for read-only and locked cells and by the CLI renderer.
//!
//! - [`format_number`]: thousands separators, at most two fraction digits.
//! - [`format_currency`]: `$` prefix, exactly two fraction digits.
//! - [`format_value`]: dispatch on a row's [`RowFormat`].
//! - [`format_raw`]: untouched rendering for label and line-number columns.
//!
//! Non-finite or missing values format as `0`; `NaN` never reaches output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use lcfs_core::{numeric_value, RowFormat};

/// How negative values are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeStyle {
    /// Leading minus sign: `-1,234`, `-$1,234.00`.
    #[default]
    Sign,
    /// Accounting parentheses: `(1,234)`, `($1,234.00)`.
    Parentheses,
}

impl NegativeStyle {
    /// Map the grid's `use_parenthesis_for_negative` flag to a style.
    pub fn from_flag(use_parentheses: bool) -> Self {
        if use_parentheses {
            Self::Parentheses
        } else {
            Self::Sign
        }
    }
}

/// Format a plain number with thousands separators and up to two fraction
/// digits; trailing zeros in the fraction are dropped.
pub fn format_number(value: f64, style: NegativeStyle) -> String {
    let (negative, digits) = fixed_two(value);
    let (int_part, frac_part) = split_fixed(&digits);
    let frac_part = frac_part.trim_end_matches('0');
    let mut body = group_thousands(int_part, ',');
    if !frac_part.is_empty() {
        body.push('.');
        body.push_str(frac_part);
    }
    apply_sign(body, negative, style)
}

/// Format a dollar amount with thousands separators and two fraction digits.
pub fn format_currency(value: f64, style: NegativeStyle) -> String {
    let (negative, digits) = fixed_two(value);
    let (int_part, frac_part) = split_fixed(&digits);
    let body = format!("${}.{}", group_thousands(int_part, ','), frac_part);
    apply_sign(body, negative, style)
}

/// Format a value according to the row's declared format.
pub fn format_value(format: RowFormat, value: f64, style: NegativeStyle) -> String {
    match format {
        RowFormat::Currency => format_currency(value, style),
        RowFormat::Number => format_number(value, style),
    }
}

/// Format a raw JSON field according to the row's declared format.
///
/// Missing, null, and non-numeric values are formatted as `0`.
pub fn format_field(format: RowFormat, value: Option<&Value>, style: NegativeStyle) -> String {
    let n = value.map(numeric_value).unwrap_or(0.0);
    format_value(format, n, style)
}

/// Render a field without any formatting. Whole numbers print without a
/// fraction, strings verbatim, and null or missing values as an empty string.
pub fn format_raw(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(0.0);
                if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
        }
        Some(other) => other.to_string(),
    }
}

/// Round to two decimals and return the sign plus the absolute value
/// rendered with exactly two fraction digits.
fn fixed_two(value: f64) -> (bool, String) {
    let value = if value.is_finite() { value } else { 0.0 };
    let scaled = value * 100.0;
    let rounded = if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    };
    let negative = rounded < 0.0;
    (negative, format!("{:.2}", rounded.abs()))
}

fn split_fixed(digits: &str) -> (&str, &str) {
    digits.split_once('.').unwrap_or((digits, ""))
}

fn group_thousands(int_part: &str, sep: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        let pos_from_end = len - i;
        out.push(ch);
        if pos_from_end > 1 && pos_from_end % 3 == 1 {
            out.push(sep);
        }
    }
    out
}

fn apply_sign(body: String, negative: bool, style: NegativeStyle) -> String {
    match (negative, style) {
        (false, _) => body,
        (true, NegativeStyle::Sign) => format!("-{body}"),
        (true, NegativeStyle::Parentheses) => format!("({body})"),
    }
}
