//! # Input Sanitization
//!
//! Keystroke handling for numeric ledger cells. Every function here is total:
//! any string in, a usable string or number out.

use lcfs_schema::CellConstraint;

/// Largest whole number an `f64` cell value holds exactly (2^53 - 1).
/// Input above it is clamped here even when the cell has no upper bound.
pub const MAX_WHOLE_VALUE: i64 = (1 << 53) - 1;

/// Strip everything except digits and the first decimal point.
///
/// When the raw input contained any other character (a `$`, a `,`, a
/// space) the user typed over a formatted display value, so a remaining
/// fraction is dropped. Purely numeric input is kept as typed so that a
/// decimal can still be entered.
pub fn sanitize_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_point = false;
    let mut foreign = false;
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            out.push(ch);
        } else if ch == '.' {
            if !seen_point {
                seen_point = true;
                out.push(ch);
            }
        } else {
            foreign = true;
        }
    }
    if foreign {
        if let Some(point) = out.find('.') {
            out.truncate(point);
        }
    }
    out
}

/// Numeric interpretation of a sanitized string, `None` when it does not
/// parse (empty, or a lone `.`).
pub fn parse_input(sanitized: &str) -> Option<f64> {
    sanitized
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Clamp a sanitized string against the cell's bounds.
///
/// The returned string reflects the clamp: a value above `max` becomes
/// `max`, a value below `min` becomes `min`. Without a `max`, values above
/// [`MAX_WHOLE_VALUE`] become [`MAX_WHOLE_VALUE`]. Strings that do not parse
/// are returned unchanged so typing can continue.
pub fn apply_constraint(sanitized: String, constraint: Option<CellConstraint>) -> String {
    let Some(value) = parse_input(&sanitized) else {
        return sanitized;
    };
    let max = constraint
        .and_then(|c| c.max)
        .map_or(MAX_WHOLE_VALUE, |m| m.min(MAX_WHOLE_VALUE));
    if value > max as f64 {
        return max.to_string();
    }
    if let Some(min) = constraint.and_then(|c| c.min) {
        if value < min as f64 {
            return min.to_string();
        }
    }
    sanitized
}

/// Final whole-number value for a committed cell.
///
/// Empty input and `0` become `0`; otherwise the string is parsed as a
/// float (defaulting to `0`), floored, and kept within
/// `±`[`MAX_WHOLE_VALUE`].
pub fn coerce_commit_value(stored: &str) -> i64 {
    let trimmed = stored.trim();
    if trimmed.is_empty() || trimmed == "0" {
        return 0;
    }
    let floored = trimmed.parse::<f64>().unwrap_or(0.0).floor();
    if !floored.is_finite() {
        return 0;
    }
    let limit = MAX_WHOLE_VALUE as f64;
    floored.clamp(-limit, limit) as i64
}
