//! # Ledger Layout
//!
//! Declarative description of which ledger lines play which role in the
//! summary. The numeric meaning of each line is opaque regulator
//! configuration; the builder and the grid only consult this struct.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lcfs_core::FuelCategory;

use crate::error::SchemaError;

/// Two ledger lines that may not both hold a non-zero value in the same
/// fuel column. A non-zero entry in either forces the other to `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPair {
    pub line: u32,
    pub paired_line: u32,
}

impl ExclusionPair {
    pub fn new(line: u32, paired_line: u32) -> Self {
        Self { line, paired_line }
    }

    /// The partner of `line`, if `line` belongs to this pair.
    pub fn partner_of(&self, line: u32) -> Option<u32> {
        if line == self.line {
            Some(self.paired_line)
        } else if line == self.paired_line {
            Some(self.line)
        } else {
            None
        }
    }
}

/// Role assignment for the renewable fuel summary lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerLayout {
    /// Fuel columns, in display order.
    pub fuels: Vec<FuelCategory>,
    /// Field holding the ledger line number.
    pub line_column: String,
    /// Field holding the row label.
    pub label_column: String,
    /// Line whose value the retention and deferral caps derive from.
    pub base_line: u32,
    /// Line for volumes retained to the next period.
    pub retention_line: u32,
    /// Line for volumes previously retained (the current adjustment).
    pub adjustment_line: u32,
    /// Line for obligations deferred to the next period.
    pub deferral_line: u32,
    /// Line for obligations added from the previous period.
    pub obligation_line: u32,
    /// Share of the base line that retention and deferral may not exceed.
    pub retention_rate: f64,
    /// Lines that are mutually exclusive per fuel column.
    pub exclusion_pairs: Vec<ExclusionPair>,
    /// First compliance year in which jet fuel carries an obligation.
    pub jet_fuel_start_year: i32,
}

impl Default for LedgerLayout {
    fn default() -> Self {
        Self::renewable_fuel()
    }
}

impl LedgerLayout {
    /// The renewable fuel target summary (lines 1–11).
    pub fn renewable_fuel() -> Self {
        Self {
            fuels: FuelCategory::all().to_vec(),
            line_column: "line".to_string(),
            label_column: "description".to_string(),
            base_line: 4,
            retention_line: 6,
            adjustment_line: 7,
            deferral_line: 8,
            obligation_line: 9,
            retention_rate: 0.05,
            exclusion_pairs: vec![ExclusionPair::new(7, 9)],
            jet_fuel_start_year: 2028,
        }
    }

    /// Check the layout for contradictory role assignments.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.fuels.is_empty() {
            return Err(SchemaError::NoFuelColumns);
        }
        if !self.retention_rate.is_finite() || self.retention_rate < 0.0 {
            return Err(SchemaError::InvalidRetentionRate(self.retention_rate));
        }
        let mut seen = BTreeSet::new();
        for line in self.designated_lines() {
            if !seen.insert(line) {
                return Err(SchemaError::DuplicateDesignatedLine(line));
            }
        }
        for pair in &self.exclusion_pairs {
            if pair.line == pair.paired_line {
                return Err(SchemaError::DegenerateExclusionPair(pair.line));
            }
        }
        Ok(())
    }

    /// Base, retention, adjustment, deferral, and obligation lines.
    pub fn designated_lines(&self) -> [u32; 5] {
        [
            self.base_line,
            self.retention_line,
            self.adjustment_line,
            self.deferral_line,
            self.obligation_line,
        ]
    }

    /// Lines whose values a user may override.
    pub fn editable_lines(&self) -> [u32; 4] {
        [
            self.retention_line,
            self.adjustment_line,
            self.deferral_line,
            self.obligation_line,
        ]
    }

    /// Whether `column_id` is one of this layout's fuel columns.
    pub fn is_fuel_column(&self, column_id: &str) -> bool {
        self.fuels.iter().any(|f| f.as_str() == column_id)
    }

    /// Whether a fuel column accepts input in the given compliance period.
    ///
    /// Only jet fuel is period-dependent. A period id that does not start
    /// with a year counts as before the jet fuel start year.
    pub fn is_fuel_active(&self, fuel: FuelCategory, period_id: &str) -> bool {
        match fuel {
            FuelCategory::Gasoline | FuelCategory::Diesel => true,
            FuelCategory::JetFuel => {
                period_year(period_id).is_some_and(|y| y >= self.jet_fuel_start_year)
            }
        }
    }
}

/// Leading year of a period id such as `"2025"` or `"2025-2026"`.
fn period_year(period_id: &str) -> Option<i32> {
    let digits: String = period_id
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renewable_fuel_layout_is_valid() {
        assert_eq!(LedgerLayout::renewable_fuel().validate(), Ok(()));
    }

    #[test]
    fn exclusion_pair_is_symmetric() {
        let pair = ExclusionPair::new(7, 9);
        assert_eq!(pair.partner_of(7), Some(9));
        assert_eq!(pair.partner_of(9), Some(7));
        assert_eq!(pair.partner_of(6), None);
    }

    #[test]
    fn jet_fuel_follows_period() {
        let layout = LedgerLayout::renewable_fuel();
        assert!(!layout.is_fuel_active(FuelCategory::JetFuel, "2025"));
        assert!(layout.is_fuel_active(FuelCategory::JetFuel, "2028"));
        assert!(layout.is_fuel_active(FuelCategory::JetFuel, "2030-2031"));
        assert!(!layout.is_fuel_active(FuelCategory::JetFuel, "current"));
        assert!(layout.is_fuel_active(FuelCategory::Diesel, "current"));
    }

    #[test]
    fn validate_rejects_bad_layouts() {
        let mut layout = LedgerLayout::renewable_fuel();
        layout.fuels.clear();
        assert_eq!(layout.validate(), Err(SchemaError::NoFuelColumns));

        let mut layout = LedgerLayout::renewable_fuel();
        layout.retention_rate = f64::NAN;
        assert!(matches!(
            layout.validate(),
            Err(SchemaError::InvalidRetentionRate(_))
        ));

        let mut layout = LedgerLayout::renewable_fuel();
        layout.deferral_line = 6;
        assert_eq!(layout.validate(), Err(SchemaError::DuplicateDesignatedLine(6)));

        let mut layout = LedgerLayout::renewable_fuel();
        layout.exclusion_pairs.push(ExclusionPair::new(3, 3));
        assert_eq!(layout.validate(), Err(SchemaError::DegenerateExclusionPair(3)));
    }

    #[test]
    fn fuel_column_lookup() {
        let layout = LedgerLayout::renewable_fuel();
        assert!(layout.is_fuel_column("jetFuel"));
        assert!(!layout.is_fuel_column("description"));
    }
}
