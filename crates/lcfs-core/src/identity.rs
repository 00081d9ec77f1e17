//! # Identifiers
//!
//! Newtypes for report identifiers and cell addresses. A cell is addressed
//! by its row *index* into the ordered summary (not its ledger line number)
//! and its column id.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LcfsError;

/// Identifier of a compliance report whose summary is being edited.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportId(String);

impl ReportId {
    /// Create a validated report identifier.
    ///
    /// Surrounding whitespace is trimmed; the result must be non-empty and
    /// must not contain `/`.
    pub fn new(s: impl Into<String>) -> Result<Self, LcfsError> {
        let s = s.into();
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LcfsError::InvalidIdentifier(
                "report id must not be empty".to_string(),
            ));
        }
        if trimmed.contains('/') {
            return Err(LcfsError::InvalidIdentifier(format!(
                "report id must not contain '/': {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ReportId {
    type Error = LcfsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReportId> for String {
    fn from(value: ReportId) -> Self {
        value.0
    }
}

impl std::fmt::Display for ReportId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The cell that triggered a commit: a row index and a column id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellPosition {
    /// Index into the ordered row sequence.
    pub row_index: usize,
    /// Column id (a row field name).
    pub column_id: String,
}

impl CellPosition {
    /// Construct a cell position.
    pub fn new(row_index: usize, column_id: impl Into<String>) -> Self {
        Self {
            row_index,
            column_id: column_id.into(),
        }
    }
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row_index, self.column_id)
    }
}

/// Saving-indicator key of the shape `<table>_<rowIndex>_<columnId>`.
///
/// Column ids never contain `_`, so parsing splits from the right; the table
/// id may contain underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellKey {
    /// Identifier of the table that owns the cell.
    pub table_id: String,
    /// The addressed cell.
    pub position: CellPosition,
}

impl CellKey {
    /// Build the key for a cell of the given table.
    pub fn new(table_id: impl Into<String>, position: CellPosition) -> Self {
        Self {
            table_id: table_id.into(),
            position,
        }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.table_id, self.position.row_index, self.position.column_id
        )
    }
}

impl FromStr for CellKey {
    type Err = LcfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LcfsError::MalformedCellKey(s.to_string());
        let mut parts = s.rsplitn(3, '_');
        let column_id = parts.next().filter(|c| !c.is_empty()).ok_or_else(malformed)?;
        let row_index = parts
            .next()
            .and_then(|r| r.parse::<usize>().ok())
            .ok_or_else(malformed)?;
        let table_id = parts.next().filter(|t| !t.is_empty()).ok_or_else(malformed)?;
        Ok(Self::new(table_id, CellPosition::new(row_index, column_id)))
    }
}

impl Serialize for CellKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
