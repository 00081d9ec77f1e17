//! # Fuel Categories
//!
//! The renewable fuel summary carries one numeric column per fuel category.
//! This is the one definition of those columns; adding a category forces
//! every consumer to handle it at compile time.
//!
//! | Category | Column id | Prior-year cap field |
//! |----------|-----------|----------------------|
//! | Gasoline | `gasoline` | `maxGasoline` |
//! | Diesel   | `diesel`   | `maxDiesel`   |
//! | Jet fuel | `jetFuel`  | `maxJetFuel`  |

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LcfsError;

/// A fuel category column of the renewable fuel summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FuelCategory {
    /// Gasoline-class fuels.
    #[serde(rename = "gasoline")]
    Gasoline,
    /// Diesel-class fuels.
    #[serde(rename = "diesel")]
    Diesel,
    /// Jet fuel.
    #[serde(rename = "jetFuel")]
    JetFuel,
}

/// Total number of fuel categories.
pub const FUEL_CATEGORY_COUNT: usize = 3;

impl FuelCategory {
    /// Returns all fuel categories in column order.
    pub fn all() -> &'static [FuelCategory] {
        &[Self::Gasoline, Self::Diesel, Self::JetFuel]
    }

    /// The column id, which is also the row field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::JetFuel => "jetFuel",
        }
    }

    /// Human-readable column label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gasoline => "Gasoline",
            Self::Diesel => "Diesel",
            Self::JetFuel => "Jet fuel",
        }
    }

    /// Name of the field on the adjustment row that carries the prior
    /// year's assessed value for this category.
    pub fn cap_field(&self) -> &'static str {
        match self {
            Self::Gasoline => "maxGasoline",
            Self::Diesel => "maxDiesel",
            Self::JetFuel => "maxJetFuel",
        }
    }
}

impl std::fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelCategory {
    type Err = LcfsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gasoline" => Ok(Self::Gasoline),
            "diesel" => Ok(Self::Diesel),
            "jetFuel" => Ok(Self::JetFuel),
            other => Err(LcfsError::UnknownFuelCategory(other.to_string())),
        }
    }
}
