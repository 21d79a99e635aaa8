//! Unit types and conversion constants
//!
//! Maps a (quantity, unit) pair to grams. Volume units assume the density of
//! water, so they are fixed multipliers rather than per-ingredient lookups.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Conversion Constants (to grams)
// ============================================================================

/// Grams per ounce
pub const G_PER_OZ: f64 = 28.35;
/// Grams per teaspoon
pub const G_PER_TSP: f64 = 5.0;
/// Grams per tablespoon
pub const G_PER_TBSP: f64 = 15.0;
/// Grams per cup
pub const G_PER_CUP: f64 = 240.0;

/// Unit conversion errors (strict mode only)
#[derive(Debug, Error, PartialEq)]
pub enum UnitError {
    #[error("Unrecognized unit '{0}' (expected one of g, oz, tsp, tbsp, cup)")]
    Unrecognized(String),
}

/// A supported composition unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    Cup,
}

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Gram, Unit::Ounce, Unit::Teaspoon, Unit::Tablespoon, Unit::Cup];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Ounce => "oz",
            Unit::Teaspoon => "tsp",
            Unit::Tablespoon => "tbsp",
            Unit::Cup => "cup",
        }
    }

    /// Parse a unit token, case-insensitively
    pub fn parse(unit: &str) -> Option<Self> {
        match unit.to_lowercase().as_str() {
            "g" => Some(Unit::Gram),
            "oz" => Some(Unit::Ounce),
            "tsp" => Some(Unit::Teaspoon),
            "tbsp" => Some(Unit::Tablespoon),
            "cup" => Some(Unit::Cup),
            _ => None,
        }
    }

    pub fn grams_per_unit(&self) -> f64 {
        match self {
            Unit::Gram => 1.0,
            Unit::Ounce => G_PER_OZ,
            Unit::Teaspoon => G_PER_TSP,
            Unit::Tablespoon => G_PER_TBSP,
            Unit::Cup => G_PER_CUP,
        }
    }
}

/// Get the conversion factor to grams for a unit string
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    Unit::parse(unit).map(|u| u.grams_per_unit())
}

/// Convert a quantity to grams.
///
/// Unrecognized units fall back to a 1:1 multiplier; see [`to_grams_strict`]
/// for the rejecting variant.
pub fn to_grams(quantity: f64, unit: &str) -> f64 {
    match grams_per_unit(unit) {
        Some(factor) => quantity * factor,
        None => {
            tracing::warn!(
                "Unit conversion fallback: '{}' is not a known unit. Treating {} as grams.",
                unit,
                quantity
            );
            quantity
        }
    }
}

/// Convert a quantity to grams, rejecting unrecognized units
pub fn to_grams_strict(quantity: f64, unit: &str) -> Result<f64, UnitError> {
    grams_per_unit(unit)
        .map(|factor| quantity * factor)
        .ok_or_else(|| UnitError::Unrecognized(unit.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_table() {
        assert_eq!(to_grams(1.0, "g"), 1.0);
        assert_eq!(to_grams(1.0, "oz"), 28.35);
        assert_eq!(to_grams(1.0, "tsp"), 5.0);
        assert_eq!(to_grams(1.0, "tbsp"), 15.0);
        assert_eq!(to_grams(1.0, "cup"), 240.0);
        assert_eq!(to_grams(2.5, "cup"), 600.0);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(to_grams(1.0, "OZ"), 28.35);
        assert_eq!(to_grams(1.0, "Cup"), 240.0);
        assert_eq!(to_grams(2.0, "TbSp"), 30.0);
        assert_eq!(Unit::parse("G"), Some(Unit::Gram));
    }

    #[test]
    fn test_unknown_unit_falls_back_to_grams() {
        assert_eq!(to_grams(42.0, "handful"), 42.0);
        assert_eq!(to_grams(3.0, ""), 3.0);
        // Only the exact tokens are recognized
        assert_eq!(to_grams(1.0, "cups"), 1.0);
    }

    #[test]
    fn test_strict_rejects_unknown_unit() {
        assert_eq!(to_grams_strict(2.0, "oz"), Ok(56.7));
        assert_eq!(
            to_grams_strict(2.0, "pinch"),
            Err(UnitError::Unrecognized("pinch".to_string()))
        );
    }

    #[test]
    fn test_unit_round_trip() {
        for unit in Unit::ALL {
            assert_eq!(Unit::parse(unit.as_str()), Some(unit));
        }
        assert_eq!(serde_json::to_string(&Unit::Tablespoon).unwrap(), r#""tbsp""#);
    }
}
