//! Composition item model
//!
//! One line of a blend: which ingredient, how much, in which unit.

use serde::{Deserialize, Serialize};

/// A reference to a catalog ingredient at a quantity and unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionItem {
    pub ingredient_id: i64,
    /// Non-negative and finite; callers enforce this before analysis
    pub quantity: f64,
    /// One of g, oz, tsp, tbsp, cup; anything else is read as grams
    #[serde(default = "CompositionItem::default_unit")]
    pub unit: String,
}

impl CompositionItem {
    /// Unit assumed when a caller omits one
    pub fn default_unit() -> String {
        "g".to_string()
    }

    pub fn new(ingredient_id: i64, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            ingredient_id,
            quantity,
            unit: unit.into(),
        }
    }

    /// Shorthand for a quantity in grams
    pub fn grams(ingredient_id: i64, quantity: f64) -> Self {
        Self::new(ingredient_id, quantity, "g")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_defaults_to_grams() {
        let item: CompositionItem =
            serde_json::from_str(r#"{"ingredient_id": 3, "quantity": 12.5}"#).unwrap();
        assert_eq!(item, CompositionItem::grams(3, 12.5));
    }
}
