//! Chemical contribution aggregation
//!
//! Scales each ingredient's per-100 g chemistry by the item's mass and sums
//! across the composition into absolute milligram totals.

use std::collections::HashMap;

use serde::Serialize;

use super::units::{grams_per_unit, to_grams};
use crate::models::{Chemistry, CompositionItem, Ingredient};

/// Resolves ingredient IDs to catalog records
pub trait IngredientLookup {
    fn lookup(&self, id: i64) -> Option<&Ingredient>;
}

impl IngredientLookup for HashMap<i64, Ingredient> {
    fn lookup(&self, id: i64) -> Option<&Ingredient> {
        self.get(&id)
    }
}

impl IngredientLookup for [Ingredient] {
    fn lookup(&self, id: i64) -> Option<&Ingredient> {
        self.iter().find(|i| i.id == id)
    }
}

impl IngredientLookup for Vec<Ingredient> {
    fn lookup(&self, id: i64) -> Option<&Ingredient> {
        self.as_slice().lookup(id)
    }
}

/// What one composition item adds to the totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientContribution {
    pub ingredient_id: i64,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub quantity_grams: f64,
    /// Absolute mg contributed; zero when the ingredient has no chemistry
    pub contributions: Chemistry,
    pub has_chemistry: bool,
}

/// Summed chemistry for a composition
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContributionSummary {
    pub totals: Chemistry,
    pub total_weight_g: f64,
    pub items: Vec<IngredientContribution>,
    pub unresolved_ingredient_ids: Vec<i64>,
    pub unrecognized_units: Vec<String>,
}

/// Fraction of a 100 g reference portion
pub fn mass_factor(grams: f64) -> f64 {
    grams / 100.0
}

/// Contribution of a single ingredient at a mass in grams
pub fn contribution_for(ingredient: &Ingredient, grams: f64) -> Chemistry {
    match ingredient.chemistry {
        Some(ref chem) => chem.scale(mass_factor(grams)),
        None => Chemistry::zero(),
    }
}

pub fn aggregate_contributions<L>(items: &[CompositionItem], catalog: &L) -> ContributionSummary
where
    L: IngredientLookup + ?Sized,
{
    let mut summary = ContributionSummary::default();

    for item in items {
        if grams_per_unit(&item.unit).is_none() && !summary.unrecognized_units.contains(&item.unit) {
            summary.unrecognized_units.push(item.unit.clone());
        }

        let Some(ingredient) = catalog.lookup(item.ingredient_id) else {
            tracing::warn!(ingredient_id = item.ingredient_id, "ingredient not resolved; contributing zero");
            if !summary.unresolved_ingredient_ids.contains(&item.ingredient_id) {
                summary.unresolved_ingredient_ids.push(item.ingredient_id);
            }
            continue;
        };

        let grams = to_grams(item.quantity, &item.unit);
        let contributions = contribution_for(ingredient, grams);

        summary.total_weight_g += grams;
        summary.totals = summary.totals + contributions;
        summary.items.push(IngredientContribution {
            ingredient_id: ingredient.id,
            name: ingredient.label().to_string(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            quantity_grams: grams,
            contributions,
            has_chemistry: ingredient.chemistry.is_some(),
        });
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TcmProfile;

    fn ingredient(id: i64, name: &str, chemistry: Option<Chemistry>) -> Ingredient {
        Ingredient {
            id,
            name: name.to_string(),
            display_name: None,
            category: None,
            chemistry,
            tcm: TcmProfile::default(),
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn tomato() -> Ingredient {
        ingredient(1, "Tomato", Some(Chemistry { glu: 246.0, asp: 34.0, imp: 0.0, gmp: 0.0, amp: 21.0 }))
    }

    #[test]
    fn test_empty_composition() {
        let catalog: Vec<Ingredient> = vec![tomato()];
        let summary = aggregate_contributions(&[], &catalog);
        assert!(summary.totals.is_zero());
        assert_eq!(summary.total_weight_g, 0.0);
        assert!(summary.items.is_empty());
    }

    #[test]
    fn test_100g_equals_ingredient_chemistry() {
        let catalog = vec![tomato()];
        let summary = aggregate_contributions(&[CompositionItem::grams(1, 100.0)], &catalog);
        assert_eq!(summary.totals, tomato().chemistry.unwrap());
        assert_eq!(summary.total_weight_g, 100.0);
    }

    #[test]
    fn test_linear_scaling() {
        let catalog = vec![tomato()];
        let single = aggregate_contributions(&[CompositionItem::new(1, 3.0, "tbsp")], &catalog);
        let double = aggregate_contributions(&[CompositionItem::new(1, 6.0, "tbsp")], &catalog);
        assert_eq!(double.totals, single.totals * 2.0);
    }

    #[test]
    fn test_order_independent() {
        let mut catalog = HashMap::new();
        catalog.insert(1, tomato());
        catalog.insert(2, ingredient(2, "Shiitake", Some(Chemistry { glu: 71.0, gmp: 150.0, ..Default::default() })));

        let forward = aggregate_contributions(
            &[CompositionItem::grams(1, 50.0), CompositionItem::new(2, 1.0, "oz")],
            &catalog,
        );
        let reverse = aggregate_contributions(
            &[CompositionItem::new(2, 1.0, "oz"), CompositionItem::grams(1, 50.0)],
            &catalog,
        );
        assert!((forward.totals.glu - reverse.totals.glu).abs() < 1e-9);
        assert!((forward.totals.gmp - reverse.totals.gmp).abs() < 1e-9);
        assert!((forward.totals.gmp - 150.0 * 0.2835).abs() < 1e-9);
    }

    #[test]
    fn test_missing_chemistry_and_unresolved_contribute_zero() {
        let catalog = vec![tomato(), ingredient(5, "Water", None)];
        let summary = aggregate_contributions(
            &[
                CompositionItem::grams(5, 500.0),
                CompositionItem::grams(42, 100.0),
                CompositionItem::grams(1, 100.0),
            ],
            &catalog,
        );
        assert_eq!(summary.totals, tomato().chemistry.unwrap());
        assert_eq!(summary.unresolved_ingredient_ids, vec![42]);
        assert_eq!(summary.items.len(), 2);
        assert!(!summary.items[0].has_chemistry);
        assert_eq!(summary.total_weight_g, 600.0);
    }

    #[test]
    fn test_unknown_unit_is_grams_and_reported() {
        let catalog = vec![tomato()];
        let summary = aggregate_contributions(&[CompositionItem::new(1, 100.0, "pinch")], &catalog);
        assert_eq!(summary.totals, tomato().chemistry.unwrap());
        assert_eq!(summary.unrecognized_units, vec!["pinch".to_string()]);
    }
}
