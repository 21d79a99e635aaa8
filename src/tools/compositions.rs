//! Composition MCP Tools
//!
//! Resolves a blend against the catalog and runs the analysis engine over it.

use std::collections::HashMap;

use serde::Serialize;

use crate::analysis::{analyze_composition as analyze, classify, CompositionResult, Metric};
use crate::db::Database;
use crate::models::{CompositionItem, Ingredient};

/// Response for classify_umami_value
#[derive(Debug, Serialize)]
pub struct ClassifyValueResponse {
    pub metric: &'static str,
    pub value: f64,
    pub level: u8,
    pub label: &'static str,
    /// Inclusive upper bounds of levels 1 through 5
    pub thresholds: [f64; 5],
}

fn validate_items(items: &[CompositionItem]) -> Result<(), String> {
    for (idx, item) in items.iter().enumerate() {
        if !item.quantity.is_finite() {
            return Err(format!("items[{}]: quantity must be a finite number", idx));
        }
        if item.quantity < 0.0 {
            return Err(format!("items[{}]: quantity cannot be negative", idx));
        }
    }
    Ok(())
}

/// Analyze a composition of catalog ingredients
pub fn analyze_composition(db: &Database, items: &[CompositionItem]) -> Result<CompositionResult, String> {
    validate_items(items)?;

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let ids: Vec<i64> = items.iter().map(|item| item.ingredient_id).collect();
    let catalog: HashMap<i64, Ingredient> = Ingredient::get_many(&conn, &ids)
        .map_err(|e| format!("Failed to load ingredients: {}", e))?
        .into_iter()
        .map(|ingredient| (ingredient.id, ingredient))
        .collect();

    Ok(analyze(items, &catalog))
}

/// Classify a single metric value into its umami level
pub fn classify_umami_value(metric: &str, value: f64) -> Result<ClassifyValueResponse, String> {
    let metric = Metric::from_str(metric)
        .ok_or_else(|| format!("Unknown metric '{}'. Use: aa, nuc, synergy", metric))?;
    if value.is_nan() {
        return Err("value must be a number".to_string());
    }

    let level = classify(metric, value);

    Ok(ClassifyValueResponse {
        metric: metric.as_str(),
        value,
        level: level.level(),
        label: level.label(),
        thresholds: *metric.thresholds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BalanceZone;
    use crate::models::{Chemistry, IngredientCreate, TcmProfile};

    fn seed(db: &Database, name: &str, chemistry: Chemistry, tcm: TcmProfile) -> i64 {
        let conn = db.get_conn().unwrap();
        let data = IngredientCreate {
            name: name.to_string(),
            display_name: None,
            category: None,
            chemistry: Some(chemistry),
            tcm,
            notes: None,
        };
        Ingredient::create(&conn, &data).unwrap().id
    }

    #[test]
    fn test_dashi_analysis() {
        let db = Database::open_in_memory().unwrap();
        let kombu = seed(
            &db,
            "Kombu",
            Chemistry { glu: 100.0, ..Default::default() },
            TcmProfile {
                natures: vec!["Cold".to_string()],
                tastes: vec!["Salty".to_string()],
                meridians: vec!["Kidney".to_string()],
            },
        );
        let bonito = seed(
            &db,
            "Bonito Flakes",
            Chemistry { imp: 100.0, ..Default::default() },
            TcmProfile {
                natures: vec!["Neutral".to_string()],
                tastes: vec!["Sweet".to_string()],
                meridians: vec![],
            },
        );

        let result = analyze_composition(
            &db,
            &[CompositionItem::grams(kombu, 10.0), CompositionItem::grams(bonito, 10.0)],
        )
        .unwrap();

        assert_eq!(result.total_aa, 10.0);
        assert_eq!(result.total_nuc, 10.0);
        // 10 + 1218 * 10 * 10 / 1000
        assert!((result.total_synergy - 131.8).abs() < 1e-9);
        assert_eq!(result.balance.zone, BalanceZone::Optimal);
        assert_eq!(result.balance.ratio_text, "50:50");
        assert_eq!(result.distributions.natures.len(), 2);
        assert_eq!(result.distributions.meridians[0].label, "Kidney");
        assert_eq!(result.ingredients.len(), 2);
        assert!(result.is_complete());
    }

    #[test]
    fn test_unknown_ids_are_reported() {
        let db = Database::open_in_memory().unwrap();
        let result = analyze_composition(&db, &[CompositionItem::grams(404, 50.0)]).unwrap();
        assert_eq!(result.total_synergy, 0.0);
        assert_eq!(result.unresolved_ingredient_ids, vec![404]);
    }

    #[test]
    fn test_rejects_invalid_quantities() {
        let db = Database::open_in_memory().unwrap();
        assert!(analyze_composition(&db, &[CompositionItem::grams(1, -5.0)]).is_err());
        assert!(analyze_composition(&db, &[CompositionItem::grams(1, f64::INFINITY)]).is_err());
        assert!(analyze_composition(&db, &[]).is_ok());
    }

    #[test]
    fn test_classify_value() {
        let response = classify_umami_value("euc", 1318.0).unwrap();
        assert_eq!(response.metric, "synergy");
        assert_eq!(response.level, 4);
        assert_eq!(response.label, "High");

        assert_eq!(classify_umami_value("nuc", 0.0).unwrap().level, 0);
        assert!(classify_umami_value("salt", 5.0).is_err());
    }
}
