//! Ingredient MCP Tools
//!
//! Tools for managing the ingredient catalog.

use serde::Serialize;

use crate::analysis::{classify, Classification, Metric, UmamiMetrics};
use crate::db::Database;
use crate::models::{Chemistry, Ingredient, IngredientCreate, IngredientSort, TcmProfile};

/// Response for add_ingredient
#[derive(Debug, Serialize)]
pub struct AddIngredientResponse {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub has_chemistry: bool,
    pub created_at: String,
}

/// Response for search_ingredients
#[derive(Debug, Serialize)]
pub struct SearchIngredientsResponse {
    pub items: Vec<IngredientSummary>,
    pub total: usize,
}

/// Summary of an ingredient for search results
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub has_chemistry: bool,
    pub umami_aa: f64,
    pub umami_nuc: f64,
    pub umami_synergy: f64,
}

impl From<&Ingredient> for IngredientSummary {
    fn from(item: &Ingredient) -> Self {
        let metrics = item.umami_metrics();
        Self {
            id: item.id,
            name: item.name.clone(),
            display_name: item.display_name.clone(),
            category: item.category.clone(),
            has_chemistry: item.chemistry.is_some(),
            umami_aa: metrics.aa,
            umami_nuc: metrics.nuc,
            umami_synergy: metrics.synergy,
        }
    }
}

/// Per-100 g levels of a single ingredient
#[derive(Debug, Serialize)]
pub struct IngredientLevels {
    pub aa: Classification,
    pub nuc: Classification,
    pub synergy: Classification,
}

/// Full ingredient detail response
#[derive(Debug, Serialize)]
pub struct IngredientDetail {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub category: Option<String>,
    /// mg per 100 g
    pub chemistry: Option<Chemistry>,
    pub umami: UmamiMetrics,
    pub levels: IngredientLevels,
    pub tcm: TcmProfile,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Ingredient> for IngredientDetail {
    fn from(item: Ingredient) -> Self {
        let umami = item.umami_metrics();
        Self {
            id: item.id,
            name: item.name,
            display_name: item.display_name,
            category: item.category,
            chemistry: item.chemistry,
            umami,
            levels: IngredientLevels {
                aa: classify(Metric::Aa, umami.aa).into(),
                nuc: classify(Metric::Nuc, umami.nuc).into(),
                synergy: classify(Metric::Synergy, umami.synergy).into(),
            },
            tcm: item.tcm,
            notes: item.notes,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Response for delete_ingredient
#[derive(Debug, Serialize)]
pub struct DeleteIngredientResponse {
    pub success: bool,
    pub deleted_id: i64,
}

fn validate_chemistry(chem: &Chemistry) -> Result<(), String> {
    let values = [
        ("glu", chem.glu),
        ("asp", chem.asp),
        ("imp", chem.imp),
        ("gmp", chem.gmp),
        ("amp", chem.amp),
    ];
    for (name, value) in values {
        if !value.is_finite() {
            return Err(format!("{} must be a finite number", name));
        }
        if value < 0.0 {
            return Err(format!("{} cannot be negative", name));
        }
    }
    Ok(())
}

/// Add a new ingredient to the catalog
pub fn add_ingredient(db: &Database, mut data: IngredientCreate) -> Result<AddIngredientResponse, String> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err("Ingredient name cannot be empty".to_string());
    }
    data.name = name.to_string();

    if let Some(ref chem) = data.chemistry {
        validate_chemistry(chem)?;
    }

    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = Ingredient::create(&conn, &data)
        .map_err(|e| format!("Failed to create ingredient: {}", e))?;

    Ok(AddIngredientResponse {
        id: item.id,
        has_chemistry: item.chemistry.is_some(),
        name: item.name,
        display_name: item.display_name,
        created_at: item.created_at,
    })
}

/// Get an ingredient by ID
pub fn get_ingredient(db: &Database, id: i64) -> Result<Option<IngredientDetail>, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let item = Ingredient::get_by_id(&conn, id)
        .map_err(|e| format!("Failed to get ingredient: {}", e))?;

    Ok(item.map(IngredientDetail::from))
}

/// Search ingredients by name
pub fn search_ingredients(
    db: &Database,
    query: &str,
    sort_by: &str,
    limit: i64,
) -> Result<SearchIngredientsResponse, String> {
    let limit = limit.min(100).max(1);
    let sort = IngredientSort::from_str(sort_by);
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let items = Ingredient::search(&conn, query, sort, limit)
        .map_err(|e| format!("Search failed: {}", e))?;

    let summaries: Vec<IngredientSummary> = items.iter().map(IngredientSummary::from).collect();
    let total = summaries.len();

    Ok(SearchIngredientsResponse {
        items: summaries,
        total,
    })
}

/// Delete an ingredient with its chemistry and TCM labels
pub fn delete_ingredient(db: &Database, id: i64) -> Result<DeleteIngredientResponse, String> {
    let conn = db.get_conn().map_err(|e| format!("Database error: {}", e))?;

    let deleted = Ingredient::delete(&conn, id)
        .map_err(|e| format!("Failed to delete ingredient: {}", e))?;
    if !deleted {
        return Err(format!("Ingredient not found with id: {}", id));
    }

    Ok(DeleteIngredientResponse {
        success: true,
        deleted_id: id,
    })
}
