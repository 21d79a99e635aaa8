//! Umami MCP Server Implementation
//!
//! Implements the MCP server with all Umami Workbench tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::db::Database;
use crate::models::{Chemistry, CompositionItem, IngredientCreate, TcmProfile};
use crate::tools::compositions;
use crate::tools::ingredients;
use crate::tools::status::StatusTracker;

/// Umami MCP Service
#[derive(Clone)]
pub struct UmamiService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<UmamiService>,
}

impl UmamiService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Ingredient Parameter Structs
// ============================================================================

/// Umami compounds in mg per 100 g
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ChemistryParams {
    #[serde(default)]
    pub glu: f64,
    #[serde(default)]
    pub asp: f64,
    #[serde(default)]
    pub imp: f64,
    #[serde(default)]
    pub gmp: f64,
    #[serde(default)]
    pub amp: f64,
}

impl From<ChemistryParams> for Chemistry {
    fn from(p: ChemistryParams) -> Self {
        Chemistry {
            glu: p.glu,
            asp: p.asp,
            imp: p.imp,
            gmp: p.gmp,
            amp: p.amp,
        }
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TcmParams {
    #[serde(default)]
    pub natures: Vec<String>,
    #[serde(default)]
    pub tastes: Vec<String>,
    #[serde(default)]
    pub meridians: Vec<String>,
}

impl From<TcmParams> for TcmProfile {
    fn from(p: TcmParams) -> Self {
        TcmProfile {
            natures: p.natures,
            tastes: p.tastes,
            meridians: p.meridians,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddIngredientParams {
    pub name: String,
    pub display_name: Option<String>,
    pub category: Option<String>,
    /// Omit when no chemical analysis exists
    pub chemistry: Option<ChemistryParams>,
    #[serde(default)]
    pub tcm: TcmParams,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetIngredientParams {
    pub id: i64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchIngredientsParams {
    #[serde(default)]
    pub query: String,
    /// name, aa, nuc or synergy
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default = "default_search_limit")]
    pub limit: i64,
}

fn default_sort_by() -> String { "name".to_string() }
fn default_search_limit() -> i64 { 20 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteIngredientParams {
    pub id: i64,
}

// ============================================================================
// Composition Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CompositionItemParams {
    pub ingredient_id: i64,
    pub quantity: f64,
    /// g, oz, tsp, tbsp or cup
    #[serde(default = "CompositionItem::default_unit")]
    pub unit: String,
}

impl From<CompositionItemParams> for CompositionItem {
    fn from(p: CompositionItemParams) -> Self {
        CompositionItem::new(p.ingredient_id, p.quantity, p.unit)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyzeCompositionParams {
    pub items: Vec<CompositionItemParams>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ClassifyUmamiValueParams {
    /// aa, nuc or synergy
    pub metric: String,
    pub value: f64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl UmamiService {
    // --- Status ---

    #[tool(description = "Get the current status of the Umami service including build info, database status, and process information")]
    async fn umami_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.database);
        let json = serde_json::to_string_pretty(&status)
            .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get step-by-step instructions for building and analyzing compositions. Call this before the first analysis or when unsure how to read a result.")]
    fn composition_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::COMPOSITION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(COMPOSITION_INSTRUCTIONS)]))
    }

    // --- Ingredients ---

    #[tool(description = "Add an ingredient to the catalog. Chemistry values are mg per 100 g (glu, asp, imp, gmp, amp). TCM labels are optional.")]
    fn add_ingredient(&self, Parameters(p): Parameters<AddIngredientParams>) -> Result<CallToolResult, McpError> {
        let data = IngredientCreate {
            name: p.name,
            display_name: p.display_name,
            category: p.category,
            chemistry: p.chemistry.map(Chemistry::from),
            tcm: p.tcm.into(),
            notes: p.notes,
        };
        let result = ingredients::add_ingredient(&self.database, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Get an ingredient with its chemistry, per-100 g umami levels and TCM profile")]
    fn get_ingredient(&self, Parameters(p): Parameters<GetIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::get_ingredient(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(detail) => serde_json::to_string_pretty(&detail),
            None => Ok(format!(r#"{{"error": "Ingredient not found", "id": {}}}"#, p.id)),
        }.map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Search ingredients by name. sort_by: name (default), aa, nuc or synergy (descending, per 100 g)")]
    fn search_ingredients(&self, Parameters(p): Parameters<SearchIngredientsParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::search_ingredients(&self.database, &p.query, &p.sort_by, p.limit)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Delete an ingredient and its chemistry and TCM labels")]
    fn delete_ingredient(&self, Parameters(p): Parameters<DeleteIngredientParams>) -> Result<CallToolResult, McpError> {
        let result = ingredients::delete_ingredient(&self.database, p.id)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Compositions ---

    #[tool(description = "Analyze a composition: totals, synergy (EUC), levels, AA:Nuc balance and TCM distributions. Units: g, oz, tsp, tbsp, cup.")]
    fn analyze_composition(&self, Parameters(p): Parameters<AnalyzeCompositionParams>) -> Result<CallToolResult, McpError> {
        let items: Vec<CompositionItem> = p.items.into_iter().map(CompositionItem::from).collect();
        let result = compositions::analyze_composition(&self.database, &items)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    #[tool(description = "Classify a single value into its umami level (0-6). metric: aa, nuc or synergy")]
    fn classify_umami_value(&self, Parameters(p): Parameters<ClassifyUmamiValueParams>) -> Result<CallToolResult, McpError> {
        let result = compositions::classify_umami_value(&p.metric, p.value)
            .map_err(|e| McpError::internal_error(e, None))?;
        let json = serde_json::to_string_pretty(&result).map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for UmamiService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "umami".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Umami Workbench".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Umami Workbench - umami synergy and flavor composition analysis. \
                 IMPORTANT: Call composition_instructions before the first analysis. \
                 Ingredients: add/get/search/delete_ingredient (chemistry in mg per 100 g). \
                 Compositions: analyze_composition with items of {ingredient_id, quantity, unit}. \
                 Levels: classify_umami_value for a single aa, nuc or synergy value. \
                 Status: umami_status."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_params_default_unit_matches_model() {
        let params: AnalyzeCompositionParams = serde_json::from_str(
            r#"{"items": [{"ingredient_id": 7, "quantity": 30}, {"ingredient_id": 8, "quantity": 1, "unit": "tbsp"}]}"#,
        )
        .unwrap();
        let items: Vec<CompositionItem> = params.items.into_iter().map(CompositionItem::from).collect();

        let model: CompositionItem =
            serde_json::from_str(r#"{"ingredient_id": 7, "quantity": 30}"#).unwrap();
        assert_eq!(items[0], model);
        assert_eq!(items[0].unit, CompositionItem::default_unit());
        assert_eq!(items[1], CompositionItem::new(8, 1.0, "tbsp"));
    }
}
