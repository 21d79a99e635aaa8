//! Composition analysis pipeline
//!
//! units -> contributions -> synergy, then levels, balance and TCM
//! distributions over the same items. Recomputed from scratch on every call.

use serde::Serialize;

use super::balance::{analyze_balance, Balance};
use super::contribution::{aggregate_contributions, IngredientContribution, IngredientLookup};
use super::distribution::{tcm_distributions, TcmDistributions};
use super::levels::{classify, classify_all, LevelSummary, Metric};
use super::synergy::{concentrations, perceived_umami_index, umami_metrics, Concentrations};
use crate::models::CompositionItem;

/// Everything a presentation layer needs for one composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionResult {
    // Raw totals, absolute mg
    pub total_glu: f64,
    pub total_asp: f64,
    pub total_imp: f64,
    pub total_gmp: f64,
    pub total_amp: f64,

    // Weighted totals, mg-equivalent
    pub total_aa: f64,
    pub total_nuc: f64,
    pub total_synergy: f64,

    pub levels: LevelSummary,
    pub umami_description: &'static str,
    pub balance: Balance,
    pub distributions: TcmDistributions,

    pub total_weight_g: f64,
    pub concentrations: Option<Concentrations>,
    pub perceived_umami_index: f64,
    pub ingredients: Vec<IngredientContribution>,

    /// IDs the catalog could not resolve; they contributed nothing
    pub unresolved_ingredient_ids: Vec<i64>,
    /// Unit strings that were read as grams
    pub unrecognized_units: Vec<String>,
}

impl CompositionResult {
    /// True when every item resolved and every unit was recognized
    pub fn is_complete(&self) -> bool {
        self.unresolved_ingredient_ids.is_empty() && self.unrecognized_units.is_empty()
    }
}

pub fn analyze_composition<L>(items: &[CompositionItem], catalog: &L) -> CompositionResult
where
    L: IngredientLookup + ?Sized,
{
    let summary = aggregate_contributions(items, catalog);
    let metrics = umami_metrics(&summary.totals);

    let concentrations = concentrations(&summary.totals, summary.total_weight_g);
    let pui = concentrations
        .map(|c| perceived_umami_index(c.aa_mg_per_100g, c.nuc_mg_per_100g))
        .unwrap_or(0.0);

    // Only resolved items carry a breakdown entry
    let distributions = tcm_distributions(summary.items.iter().filter_map(|item| {
        catalog
            .lookup(item.ingredient_id)
            .map(|ingredient| (item.quantity_grams, &ingredient.tcm))
    }));

    let result = CompositionResult {
        total_glu: summary.totals.glu,
        total_asp: summary.totals.asp,
        total_imp: summary.totals.imp,
        total_gmp: summary.totals.gmp,
        total_amp: summary.totals.amp,
        total_aa: metrics.aa,
        total_nuc: metrics.nuc,
        total_synergy: metrics.synergy,
        levels: classify_all(metrics.aa, metrics.nuc, metrics.synergy),
        umami_description: classify(Metric::Synergy, metrics.synergy).synergy_description(),
        balance: analyze_balance(metrics.aa, metrics.nuc),
        distributions,
        total_weight_g: summary.total_weight_g,
        concentrations,
        perceived_umami_index: pui,
        ingredients: summary.items,
        unresolved_ingredient_ids: summary.unresolved_ingredient_ids,
        unrecognized_units: summary.unrecognized_units,
    };

    tracing::debug!(
        items = items.len(),
        total_aa = result.total_aa,
        total_nuc = result.total_nuc,
        total_synergy = result.total_synergy,
        zone = result.balance.zone.as_str(),
        "composition analyzed"
    );

    result
}
