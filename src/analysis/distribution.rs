//! Mass-weighted TCM distributions
//!
//! For each attribute set, every item's mass is split equally over its own
//! distinct labels, summed per label and turned into percentages that add up
//! to exactly 100.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{TcmAttribute, TcmProfile};

/// One label's share of a distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub label: String,
    pub percent: f64,
}

/// Distributions for all three attribute sets, each sorted by share descending
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TcmDistributions {
    pub natures: Vec<DistributionEntry>,
    pub tastes: Vec<DistributionEntry>,
    pub meridians: Vec<DistributionEntry>,
}

/// Canonical form of a label; `None` for blank labels
pub fn normalize_label(attribute: TcmAttribute, label: &str) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return None;
    }
    if attribute == TcmAttribute::Taste && trimmed.eq_ignore_ascii_case("spicy") {
        return Some("Pungent".to_string());
    }
    Some(trimmed.to_string())
}

/// Normalized labels of one item, first occurrence wins
fn distinct_labels(attribute: TcmAttribute, labels: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        if let Some(normalized) = normalize_label(attribute, label) {
            if !out.contains(&normalized) {
                out.push(normalized);
            }
        }
    }
    out
}

/// Accumulates per-label weight for one attribute set
#[derive(Debug, Default)]
struct LabelWeights {
    weights: HashMap<String, f64>,
    /// Every label seen, in first-seen order, regardless of mass
    observed: Vec<String>,
}

impl LabelWeights {
    fn add(&mut self, labels: &[String], grams: f64) {
        if labels.is_empty() {
            return;
        }
        for label in labels {
            if !self.observed.contains(label) {
                self.observed.push(label.clone());
            }
        }
        if grams > 0.0 {
            let share = grams / labels.len() as f64;
            for label in labels {
                *self.weights.entry(label.clone()).or_insert(0.0) += share;
            }
        }
    }

    fn into_entries(self) -> Vec<DistributionEntry> {
        let weighted: Vec<(String, f64)> = self
            .weights
            .into_iter()
            .filter(|(_, weight)| *weight > 0.0)
            .collect();

        if weighted.is_empty() {
            // No usable mass: plain presence split over the labels seen
            let presence = self.observed.into_iter().map(|label| (label, 1.0)).collect();
            return to_percentages(presence);
        }

        to_percentages(weighted)
    }
}

/// Convert label weights into a descending distribution summing to 100.
///
/// All entries but the last are rounded to one decimal; the last takes the
/// remainder. Work happens in integer tenths so the total is exact, and
/// entries trimmed to zero are dropped.
pub fn to_percentages(mut weights: Vec<(String, f64)>) -> Vec<DistributionEntry> {
    let total: f64 = weights.iter().map(|(_, w)| *w).sum();
    if weights.is_empty() || !(total > 0.0) {
        return Vec::new();
    }

    weights.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let last = weights.len() - 1;
    let mut assigned: i64 = 0;
    let mut tenths: Vec<(String, i64)> = Vec::with_capacity(weights.len());

    for (idx, (label, weight)) in weights.into_iter().enumerate() {
        let value = if idx == last {
            (1000 - assigned).max(0)
        } else {
            (weight / total * 1000.0).round() as i64
        };
        assigned += value;
        tenths.push((label, value));
    }

    // Head entries rounding up can push the sum past 1000 with the last
    // entry clamped at zero. Trim the excess from the smallest shares.
    let mut excess: i64 = tenths.iter().map(|(_, v)| *v).sum::<i64>() - 1000;
    for (_, value) in tenths.iter_mut().rev() {
        if excess <= 0 {
            break;
        }
        let take = excess.min(*value);
        *value -= take;
        excess -= take;
    }

    tenths
        .into_iter()
        .filter(|(_, value)| *value > 0)
        .map(|(label, value)| DistributionEntry {
            label,
            percent: value as f64 / 10.0,
        })
        .collect()
}

/// Build all three distributions from `(grams, profile)` pairs
pub fn tcm_distributions<'a, I>(items: I) -> TcmDistributions
where
    I: IntoIterator<Item = (f64, &'a TcmProfile)>,
{
    let mut natures = LabelWeights::default();
    let mut tastes = LabelWeights::default();
    let mut meridians = LabelWeights::default();

    for (grams, profile) in items {
        natures.add(&distinct_labels(TcmAttribute::Nature, &profile.natures), grams);
        tastes.add(&distinct_labels(TcmAttribute::Taste, &profile.tastes), grams);
        meridians.add(&distinct_labels(TcmAttribute::Meridian, &profile.meridians), grams);
    }

    TcmDistributions {
        natures: natures.into_entries(),
        tastes: tastes.into_entries(),
        meridians: meridians.into_entries(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(natures: &[&str], tastes: &[&str], meridians: &[&str]) -> TcmProfile {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect();
        TcmProfile {
            natures: owned(natures),
            tastes: owned(tastes),
            meridians: owned(meridians),
        }
    }

    fn tenths(entries: &[DistributionEntry]) -> i64 {
        entries.iter().map(|e| (e.percent * 10.0).round() as i64).sum()
    }

    fn assert_descending(entries: &[DistributionEntry]) {
        for pair in entries.windows(2) {
            assert!(pair[0].percent >= pair[1].percent, "{:?}", entries);
        }
    }

    fn percent_of(entries: &[DistributionEntry], label: &str) -> Option<f64> {
        entries.iter().find(|e| e.label == label).map(|e| e.percent)
    }

    #[test]
    fn test_empty_input() {
        let dist = tcm_distributions(Vec::<(f64, &TcmProfile)>::new());
        assert_eq!(dist, TcmDistributions::default());
    }

    #[test]
    fn test_mass_split_across_item_labels() {
        let a = profile(&["Warm"], &["Sweet", "Salty"], &[]);
        let b = profile(&["Cold"], &["Sweet"], &[]);
        let dist = tcm_distributions(vec![(100.0, &a), (100.0, &b)]);

        // Sweet: 50 + 100, Salty: 50
        assert_eq!(percent_of(&dist.tastes, "Sweet"), Some(75.0));
        assert_eq!(percent_of(&dist.tastes, "Salty"), Some(25.0));
        assert_eq!(dist.tastes[0].label, "Sweet");
        assert_eq!(percent_of(&dist.natures, "Warm"), Some(50.0));
        assert!(dist.meridians.is_empty());
    }

    #[test]
    fn test_spicy_folds_into_pungent() {
        let a = profile(&[], &["Spicy", "Pungent"], &[]);
        let b = profile(&[], &["spicy"], &[]);
        let c = profile(&[], &["Sour"], &[]);
        let dist = tcm_distributions(vec![(10.0, &a), (10.0, &b), (20.0, &c)]);

        assert_eq!(dist.tastes.len(), 2);
        assert_eq!(percent_of(&dist.tastes, "Pungent"), Some(50.0));
        assert_eq!(percent_of(&dist.tastes, "Sour"), Some(50.0));
        assert_eq!(percent_of(&dist.tastes, "Spicy"), None);
    }

    #[test]
    fn test_reconciles_to_exactly_100() {
        let p = profile(&["Cold", "Neutral", "Warm"], &[], &[]);
        let dist = tcm_distributions(vec![(1.0, &p)]);
        let percents: Vec<f64> = dist.natures.iter().map(|e| e.percent).collect();
        // Ties sort by label; the last entry absorbs the remainder
        assert_eq!(dist.natures[0].label, "Cold");
        assert_eq!(percents, vec![33.3, 33.3, 33.4]);
        assert_eq!(tenths(&dist.natures), 1000);
    }

    #[test]
    fn test_many_labels_sum_to_100() {
        let weights: Vec<(String, f64)> = (1..=7)
            .map(|i| (format!("Label{}", i), 1.0 / i as f64))
            .collect();
        let entries = to_percentages(weights);
        assert_eq!(entries.len(), 7);
        assert_eq!(tenths(&entries), 1000);
        assert_descending(&entries);
    }

    #[test]
    fn test_tiny_shares_are_dropped() {
        let weights = vec![("Spleen".to_string(), 10000.0), ("Lung".to_string(), 1.0)];
        let entries = to_percentages(weights);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].percent, 100.0);
    }

    /// One dominant label, ten that each round 0.505 up to 0.1 and a trace
    fn overshooting_weights() -> Vec<(String, f64)> {
        let mut weights = vec![("Spleen".to_string(), 1989.9)];
        weights.extend((0..10).map(|i| (format!("M{:02}", i), 1.01)));
        weights.push(("Tiny".to_string(), 1e-7));
        weights
    }

    #[test]
    fn test_rounding_overshoot_is_trimmed_from_tail() {
        let entries = to_percentages(overshooting_weights());

        assert_eq!(tenths(&entries), 1000);
        assert_descending(&entries);
        assert_eq!(entries[0].label, "Spleen");
        assert_eq!(entries[0].percent, 99.5);
        assert_eq!(entries.len(), 6);
        assert!(entries.iter().all(|e| e.percent > 0.0));
        assert!(entries.iter().all(|e| e.label != "Tiny"));
    }

    #[test]
    fn test_rounding_overshoot_through_profiles() {
        let profiles: Vec<(f64, TcmProfile)> = overshooting_weights()
            .into_iter()
            .map(|(label, grams)| (grams, profile(&[], &[], &[label.as_str()])))
            .collect();
        let dist = tcm_distributions(profiles.iter().map(|(grams, p)| (*grams, p)));

        assert_eq!(tenths(&dist.meridians), 1000);
        assert_descending(&dist.meridians);
        assert_eq!(dist.meridians[0].label, "Spleen");
    }

    #[test]
    fn test_presence_fallback_without_mass() {
        let a = profile(&[], &[], &["Lung", "Spleen"]);
        let b = profile(&[], &[], &["Spleen", "Kidney"]);
        let dist = tcm_distributions(vec![(0.0, &a), (0.0, &b)]);

        assert_eq!(dist.meridians.len(), 3);
        assert_eq!(tenths(&dist.meridians), 1000);
        assert_eq!(dist.meridians[2].percent, 33.4);
    }

    #[test]
    fn test_blank_labels_ignored() {
        assert_eq!(normalize_label(TcmAttribute::Meridian, "  "), None);
        assert_eq!(normalize_label(TcmAttribute::Nature, " Warm "), Some("Warm".to_string()));
        // Only tastes fold Spicy
        assert_eq!(normalize_label(TcmAttribute::Nature, "Spicy"), Some("Spicy".to_string()));
    }
}
