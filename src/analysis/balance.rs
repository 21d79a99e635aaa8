//! AA:Nuc balance analysis
//!
//! Synergy peaks when weighted amino acids and nucleotides contribute
//! equally. The zone verdict reads the raw `AA / Nuc` ratio; the percentage
//! split is derived from one rounded share so it always sums to 100.

use serde::{Deserialize, Serialize};

/// Lower edge of the optimal zone (inclusive)
pub const OPTIMAL_RATIO_MIN: f64 = 0.6;
/// Upper edge of the optimal zone (inclusive)
pub const OPTIMAL_RATIO_MAX: f64 = 1.6;
/// Floor applied to Nuc before dividing
pub const RATIO_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceZone {
    NeedsAa,
    Optimal,
    NeedsNuc,
}

impl BalanceZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceZone::NeedsAa => "needs_aa",
            BalanceZone::Optimal => "optimal",
            BalanceZone::NeedsNuc => "needs_nuc",
        }
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            BalanceZone::NeedsAa => "Add amino-rich ingredient (tomato, cheese, soy sauce).",
            BalanceZone::Optimal => "Optimal synergy ratio achieved.",
            BalanceZone::NeedsNuc => "Add nucleotide-rich ingredient (mushrooms, seafood, seaweed).",
        }
    }

    pub fn from_ratio(ratio: f64) -> Self {
        if ratio < OPTIMAL_RATIO_MIN {
            BalanceZone::NeedsAa
        } else if ratio <= OPTIMAL_RATIO_MAX {
            BalanceZone::Optimal
        } else {
            BalanceZone::NeedsNuc
        }
    }
}

/// Balance verdict for a pair of weighted totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balance {
    pub aa_percent: u32,
    pub nuc_percent: u32,
    /// "AA:Nuc", e.g. "67:33"
    pub ratio_text: String,
    pub aa_nuc_ratio: f64,
    pub zone: BalanceZone,
    pub suggestion: &'static str,
}

/// Percentage split of AA vs Nuc; 50:50 when both are zero
pub fn percent_split(aa: f64, nuc: f64) -> (u32, u32) {
    let total = aa + nuc;
    if !(total > 0.0) {
        return (50, 50);
    }
    let aa_percent = ((aa / total) * 100.0).round().clamp(0.0, 100.0) as u32;
    (aa_percent, 100 - aa_percent)
}

/// Raw AA / Nuc ratio. Nuc is floored at [`RATIO_EPSILON`], so Nuc = 0 gives
/// a large sentinel instead of infinity. An empty blend reads as 1.0.
pub fn aa_nuc_ratio(aa: f64, nuc: f64) -> f64 {
    if !(aa + nuc > 0.0) {
        return 1.0;
    }
    aa / nuc.max(RATIO_EPSILON)
}

pub fn analyze_balance(aa: f64, nuc: f64) -> Balance {
    let (aa_percent, nuc_percent) = percent_split(aa, nuc);
    let ratio = aa_nuc_ratio(aa, nuc);
    let zone = BalanceZone::from_ratio(ratio);

    Balance {
        aa_percent,
        nuc_percent,
        ratio_text: format!("{}:{}", aa_percent, nuc_percent),
        aa_nuc_ratio: ratio,
        zone,
        suggestion: zone.suggestion(),
    }
}
