//! Six-level umami classification
//!
//! Each headline metric has its own threshold table. Level 0 is reserved for
//! a value of exactly zero; levels 1-5 are closed on their upper bound and
//! level 6 is open-ended. Bounds are percentile-derived, in mg-equivalent.

use serde::{Deserialize, Serialize};

/// Which headline metric a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    #[serde(alias = "amino_acids")]
    Aa,
    #[serde(alias = "nucleotides")]
    Nuc,
    #[serde(alias = "euc")]
    Synergy,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Aa => "aa",
            Metric::Nuc => "nuc",
            Metric::Synergy => "synergy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aa" | "amino_acids" => Some(Metric::Aa),
            "nuc" | "nucleotides" => Some(Metric::Nuc),
            "synergy" | "euc" => Some(Metric::Synergy),
            _ => None,
        }
    }

    /// Upper bounds of levels 1 through 5
    pub fn thresholds(&self) -> &'static [f64; 5] {
        match self {
            Metric::Aa => &AA_THRESHOLDS,
            Metric::Nuc => &NUC_THRESHOLDS,
            Metric::Synergy => &SYNERGY_THRESHOLDS,
        }
    }
}

pub const AA_THRESHOLDS: [f64; 5] = [13.0, 50.0, 260.0, 740.0, 1330.0];
pub const NUC_THRESHOLDS: [f64; 5] = [15.0, 75.0, 290.0, 650.0, 870.0];
pub const SYNERGY_THRESHOLDS: [f64; 5] = [16.0, 76.0, 400.0, 1900.0, 11800.0];

/// Ordinal intensity band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UmamiLevel {
    None = 0,
    VeryLow = 1,
    Low = 2,
    Moderate = 3,
    High = 4,
    VeryHigh = 5,
    Exceptional = 6,
}

impl UmamiLevel {
    const BANDS: [UmamiLevel; 6] = [
        UmamiLevel::VeryLow,
        UmamiLevel::Low,
        UmamiLevel::Moderate,
        UmamiLevel::High,
        UmamiLevel::VeryHigh,
        UmamiLevel::Exceptional,
    ];

    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn label(&self) -> &'static str {
        match self {
            UmamiLevel::None => "None",
            UmamiLevel::VeryLow => "Very Low",
            UmamiLevel::Low => "Low",
            UmamiLevel::Moderate => "Moderate",
            UmamiLevel::High => "High",
            UmamiLevel::VeryHigh => "Very High",
            UmamiLevel::Exceptional => "Exceptional",
        }
    }

    /// Guidance text for a synergy level
    pub fn synergy_description(&self) -> &'static str {
        match self {
            UmamiLevel::None => "No umami detected",
            UmamiLevel::VeryLow => "Minimal umami presence",
            UmamiLevel::Low => "Subtle umami notes",
            UmamiLevel::Moderate => "Achieves balanced umami",
            UmamiLevel::High => "Strong umami character",
            UmamiLevel::VeryHigh => "Rich umami intensity",
            UmamiLevel::Exceptional => "Exceptional umami depth",
        }
    }
}

/// Serializable `{level, label}` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: u8,
    pub label: &'static str,
}

impl From<UmamiLevel> for Classification {
    fn from(level: UmamiLevel) -> Self {
        Self {
            level: level.level(),
            label: level.label(),
        }
    }
}

/// Classify a metric value into its band
pub fn classify(metric: Metric, value: f64) -> UmamiLevel {
    // Zero, negatives and NaN all read as "no umami"
    if !(value > 0.0) {
        return UmamiLevel::None;
    }

    metric
        .thresholds()
        .iter()
        .position(|&upper| value <= upper)
        .map(|idx| UmamiLevel::BANDS[idx])
        .unwrap_or(UmamiLevel::Exceptional)
}

/// Levels for all three headline metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelSummary {
    pub aa: Classification,
    pub nuc: Classification,
    pub synergy: Classification,
}

pub fn classify_all(aa: f64, nuc: f64, synergy: f64) -> LevelSummary {
    LevelSummary {
        aa: classify(Metric::Aa, aa).into(),
        nuc: classify(Metric::Nuc, nuc).into(),
        synergy: classify(Metric::Synergy, synergy).into(),
    }
}
