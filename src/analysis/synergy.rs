//! Umami synergy calculation
//!
//! Weighted amino acid and nucleotide totals plus the Equivalent Umami
//! Concentration (EUC):
//!
//! ```text
//! AA  = glu * 1.0 + asp * 0.077
//! Nuc = imp * 1.0 + gmp * 2.3 + amp * 0.18
//! EUC = AA + 1218 * AA * Nuc / 1000
//! ```
//!
//! The constant 1218 is calibrated for g/100 g; AA and Nuc are tracked in mg,
//! hence the `/ 1000`.

use serde::Serialize;

use crate::models::Chemistry;

// ============================================================================
// Relative umami weights
// ============================================================================

pub const GLU_WEIGHT: f64 = 1.0;
pub const ASP_WEIGHT: f64 = 0.077;
pub const IMP_WEIGHT: f64 = 1.0;
pub const GMP_WEIGHT: f64 = 2.3;
pub const AMP_WEIGHT: f64 = 0.18;

/// Empirical cross-synergy constant (g basis)
pub const SYNERGY_CONSTANT: f64 = 1218.0;
/// mg to g correction applied to the cross term
pub const MG_PER_G: f64 = 1000.0;

// Perceived Umami Index parameters
const PUI_K_AA: f64 = 80.0;
const PUI_HILL_N: f64 = 1.4;
const PUI_ALPHA: f64 = 1.5;
const PUI_K_NUC: f64 = 30.0;

/// The three headline metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct UmamiMetrics {
    pub aa: f64,
    pub nuc: f64,
    pub synergy: f64,
}

/// Weighted amino acid total
pub fn weighted_aa(chem: &Chemistry) -> f64 {
    chem.glu * GLU_WEIGHT + chem.asp * ASP_WEIGHT
}

/// Weighted nucleotide total
pub fn weighted_nuc(chem: &Chemistry) -> f64 {
    chem.imp * IMP_WEIGHT + chem.gmp * GMP_WEIGHT + chem.amp * AMP_WEIGHT
}

/// Equivalent Umami Concentration. Without both sides there is no
/// enhancement and the result is `aa` unchanged.
pub fn equivalent_umami(aa: f64, nuc: f64) -> f64 {
    if aa > 0.0 && nuc > 0.0 {
        aa + (SYNERGY_CONSTANT * aa * nuc) / MG_PER_G
    } else {
        aa
    }
}

pub fn umami_metrics(chem: &Chemistry) -> UmamiMetrics {
    let aa = weighted_aa(chem);
    let nuc = weighted_nuc(chem);
    UmamiMetrics {
        aa,
        nuc,
        synergy: equivalent_umami(aa, nuc),
    }
}

/// Composition totals re-expressed per 100 g of finished blend
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Concentrations {
    pub glu_mg_per_100g: f64,
    pub asp_mg_per_100g: f64,
    pub imp_mg_per_100g: f64,
    pub gmp_mg_per_100g: f64,
    pub amp_mg_per_100g: f64,
    pub aa_mg_per_100g: f64,
    pub nuc_mg_per_100g: f64,
    pub synergy_mg_per_100g: f64,
}

/// Normalize absolute totals by blend mass. `None` when the blend has no mass.
pub fn concentrations(totals: &Chemistry, total_weight_g: f64) -> Option<Concentrations> {
    if !(total_weight_g > 0.0) {
        return None;
    }

    let per_100g = totals.scale(100.0 / total_weight_g);
    let metrics = umami_metrics(&per_100g);

    Some(Concentrations {
        glu_mg_per_100g: per_100g.glu,
        asp_mg_per_100g: per_100g.asp,
        imp_mg_per_100g: per_100g.imp,
        gmp_mg_per_100g: per_100g.gmp,
        amp_mg_per_100g: per_100g.amp,
        aa_mg_per_100g: metrics.aa,
        nuc_mg_per_100g: metrics.nuc,
        synergy_mg_per_100g: metrics.synergy,
    })
}

/// Perceived Umami Index (0-100) from per-100 g weighted values.
///
/// A Hill curve on AA (`K = 80`, `n = 1.4`) boosted by a saturating
/// nucleotide term (`alpha = 1.5`, `K = 30`), capped at 100.
pub fn perceived_umami_index(aa_mg_per_100g: f64, nuc_mg_per_100g: f64) -> f64 {
    let p_aa = if aa_mg_per_100g > 0.0 {
        1.0 / (1.0 + (PUI_K_AA / aa_mg_per_100g).powf(PUI_HILL_N))
    } else {
        0.0
    };

    let b_nuc = if nuc_mg_per_100g > 0.0 {
        1.0 + PUI_ALPHA * (nuc_mg_per_100g / (nuc_mg_per_100g + PUI_K_NUC))
    } else {
        1.0
    };

    (p_aa * b_nuc).min(1.0) * 100.0
}
