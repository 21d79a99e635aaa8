//! Shared chemistry data structure
//!
//! Used for ingredient concentrations (mg per 100 g), per-item contributions
//! and composition totals (absolute mg).

use serde::{Deserialize, Serialize};

/// Umami-active compounds, in milligrams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Chemistry {
    pub glu: f64, // glutamate
    pub asp: f64, // aspartate
    pub imp: f64, // inosine monophosphate
    pub gmp: f64, // guanosine monophosphate
    pub amp: f64, // adenosine monophosphate
}

impl Chemistry {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale every compound by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            glu: self.glu * multiplier,
            asp: self.asp * multiplier,
            imp: self.imp * multiplier,
            gmp: self.gmp * multiplier,
            amp: self.amp * multiplier,
        }
    }

    pub fn add(&self, other: &Chemistry) -> Self {
        Self {
            glu: self.glu + other.glu,
            asp: self.asp + other.asp,
            imp: self.imp + other.imp,
            gmp: self.gmp + other.gmp,
            amp: self.amp + other.amp,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.glu == 0.0 && self.asp == 0.0 && self.imp == 0.0 && self.gmp == 0.0 && self.amp == 0.0
    }
}

impl std::ops::Add for Chemistry {
    type Output = Chemistry;

    fn add(self, other: Chemistry) -> Chemistry {
        Chemistry::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Chemistry {
    type Output = Chemistry;

    fn mul(self, multiplier: f64) -> Chemistry {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Chemistry {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Chemistry::zero(), |acc, c| acc + c)
    }
}
