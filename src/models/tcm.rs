//! Traditional Chinese Medicine attributes
//!
//! Categorical labels attached to an ingredient: thermal nature (Four Qi),
//! taste (Five Tastes) and meridian tropism.

use serde::{Deserialize, Serialize};

/// One of the three independent TCM label sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TcmAttribute {
    Nature,
    Taste,
    Meridian,
}

impl TcmAttribute {
    pub const ALL: [TcmAttribute; 3] = [TcmAttribute::Nature, TcmAttribute::Taste, TcmAttribute::Meridian];

    pub fn as_str(&self) -> &'static str {
        match self {
            TcmAttribute::Nature => "nature",
            TcmAttribute::Taste => "taste",
            TcmAttribute::Meridian => "meridian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nature" | "qi" | "four_qi" => Some(TcmAttribute::Nature),
            "taste" | "flavor" | "five_flavors" => Some(TcmAttribute::Taste),
            "meridian" | "meridians" => Some(TcmAttribute::Meridian),
            _ => None,
        }
    }
}

/// TCM profile of an ingredient (zero or more labels per set)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TcmProfile {
    #[serde(default)]
    pub natures: Vec<String>,
    #[serde(default)]
    pub tastes: Vec<String>,
    #[serde(default)]
    pub meridians: Vec<String>,
}

impl TcmProfile {
    pub fn labels(&self, attribute: TcmAttribute) -> &[String] {
        match attribute {
            TcmAttribute::Nature => &self.natures,
            TcmAttribute::Taste => &self.tastes,
            TcmAttribute::Meridian => &self.meridians,
        }
    }

    pub fn labels_mut(&mut self, attribute: TcmAttribute) -> &mut Vec<String> {
        match attribute {
            TcmAttribute::Nature => &mut self.natures,
            TcmAttribute::Taste => &mut self.tastes,
            TcmAttribute::Meridian => &mut self.meridians,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.natures.is_empty() && self.tastes.is_empty() && self.meridians.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trip() {
        for attr in TcmAttribute::ALL {
            assert_eq!(TcmAttribute::from_str(attr.as_str()), Some(attr));
        }
        assert_eq!(TcmAttribute::from_str("FLAVOR"), Some(TcmAttribute::Taste));
        assert_eq!(TcmAttribute::from_str("colour"), None);
    }

    #[test]
    fn test_labels_by_attribute() {
        let mut profile = TcmProfile::default();
        assert!(profile.is_empty());
        profile.labels_mut(TcmAttribute::Taste).push("Sweet".to_string());
        assert_eq!(profile.labels(TcmAttribute::Taste), ["Sweet".to_string()]);
        assert!(profile.labels(TcmAttribute::Nature).is_empty());
        assert!(!profile.is_empty());
    }
}
