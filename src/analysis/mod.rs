//! Umami analysis engine
//!
//! Pure computation over compositions: unit conversion, chemical
//! contributions, synergy, level classification, AA:Nuc balance and TCM
//! distributions. Nothing here touches the database.

pub mod balance;
pub mod composer;
pub mod contribution;
pub mod distribution;
pub mod levels;
pub mod synergy;
pub mod units;

pub use balance::{analyze_balance, Balance, BalanceZone};
pub use composer::{analyze_composition, CompositionResult};
pub use contribution::{aggregate_contributions, ContributionSummary, IngredientContribution, IngredientLookup};
pub use distribution::{tcm_distributions, DistributionEntry, TcmDistributions};
pub use levels::{classify, classify_all, Classification, LevelSummary, Metric, UmamiLevel};
pub use synergy::{equivalent_umami, umami_metrics, Concentrations, UmamiMetrics};
pub use units::{to_grams, to_grams_strict, Unit, UnitError};
