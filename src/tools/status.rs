//! Umami Status Tool
//!
//! Provides runtime status information about the Umami service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::db::migrations::{get_schema_version, needs_migration};
use crate::db::Database;
use crate::models::Ingredient;

/// Composition analysis instructions for AI assistants
pub const COMPOSITION_INSTRUCTIONS: &str = r#"
# Umami Composition Instructions

This guide explains how to analyze a blend using the Umami Workbench tools.

## Overview

A composition is a list of catalog ingredients, each with a quantity and a
unit. The server converts every item to grams, scales the ingredient's
per-100 g chemistry, sums the totals and reports synergy, levels, balance
and TCM distributions.

## Step 1: Find Ingredients

Use `search_ingredients` to locate ingredient IDs:

```
search_ingredients(query: "shiitake")
search_ingredients(query: "", sort_by: "synergy", limit: 10)
```

`sort_by` accepts `name` (default), `aa`, `nuc` or `synergy`. Umami sorts
are descending and compare per-100 g values.

If an ingredient is missing, add it with `add_ingredient`. Chemistry values
are mg per 100 g and must be non-negative:

```
add_ingredient(
  name: "Kombu",
  category: "Seaweed",
  chemistry: { glu: 1608, asp: 0, imp: 0, gmp: 0, amp: 0 },
  tcm: { natures: ["Cold"], tastes: ["Salty"], meridians: ["Liver", "Stomach", "Kidney"] }
)
```

Omit `chemistry` when no analysis exists. Such ingredients still count
toward TCM distributions but contribute zero umami.

## Step 2: Analyze

```
analyze_composition(items: [
  { ingredient_id: 12, quantity: 10, unit: "g" },
  { ingredient_id: 31, quantity: 1, unit: "tbsp" }
])
```

### Units

| Unit | Grams |
|------|-------|
| g    | 1     |
| oz   | 28.35 |
| tsp  | 5     |
| tbsp | 15    |
| cup  | 240   |

Units match case-insensitively. Anything else is read as grams and listed
in `unrecognized_units`. Unknown ingredient IDs contribute nothing and are
listed in `unresolved_ingredient_ids`. Check both before trusting a result.

## Step 3: Read the Result

- `total_glu` ... `total_amp`: absolute mg in the whole blend
- `total_aa` = glu + 0.077 asp
- `total_nuc` = imp + 2.3 gmp + 0.18 amp
- `total_synergy` = aa + 1218 * aa * nuc / 1000 (equals aa when either side is 0)
- `levels`: 0 None, 1 Very Low, 2 Low, 3 Moderate, 4 High, 5 Very High, 6 Exceptional
- `balance.zone`: `needs_aa` (ratio < 0.6), `optimal` (0.6 to 1.6), `needs_nuc` (> 1.6)
- `distributions`: nature, taste and meridian shares by mass, each summing to 100
- `concentrations`: the same totals per 100 g of finished blend

Totals are absolute, so doubling every quantity doubles AA and Nuc and
roughly quadruples the synergy term. Compare blends of different size with
`concentrations` or `perceived_umami_index`.

## Step 4: Adjust

Follow `balance.suggestion`. Nucleotide-rich additions (mushrooms, bonito,
seaweed) move a glutamate-heavy blend toward the optimal zone; amino-rich
additions (tomato, aged cheese, soy sauce) do the reverse.

## Single Values

`classify_umami_value(metric: "synergy", value: 1318)` returns the level
for one number. `metric` is `aa`, `nuc` or `synergy`.
"#;

/// Runtime status of the Umami service
#[derive(Debug, Clone, Serialize)]
pub struct UmamiStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub ingredient_count: Option<i64>,
    pub schema_version: Option<i32>,
    /// False when the database predates the running binary's schema
    pub schema_current: Option<bool>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub as_of: String,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, db: &Database) -> UmamiStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let catalog = db.with_conn(|conn| {
            let version = get_schema_version(conn)?;
            let stale = needs_migration(conn)?;
            let count = Ingredient::count(conn)?;
            Ok((version, !stale, count))
        });
        let (schema_version, schema_current, ingredient_count) = match catalog {
            Ok((version, current, count)) => (Some(version), Some(current), Some(count)),
            Err(e) => {
                tracing::warn!(error = %e, "could not read catalog status");
                (None, None, None)
            }
        };

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        UmamiStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            ingredient_count,
            schema_version,
            schema_current,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            as_of: chrono::Local::now().to_rfc3339(),
        }
    }
}
