//! Load an ingredient fixture into the catalog
//! Usage: cargo run --bin import_ingredients -- <ingredients.json>
//!
//! The file holds a JSON array of ingredients:
//! `[{"name": "Kombu", "chemistry": {"glu": 1608, ...}, "tcm": {"tastes": ["Salty"]}}]`
//! Ingredients whose name already exists are skipped.

use std::path::PathBuf;

use umami::models::{Ingredient, IngredientCreate};

fn get_database_path() -> PathBuf {
    std::env::var("UMAMI_DATABASE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let mut path = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()))
                .unwrap_or_else(|| PathBuf::from("."));

            if path.ends_with("release") || path.ends_with("debug") {
                if let Some(parent) = path.parent() {
                    if let Some(grandparent) = parent.parent() {
                        path = grandparent.to_path_buf();
                    }
                }
            }

            path.push("data");
            path.push("umami.db");
            path
        })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let Some(fixture) = args.get(1) else {
        eprintln!("Usage: import_ingredients <ingredients.json>");
        std::process::exit(2);
    };

    let raw = std::fs::read_to_string(fixture)?;
    let entries: Vec<IngredientCreate> = serde_json::from_str(&raw)?;
    println!("Fixture: {} ({} ingredients)", fixture, entries.len());

    let db_path = get_database_path();
    println!("Database: {}", db_path.display());
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let database = umami::db::Database::new(&db_path)?;
    database.with_conn(umami::db::run_migrations)?;

    let mut imported = 0;
    let mut skipped = 0;
    let mut failed = 0;

    for entry in entries {
        let exists = database.with_conn(|conn| Ingredient::get_by_name(conn, &entry.name))?;
        if exists.is_some() {
            println!("  skip  {}", entry.name);
            skipped += 1;
            continue;
        }

        let name = entry.name.clone();
        match umami::tools::ingredients::add_ingredient(&database, entry) {
            Ok(added) => {
                println!("  add   {} (id {})", added.name, added.id);
                imported += 1;
            }
            Err(e) => {
                eprintln!("  fail  {}: {}", name, e);
                failed += 1;
            }
        }
    }

    println!("Imported {}, skipped {}, failed {}", imported, skipped, failed);

    Ok(())
}
