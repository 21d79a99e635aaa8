//! Database migrations
//!
//! Schema creation and migration logic for the ingredient catalog.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- INGREDIENTS
        -- ============================================
        CREATE TABLE ingredients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            display_name TEXT,
            category TEXT,

            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_ingredients_name ON ingredients(name);
        CREATE INDEX idx_ingredients_display_name ON ingredients(display_name);

        -- ============================================
        -- INGREDIENT CHEMISTRY
        -- mg per 100 g; absent row means "not analysed"
        -- ============================================
        CREATE TABLE ingredient_chemistry (
            ingredient_id INTEGER PRIMARY KEY REFERENCES ingredients(id) ON DELETE CASCADE,
            glu REAL NOT NULL DEFAULT 0 CHECK(glu >= 0),
            asp REAL NOT NULL DEFAULT 0 CHECK(asp >= 0),
            imp REAL NOT NULL DEFAULT 0 CHECK(imp >= 0),
            gmp REAL NOT NULL DEFAULT 0 CHECK(gmp >= 0),
            amp REAL NOT NULL DEFAULT 0 CHECK(amp >= 0)
        );

        -- ============================================
        -- INGREDIENT TCM LABELS
        -- ============================================
        CREATE TABLE ingredient_tcm (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ingredient_id INTEGER NOT NULL REFERENCES ingredients(id) ON DELETE CASCADE,
            attribute TEXT NOT NULL CHECK(attribute IN ('nature', 'taste', 'meridian')),
            label TEXT NOT NULL,

            UNIQUE(ingredient_id, attribute, label)
        );

        CREATE INDEX idx_ingredient_tcm_ingredient ON ingredient_tcm(ingredient_id);
        CREATE INDEX idx_ingredient_tcm_label ON ingredient_tcm(attribute, label);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_rejects_unknown_tcm_attribute() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute("INSERT INTO ingredients (name) VALUES ('Tomato')", []).unwrap();
        let result = conn.execute(
            "INSERT INTO ingredient_tcm (ingredient_id, attribute, label) VALUES (1, 'colour', 'Red')",
            [],
        );
        assert!(result.is_err());
    }
}
