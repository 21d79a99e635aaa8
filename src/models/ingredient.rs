//! Ingredient model
//!
//! An ingredient with per-100 g umami chemistry and TCM attributes. This is the
//! catalog side of the system: the analysis engine only ever reads it.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::analysis::synergy::{umami_metrics, UmamiMetrics};
use crate::db::DbResult;
use super::{Chemistry, TcmAttribute, TcmProfile};

const SELECT_INGREDIENT: &str = r#"
    SELECT i.id, i.name, i.display_name, i.category, i.notes, i.created_at, i.updated_at,
           c.ingredient_id AS chemistry_id, c.glu, c.asp, c.imp, c.gmp, c.amp
    FROM ingredients i
    LEFT JOIN ingredient_chemistry c ON c.ingredient_id = i.id
"#;

/// Sort order for catalog searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IngredientSort {
    #[default]
    Name,
    AminoAcids,
    Nucleotides,
    Synergy,
}

impl IngredientSort {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "aa" | "umami_aa" | "amino_acids" => IngredientSort::AminoAcids,
            "nuc" | "umami_nuc" | "nucleotides" => IngredientSort::Nucleotides,
            "synergy" | "umami_synergy" | "euc" => IngredientSort::Synergy,
            _ => IngredientSort::Name,
        }
    }
}

/// A catalog ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
    pub category: Option<String>,
    /// Concentrations in mg per 100 g; `None` when no analysis exists
    pub chemistry: Option<Chemistry>,
    pub tcm: TcmProfile,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientCreate {
    pub name: String,
    pub display_name: Option<String>,
    pub category: Option<String>,
    pub chemistry: Option<Chemistry>,
    #[serde(default)]
    pub tcm: TcmProfile,
    pub notes: Option<String>,
}

impl Ingredient {
    /// Name to show to a user
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Weighted AA, Nuc and synergy per 100 g of this ingredient
    pub fn umami_metrics(&self) -> UmamiMetrics {
        umami_metrics(&self.chemistry.unwrap_or_default())
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let chemistry_id: Option<i64> = row.get("chemistry_id")?;
        let chemistry = match chemistry_id {
            Some(_) => Some(Chemistry {
                glu: row.get("glu")?,
                asp: row.get("asp")?,
                imp: row.get("imp")?,
                gmp: row.get("gmp")?,
                amp: row.get("amp")?,
            }),
            None => None,
        };

        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            display_name: row.get("display_name")?,
            category: row.get("category")?,
            chemistry,
            tcm: TcmProfile::default(),
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn load_tcm(conn: &Connection, id: i64) -> DbResult<TcmProfile> {
        let mut stmt = conn.prepare(
            "SELECT attribute, label FROM ingredient_tcm WHERE ingredient_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map([id], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut profile = TcmProfile::default();
        for (attribute, label) in rows {
            if let Some(attr) = TcmAttribute::from_str(&attribute) {
                profile.labels_mut(attr).push(label);
            }
        }
        Ok(profile)
    }

    /// Insert a new ingredient with its chemistry and TCM labels
    pub fn create(conn: &Connection, data: &IngredientCreate) -> DbResult<Self> {
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT INTO ingredients (name, display_name, category, notes)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![data.name, data.display_name, data.category, data.notes],
        )?;
        let id = tx.last_insert_rowid();

        if let Some(ref chem) = data.chemistry {
            tx.execute(
                r#"
                INSERT INTO ingredient_chemistry (ingredient_id, glu, asp, imp, gmp, amp)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
                params![id, chem.glu, chem.asp, chem.imp, chem.gmp, chem.amp],
            )?;
        }

        for attribute in TcmAttribute::ALL {
            for label in data.tcm.labels(attribute) {
                let label = label.trim();
                if label.is_empty() {
                    continue;
                }
                tx.execute(
                    r#"
                    INSERT OR IGNORE INTO ingredient_tcm (ingredient_id, attribute, label)
                    VALUES (?1, ?2, ?3)
                    "#,
                    params![id, attribute.as_str(), label],
                )?;
            }
        }

        tx.commit()?;

        tracing::debug!(ingredient_id = id, name = %data.name, "ingredient created");

        Self::get_by_id(conn, id)?.ok_or_else(|| {
            crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows)
        })
    }

    /// Get an ingredient by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let sql = format!("{} WHERE i.id = ?1", SELECT_INGREDIENT);
        let mut stmt = conn.prepare(&sql)?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(mut item) => {
                item.tcm = Self::load_tcm(conn, id)?;
                Ok(Some(item))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Exact name match, case-insensitive
    pub fn get_by_name(conn: &Connection, name: &str) -> DbResult<Option<Self>> {
        let sql = format!("{} WHERE i.name = ?1 COLLATE NOCASE ORDER BY i.id LIMIT 1", SELECT_INGREDIENT);
        let mut stmt = conn.prepare(&sql)?;

        let result = stmt.query_row([name.trim()], Self::from_row);
        match result {
            Ok(mut item) => {
                item.tcm = Self::load_tcm(conn, item.id)?;
                Ok(Some(item))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a set of IDs; unknown IDs are silently absent from the result
    pub fn get_many(conn: &Connection, ids: &[i64]) -> DbResult<Vec<Self>> {
        let mut seen = std::collections::HashSet::new();
        let mut items = Vec::new();
        for &id in ids {
            if !seen.insert(id) {
                continue;
            }
            if let Some(item) = Self::get_by_id(conn, id)? {
                items.push(item);
            }
        }
        Ok(items)
    }

    /// Search ingredients by name or display name
    pub fn search(
        conn: &Connection,
        query: &str,
        sort: IngredientSort,
        limit: i64,
    ) -> DbResult<Vec<Self>> {
        let search_pattern = format!("%{}%", query.trim());
        let sql = format!(
            "{} WHERE i.name LIKE ?1 OR i.display_name LIKE ?1 ORDER BY i.name ASC",
            SELECT_INGREDIENT
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut items = stmt
            .query_map([&search_pattern], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        // Umami sorts are descending; ties keep the name order from SQL
        match sort {
            IngredientSort::Name => {}
            IngredientSort::AminoAcids => items.sort_by(|a, b| {
                b.umami_metrics().aa.total_cmp(&a.umami_metrics().aa)
            }),
            IngredientSort::Nucleotides => items.sort_by(|a, b| {
                b.umami_metrics().nuc.total_cmp(&a.umami_metrics().nuc)
            }),
            IngredientSort::Synergy => items.sort_by(|a, b| {
                b.umami_metrics().synergy.total_cmp(&a.umami_metrics().synergy)
            }),
        }

        items.truncate(limit.max(0) as usize);
        for item in &mut items {
            item.tcm = Self::load_tcm(conn, item.id)?;
        }

        Ok(items)
    }

    pub fn count(conn: &Connection) -> DbResult<i64> {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM ingredients", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete an ingredient (chemistry and TCM rows cascade)
    /// Returns Ok(true) if deleted, Ok(false) if not found
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM ingredients WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn kombu() -> IngredientCreate {
        IngredientCreate {
            name: "Kombu".to_string(),
            display_name: Some("Kombu (dried kelp)".to_string()),
            category: Some("Seaweed".to_string()),
            chemistry: Some(Chemistry { glu: 2240.0, asp: 0.0, imp: 0.0, gmp: 0.0, amp: 0.0 }),
            tcm: TcmProfile {
                natures: vec!["Cold".to_string()],
                tastes: vec!["Salty".to_string(), "Salty".to_string()],
                meridians: vec!["Liver".to_string(), "Stomach".to_string(), "Kidney".to_string()],
            },
            notes: None,
        }
    }

    fn shiitake() -> IngredientCreate {
        IngredientCreate {
            name: "Shiitake".to_string(),
            display_name: None,
            category: Some("Mushroom".to_string()),
            chemistry: Some(Chemistry { glu: 71.0, asp: 0.0, imp: 0.0, gmp: 150.0, amp: 0.0 }),
            tcm: TcmProfile::default(),
            notes: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = test_conn();
        let created = Ingredient::create(&conn, &kombu()).unwrap();

        let fetched = Ingredient::get_by_id(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.name, "Kombu");
        assert_eq!(fetched.label(), "Kombu (dried kelp)");
        assert_eq!(fetched.chemistry.unwrap().glu, 2240.0);
        // Duplicate labels collapse on insert
        assert_eq!(fetched.tcm.tastes, vec!["Salty".to_string()]);
        assert_eq!(fetched.tcm.meridians.len(), 3);
    }

    #[test]
    fn test_missing_chemistry_is_none() {
        let conn = test_conn();
        let mut data = shiitake();
        data.chemistry = None;
        let created = Ingredient::create(&conn, &data).unwrap();
        assert!(created.chemistry.is_none());
        assert_eq!(created.umami_metrics().synergy, 0.0);
    }

    #[test]
    fn test_get_by_name_ignores_case() {
        let conn = test_conn();
        let created = Ingredient::create(&conn, &kombu()).unwrap();

        let found = Ingredient::get_by_name(&conn, " KOMBU ").unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.tcm.meridians.len(), 3);
        assert!(Ingredient::get_by_name(&conn, "Komb").unwrap().is_none());
    }

    #[test]
    fn test_get_many_skips_unknown_ids() {
        let conn = test_conn();
        let a = Ingredient::create(&conn, &kombu()).unwrap();
        let b = Ingredient::create(&conn, &shiitake()).unwrap();

        let items = Ingredient::get_many(&conn, &[a.id, 9999, b.id, a.id]).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_search_sorts_by_synergy() {
        let conn = test_conn();
        Ingredient::create(&conn, &kombu()).unwrap();
        Ingredient::create(&conn, &shiitake()).unwrap();

        let by_name = Ingredient::search(&conn, "", IngredientSort::Name, 10).unwrap();
        assert_eq!(by_name[0].name, "Kombu");

        // Shiitake: 71 + 1218 * 71 * 345 / 1000 far exceeds kombu's 2240
        let by_synergy = Ingredient::search(&conn, "", IngredientSort::Synergy, 10).unwrap();
        assert_eq!(by_synergy[0].name, "Shiitake");

        let limited = Ingredient::search(&conn, "kom", IngredientSort::Name, 10).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_delete_cascades() {
        let conn = test_conn();
        let created = Ingredient::create(&conn, &kombu()).unwrap();
        assert!(Ingredient::delete(&conn, created.id).unwrap());
        assert!(!Ingredient::delete(&conn, created.id).unwrap());
        assert_eq!(Ingredient::count(&conn).unwrap(), 0);

        let orphans: i64 = conn
            .query_row("SELECT COUNT(*) FROM ingredient_tcm", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }
}
