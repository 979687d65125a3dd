use super::Database;
use crate::error::Result;
use rusqlite::params;
use tracing::debug;

/// Seed rows: (name, soil_min, season, category, unit_price ₹/quintal,
/// typical_yield quintals/ha, cultivation_cost ₹/ha).
const SEED_CROPS: &[(&str, f64, &str, &str, f64, f64, f64)] = &[
    // Cereals
    ("wheat", 6.0, "winter", "cereals", 2200.0, 45.0, 35000.0),
    ("rice", 7.0, "monsoon", "cereals", 2800.0, 40.0, 45000.0),
    ("corn", 6.0, "monsoon", "cereals", 1800.0, 50.0, 30000.0),
    ("barley", 5.0, "winter", "cereals", 1900.0, 35.0, 28000.0),
    ("millet", 4.0, "monsoon", "cereals", 2500.0, 25.0, 20000.0),
    // Legumes (nitrogen fixers)
    ("soybean", 6.0, "monsoon", "legumes", 4500.0, 20.0, 32000.0),
    ("chickpea", 6.0, "winter", "legumes", 5500.0, 18.0, 28000.0),
    ("lentil", 6.0, "winter", "legumes", 6000.0, 15.0, 25000.0),
    ("groundnut", 5.0, "monsoon", "legumes", 5800.0, 22.0, 35000.0),
    // Vegetables
    ("potato", 6.0, "winter", "vegetables", 1200.0, 250.0, 60000.0),
    ("tomato", 7.0, "all", "vegetables", 1500.0, 300.0, 80000.0),
    ("onion", 6.0, "winter", "vegetables", 1800.0, 200.0, 50000.0),
    ("cabbage", 6.0, "winter", "vegetables", 800.0, 400.0, 45000.0),
    // Cash crops
    ("cotton", 6.0, "monsoon", "cash_crops", 5500.0, 15.0, 50000.0),
    ("sugarcane", 7.0, "all", "cash_crops", 350.0, 800.0, 120000.0),
    // Oilseeds
    ("mustard", 5.0, "winter", "oilseeds", 5200.0, 18.0, 25000.0),
    ("sunflower", 5.0, "winter", "oilseeds", 6000.0, 20.0, 30000.0),
];

/// Create the crops table and seed it. Idempotent: existing rows win, so a
/// hand-edited database is never overwritten.
pub fn run(db: &Database) -> Result<()> {
    db.with_conn(|conn| {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS crops (
                name                TEXT PRIMARY KEY,
                soil_min            REAL NOT NULL,
                season              TEXT NOT NULL,
                category            TEXT NOT NULL,
                unit_price          REAL NOT NULL,
                typical_yield       REAL NOT NULL,
                cultivation_cost    REAL NOT NULL
            );
            "#,
        )?;

        let mut stmt = conn.prepare(
            "INSERT OR IGNORE INTO crops
                (name, soil_min, season, category, unit_price, typical_yield, cultivation_cost)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for (name, soil_min, season, category, price, yield_qty, cost) in SEED_CROPS {
            stmt.execute(params![name, soil_min, season, category, price, yield_qty, cost])?;
        }

        debug!(crops = SEED_CROPS.len(), "crop reference table seeded");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        run(&db).unwrap();
        run(&db).unwrap();

        let count: i64 = db
            .with_conn(|conn| {
                conn.query_row("SELECT COUNT(*) FROM crops", [], |row| row.get(0))
                    .map_err(Into::into)
            })
            .unwrap();
        assert_eq!(count as usize, SEED_CROPS.len());
    }

    #[test]
    fn seed_covers_all_categories() {
        let categories: std::collections::HashSet<&str> =
            SEED_CROPS.iter().map(|c| c.3).collect();
        assert_eq!(categories.len(), 5);
    }
}
