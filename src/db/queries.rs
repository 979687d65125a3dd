use super::Database;
use crate::models::{CropCategory, CropProfile, CropTable, Season};
use crate::error::Result;
use rusqlite::Row;
use tracing::warn;

impl Database {
    /// Load the whole crops table into an immutable in-memory view. Called
    /// once at startup; the result is shared read-only for process lifetime.
    pub fn load_crop_table(&self) -> Result<CropTable> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name, soil_min, season, category, unit_price, typical_yield, cultivation_cost
                 FROM crops ORDER BY name",
            )?;

            let rows = stmt.query_map([], row_to_crop_profile)?;

            let mut crops = Vec::new();
            for row in rows {
                match row {
                    Ok(Some(profile)) => crops.push(profile),
                    Ok(None) => {} // unknown season/category, already warned
                    Err(e) => return Err(e.into()),
                }
            }

            Ok(CropTable::new(crops))
        })
    }
}

fn row_to_crop_profile(row: &Row) -> rusqlite::Result<Option<CropProfile>> {
    let name: String = row.get("name")?;
    let season_str: String = row.get("season")?;
    let category_str: String = row.get("category")?;

    let Some(season) = Season::from_str(&season_str) else {
        warn!(crop = %name, season = %season_str, "Unknown season in crops table, skipping row");
        return Ok(None);
    };
    let Some(category) = CropCategory::from_str(&category_str) else {
        warn!(crop = %name, category = %category_str, "Unknown category in crops table, skipping row");
        return Ok(None);
    };

    Ok(Some(CropProfile {
        name,
        soil_min: row.get("soil_min")?,
        season,
        category,
        unit_price: row.get("unit_price")?,
        typical_yield: row.get("typical_yield")?,
        cultivation_cost: row.get("cultivation_cost")?,
    }))
}
