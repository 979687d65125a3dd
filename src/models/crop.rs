use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropCategory {
    Cereals,
    Legumes,
    Vegetables,
    CashCrops,
    Oilseeds,
}

impl CropCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Cereals => "cereals",
            CropCategory::Legumes => "legumes",
            CropCategory::Vegetables => "vegetables",
            CropCategory::CashCrops => "cash_crops",
            CropCategory::Oilseeds => "oilseeds",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cereals" | "cereal" => Some(CropCategory::Cereals),
            "legumes" | "legume" | "pulses" => Some(CropCategory::Legumes),
            "vegetables" | "vegetable" => Some(CropCategory::Vegetables),
            "cash_crops" | "cash crops" | "cash" => Some(CropCategory::CashCrops),
            "oilseeds" | "oilseed" => Some(CropCategory::Oilseeds),
            _ => None,
        }
    }

    /// Market volatility constant used by the price forecaster.
    pub fn volatility(&self) -> f64 {
        match self {
            CropCategory::Vegetables => 0.15,
            CropCategory::Cereals => 0.08,
            CropCategory::Legumes => 0.12,
            CropCategory::CashCrops => 0.10,
            CropCategory::Oilseeds => 0.10,
        }
    }
}

impl std::fmt::Display for CropCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Monsoon,
    Summer,
    All,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Monsoon => "monsoon",
            Season::Summer => "summer",
            Season::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "winter" | "rabi" => Some(Season::Winter),
            "monsoon" | "kharif" => Some(Season::Monsoon),
            "summer" | "zaid" => Some(Season::Summer),
            "all" | "any" => Some(Season::All),
            _ => None,
        }
    }

    /// A crop planted in `self` fits a requested planting season if the
    /// seasons match exactly or the crop grows year-round.
    pub fn fits(&self, requested: Season) -> bool {
        *self == Season::All || *self == requested
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Static reference record for one crop. Seeded once at startup from the
/// crops table and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropProfile {
    pub name: String,
    /// Minimum soil quality score (0-10) the crop tolerates.
    pub soil_min: f64,
    pub season: Season,
    pub category: CropCategory,
    /// Current market price, ₹/quintal.
    pub unit_price: f64,
    /// Typical yield, quintals/hectare.
    pub typical_yield: f64,
    /// Cultivation cost, ₹/hectare.
    pub cultivation_cost: f64,
}

/// Immutable in-memory view of the seeded crop reference table.
#[derive(Debug, Clone)]
pub struct CropTable {
    crops: Vec<CropProfile>,
}

impl CropTable {
    pub fn new(mut crops: Vec<CropProfile>) -> Self {
        crops.sort_by(|a, b| a.name.cmp(&b.name));
        Self { crops }
    }

    pub fn get(&self, name: &str) -> Option<&CropProfile> {
        let name = name.to_lowercase();
        self.crops.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CropProfile> {
        self.crops.iter()
    }

    pub fn by_season(&self, season: Season) -> Vec<&CropProfile> {
        self.crops
            .iter()
            .filter(|c| c.season.fits(season))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(name: &str, season: Season, category: CropCategory) -> CropProfile {
        CropProfile {
            name: name.into(),
            soil_min: 6.0,
            season,
            category,
            unit_price: 2200.0,
            typical_yield: 45.0,
            cultivation_cost: 35000.0,
        }
    }

    #[test]
    fn season_fits_exact_and_all() {
        assert!(Season::Winter.fits(Season::Winter));
        assert!(Season::All.fits(Season::Winter));
        assert!(Season::All.fits(Season::Summer));
        assert!(!Season::Winter.fits(Season::Monsoon));
        assert!(!Season::Monsoon.fits(Season::Summer));
    }

    #[test]
    fn season_from_str_aliases() {
        assert_eq!(Season::from_str("rabi"), Some(Season::Winter));
        assert_eq!(Season::from_str("kharif"), Some(Season::Monsoon));
        assert_eq!(Season::from_str("Winter"), Some(Season::Winter));
        assert_eq!(Season::from_str("spring"), None);
    }

    #[test]
    fn category_from_str() {
        assert_eq!(CropCategory::from_str("cereals"), Some(CropCategory::Cereals));
        assert_eq!(
            CropCategory::from_str("cash_crops"),
            Some(CropCategory::CashCrops)
        );
        assert_eq!(CropCategory::from_str("pulses"), Some(CropCategory::Legumes));
        assert_eq!(CropCategory::from_str("fruit"), None);
    }

    #[test]
    fn category_volatility_ordering() {
        // Vegetables are the most volatile market, cereals the least.
        assert!(CropCategory::Vegetables.volatility() > CropCategory::CashCrops.volatility());
        assert!(CropCategory::Cereals.volatility() < CropCategory::Legumes.volatility());
    }

    #[test]
    fn crop_table_lookup_case_insensitive() {
        let table = CropTable::new(vec![
            profile("wheat", Season::Winter, CropCategory::Cereals),
            profile("tomato", Season::All, CropCategory::Vegetables),
        ]);
        assert!(table.get("wheat").is_some());
        assert!(table.get("Wheat").is_some());
        assert!(table.get("quinoa").is_none());
    }

    #[test]
    fn crop_table_by_season_includes_all_season_crops() {
        let table = CropTable::new(vec![
            profile("wheat", Season::Winter, CropCategory::Cereals),
            profile("rice", Season::Monsoon, CropCategory::Cereals),
            profile("tomato", Season::All, CropCategory::Vegetables),
        ]);
        let winter: Vec<&str> = table
            .by_season(Season::Winter)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert!(winter.contains(&"wheat"));
        assert!(winter.contains(&"tomato"));
        assert!(!winter.contains(&"rice"));
    }
}
