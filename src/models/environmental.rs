use serde::{Deserialize, Serialize};

/// Field conditions at assessment time. Transient, per-call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnvironmentalReading {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub soil_moisture_pct: f64,
    pub days_since_rain: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthStage {
    Germination,
    Vegetative,
    Flowering,
    GrainFilling,
    Maturity,
}

impl GrowthStage {
    /// Water-demand multiplier relative to peak crop water need.
    pub fn water_multiplier(&self) -> f64 {
        match self {
            GrowthStage::Germination => 0.3,
            GrowthStage::Vegetative => 0.7,
            GrowthStage::Flowering => 1.2,
            GrowthStage::GrainFilling => 1.0,
            GrowthStage::Maturity => 0.4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Germination => "Germination",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::GrainFilling => "Grain Filling",
            GrowthStage::Maturity => "Maturity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "germination" => Some(GrowthStage::Germination),
            "vegetative" => Some(GrowthStage::Vegetative),
            "flowering" => Some(GrowthStage::Flowering),
            "grainfilling" | "grain_filling" | "grain filling" => Some(GrowthStage::GrainFilling),
            "maturity" => Some(GrowthStage::Maturity),
            _ => None,
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilTexture {
    Sandy,
    Loamy,
    Clay,
    Organic,
}

impl SoilTexture {
    /// Water holding capacity, mm of water per cm of soil depth.
    pub fn water_capacity(&self) -> f64 {
        match self {
            SoilTexture::Sandy => 1.0,
            SoilTexture::Loamy => 1.5,
            SoilTexture::Clay => 2.0,
            SoilTexture::Organic => 2.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilTexture::Sandy => "Sandy",
            SoilTexture::Loamy => "Loamy",
            SoilTexture::Clay => "Clay",
            SoilTexture::Organic => "Organic",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sandy" | "sand" => Some(SoilTexture::Sandy),
            "loamy" | "loam" => Some(SoilTexture::Loamy),
            "clay" => Some(SoilTexture::Clay),
            "organic" => Some(SoilTexture::Organic),
            _ => None,
        }
    }
}

impl std::fmt::Display for SoilTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current conditions as reported by the weather provider (or the simulated
/// fallback when no provider is configured).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_stage_multipliers_peak_at_flowering() {
        assert!(GrowthStage::Flowering.water_multiplier() > GrowthStage::GrainFilling.water_multiplier());
        assert!(GrowthStage::Germination.water_multiplier() < GrowthStage::Maturity.water_multiplier());
        assert!((GrowthStage::Flowering.water_multiplier() - 1.2).abs() < f64::EPSILON);
    }

    #[test]
    fn growth_stage_from_str() {
        assert_eq!(GrowthStage::from_str("flowering"), Some(GrowthStage::Flowering));
        assert_eq!(
            GrowthStage::from_str("grain_filling"),
            Some(GrowthStage::GrainFilling)
        );
        assert_eq!(
            GrowthStage::from_str("Grain Filling"),
            Some(GrowthStage::GrainFilling)
        );
        assert_eq!(GrowthStage::from_str("ripening"), None);
    }

    #[test]
    fn soil_texture_capacity_increases_with_fineness() {
        assert!(SoilTexture::Sandy.water_capacity() < SoilTexture::Loamy.water_capacity());
        assert!(SoilTexture::Loamy.water_capacity() < SoilTexture::Clay.water_capacity());
        assert!(SoilTexture::Clay.water_capacity() < SoilTexture::Organic.water_capacity());
    }

    #[test]
    fn soil_texture_from_str() {
        assert_eq!(SoilTexture::from_str("loam"), Some(SoilTexture::Loamy));
        assert_eq!(SoilTexture::from_str("CLAY"), Some(SoilTexture::Clay));
        assert_eq!(SoilTexture::from_str("silt"), None);
    }
}
