use serde::{Deserialize, Serialize};

/// Environmental and management inputs to the yield estimator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GrowingConditions {
    /// Soil quality score, 0-10.
    pub soil_quality: f64,
    /// Annual rainfall, mm.
    pub rainfall_mm: f64,
    /// Average temperature, °C.
    pub temperature_c: f64,
    /// Average relative humidity, %.
    pub humidity_pct: f64,
    /// Nitrogen fertilizer, kg/ha.
    pub nitrogen_kg_ha: f64,
    /// Phosphorus fertilizer, kg/ha.
    pub phosphorus_kg_ha: f64,
    /// Potassium fertilizer, kg/ha.
    pub potassium_kg_ha: f64,
}

impl Default for GrowingConditions {
    fn default() -> Self {
        Self {
            soil_quality: 7.0,
            rainfall_mm: 600.0,
            temperature_c: 25.0,
            humidity_pct: 65.0,
            nitrogen_kg_ha: 100.0,
            phosphorus_kg_ha: 50.0,
            potassium_kg_ha: 70.0,
        }
    }
}

/// Multiplicative impact factors, each roughly in [0.3, 1.3].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YieldFactors {
    pub soil_factor: f64,
    pub weather_factor: f64,
    pub fertilizer_factor: f64,
}

impl YieldFactors {
    pub fn mean(&self) -> f64 {
        (self.soil_factor + self.weather_factor + self.fertilizer_factor) / 3.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "High",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::Low => "Low",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Risk only escalates, never downgrades.
    pub fn escalate(&mut self, to: RiskLevel) {
        if to > *self {
            *self = to;
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub risk: String,
    pub mitigation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPrediction {
    pub crop: String,
    /// Tons per hectare after all factors and jitter.
    pub yield_per_hectare: f64,
    pub total_production: f64,
    pub area_hectares: f64,
    pub factors: YieldFactors,
    pub conditions: GrowingConditions,
    pub confidence_level: ConfidenceLevel,
    pub risk_assessment: RiskAssessment,
    pub optimization_suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_escalates_only_upward() {
        let mut level = RiskLevel::Low;
        level.escalate(RiskLevel::Medium);
        assert_eq!(level, RiskLevel::Medium);
        level.escalate(RiskLevel::Low);
        assert_eq!(level, RiskLevel::Medium);
        level.escalate(RiskLevel::High);
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn factor_mean() {
        let factors = YieldFactors {
            soil_factor: 0.9,
            weather_factor: 1.0,
            fertilizer_factor: 0.8,
        };
        assert!((factors.mean() - 0.9).abs() < 1e-9);
    }
}
