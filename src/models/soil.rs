use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One soil chemistry reading. Produced fresh per assessment call.
///
/// Out-of-range values are clamped rather than rejected so the scorer stays
/// total over all inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SoilSample {
    pub ph: f64,
    pub nitrogen_mg_kg: f64,
    pub phosphorus_mg_kg: f64,
    pub potassium_mg_kg: f64,
    pub organic_matter_pct: f64,
}

impl SoilSample {
    pub fn new(
        ph: f64,
        nitrogen_mg_kg: f64,
        phosphorus_mg_kg: f64,
        potassium_mg_kg: f64,
        organic_matter_pct: f64,
    ) -> Self {
        Self {
            ph,
            nitrogen_mg_kg,
            phosphorus_mg_kg,
            potassium_mg_kg,
            organic_matter_pct,
        }
    }

    /// Clamp readings into their plausible physical ranges.
    pub fn clamped(&self) -> Self {
        Self {
            ph: self.ph.clamp(3.0, 10.0),
            nitrogen_mg_kg: self.nitrogen_mg_kg.max(0.0),
            phosphorus_mg_kg: self.phosphorus_mg_kg.max(0.0),
            potassium_mg_kg: self.potassium_mg_kg.max(0.0),
            organic_matter_pct: self.organic_matter_pct.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilParameter {
    Ph,
    Nitrogen,
    Phosphorus,
    Potassium,
    OrganicMatter,
}

impl SoilParameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoilParameter::Ph => "pH",
            SoilParameter::Nitrogen => "Nitrogen",
            SoilParameter::Phosphorus => "Phosphorus",
            SoilParameter::Potassium => "Potassium",
            SoilParameter::OrganicMatter => "Organic Matter",
        }
    }
}

impl std::fmt::Display for SoilParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoilGrade {
    Excellent,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl SoilGrade {
    /// Grade thresholds are inclusive lower bounds.
    pub fn from_score(score: f64) -> Self {
        if score >= 8.5 {
            SoilGrade::Excellent
        } else if score >= 7.0 {
            SoilGrade::Good
        } else if score >= 5.5 {
            SoilGrade::Fair
        } else if score >= 4.0 {
            SoilGrade::Poor
        } else {
            SoilGrade::VeryPoor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilGrade::Excellent => "Excellent",
            SoilGrade::Good => "Good",
            SoilGrade::Fair => "Fair",
            SoilGrade::Poor => "Poor",
            SoilGrade::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for SoilGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoilAssessment {
    pub overall_score: f64,
    pub parameter_scores: BTreeMap<SoilParameter, f64>,
    pub grade: SoilGrade,
    pub recommendations: Vec<String>,
    pub suitable_crops: Vec<String>,
}
