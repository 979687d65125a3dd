use super::crop::CropCategory;
use serde::Serialize;

/// One ranked candidate for the next planting.
#[derive(Debug, Clone, Serialize)]
pub struct RotationSuggestion {
    pub crop: String,
    pub category: CropCategory,
    /// benefit_score × 2 + soil_match.
    pub suitability_score: f64,
    pub rotation_benefit: &'static str,
    pub soil_requirement: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RotationPlanEntry {
    pub year: u32,
    pub season_label: &'static str,
    pub crop: String,
    pub purpose: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RotationAdvice {
    pub current_crop: String,
    pub current_category: Option<CropCategory>,
    pub season: super::crop::Season,
    pub soil_quality: f64,
    pub suggestions: Vec<RotationSuggestion>,
    pub rotation_plan: Vec<RotationPlanEntry>,
}

/// Sustainability breakdown for a multi-year rotation sequence.
#[derive(Debug, Clone, Serialize)]
pub struct RotationAnalysis {
    pub diversity_score: f64,
    pub nitrogen_benefit_score: f64,
    pub pest_control_score: f64,
    pub overall_sustainability: f64,
    pub has_nitrogen_fixers: bool,
    pub recommendations: Vec<String>,
}
