use crate::models::{SoilAssessment, SoilGrade, SoilParameter, SoilSample};
use std::collections::BTreeMap;

const OPTIMAL_PH: f64 = 6.5;
const OPTIMAL_NITROGEN: f64 = 50.0; // mg/kg
const OPTIMAL_PHOSPHORUS: f64 = 40.0; // mg/kg
const OPTIMAL_POTASSIUM: f64 = 300.0; // mg/kg
const OPTIMAL_ORGANIC_MATTER: f64 = 5.0; // percent

/// Parameter weights by agricultural importance. Must sum to 1.0.
const WEIGHT_PH: f64 = 0.20;
const WEIGHT_NITROGEN: f64 = 0.25;
const WEIGHT_PHOSPHORUS: f64 = 0.25;
const WEIGHT_POTASSIUM: f64 = 0.20;
const WEIGHT_ORGANIC_MATTER: f64 = 0.10;

/// Multi-parameter weighted scoring of soil health.
///
/// Every sub-score is bounded to [0, 10] and inputs are clamped, never
/// rejected, so `score` is total over all inputs.
#[derive(Debug, Default)]
pub struct SoilQualityModel;

impl SoilQualityModel {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, sample: &SoilSample) -> SoilAssessment {
        let sample = sample.clamped();

        let ph_score = (10.0 * (1.0 - (OPTIMAL_PH - sample.ph).abs() / 3.5)).max(0.0);
        let nitrogen_score = (sample.nitrogen_mg_kg / OPTIMAL_NITROGEN * 10.0).min(10.0);
        let phosphorus_score = (sample.phosphorus_mg_kg / OPTIMAL_PHOSPHORUS * 10.0).min(10.0);
        let potassium_score = (sample.potassium_mg_kg / OPTIMAL_POTASSIUM * 10.0).min(10.0);
        let organic_matter_score =
            (sample.organic_matter_pct / OPTIMAL_ORGANIC_MATTER * 10.0).min(10.0);

        let overall_score = ph_score * WEIGHT_PH
            + nitrogen_score * WEIGHT_NITROGEN
            + phosphorus_score * WEIGHT_PHOSPHORUS
            + potassium_score * WEIGHT_POTASSIUM
            + organic_matter_score * WEIGHT_ORGANIC_MATTER;

        let mut parameter_scores = BTreeMap::new();
        parameter_scores.insert(SoilParameter::Ph, ph_score);
        parameter_scores.insert(SoilParameter::Nitrogen, nitrogen_score);
        parameter_scores.insert(SoilParameter::Phosphorus, phosphorus_score);
        parameter_scores.insert(SoilParameter::Potassium, potassium_score);
        parameter_scores.insert(SoilParameter::OrganicMatter, organic_matter_score);

        SoilAssessment {
            overall_score,
            parameter_scores,
            grade: SoilGrade::from_score(overall_score),
            recommendations: self.recommendations(&sample),
            suitable_crops: self.suitable_crops(overall_score),
        }
    }

    /// Each parameter contributes its recommendation independently; the
    /// triggers are fixed safe-band checks, not first-match-wins.
    fn recommendations(&self, sample: &SoilSample) -> Vec<String> {
        let mut recommendations = Vec::new();

        if sample.ph < 6.0 {
            recommendations.push("Add lime to increase soil pH (acidic soil)".to_string());
        } else if sample.ph > 7.5 {
            recommendations
                .push("Add sulfur or organic matter to decrease pH (alkaline soil)".to_string());
        }

        if sample.nitrogen_mg_kg < 30.0 {
            recommendations
                .push("Apply nitrogen-rich fertilizer (urea, ammonium sulfate)".to_string());
        } else if sample.nitrogen_mg_kg > 80.0 {
            recommendations.push("Reduce nitrogen fertilizer to prevent nutrient burn".to_string());
        }

        if sample.phosphorus_mg_kg < 25.0 {
            recommendations.push("Add phosphorus fertilizer (DAP, SSP)".to_string());
        }

        if sample.potassium_mg_kg < 200.0 {
            recommendations.push("Apply potassium fertilizer (muriate of potash)".to_string());
        }

        if sample.organic_matter_pct < 3.0 {
            recommendations.push(
                "Increase organic matter with compost, manure, or cover crops".to_string(),
            );
        }

        if recommendations.is_empty() {
            recommendations
                .push("Soil quality is optimal - maintain current practices".to_string());
        }

        recommendations
    }

    /// Tiered crop suggestions by overall score.
    fn suitable_crops(&self, score: f64) -> Vec<String> {
        let crops: &[&str] = if score >= 8.0 {
            &["rice", "wheat", "corn", "tomato", "cotton", "sugarcane"]
        } else if score >= 6.5 {
            &["wheat", "corn", "soybean", "potato", "onion", "cabbage"]
        } else if score >= 5.0 {
            &["millet", "sorghum", "groundnut", "sunflower", "mustard"]
        } else if score >= 3.5 {
            &["barley", "oats", "castor", "safflower"]
        } else {
            return vec!["Hardy crops only - improve soil first".to_string()];
        };
        crops.iter().map(|c| c.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> SoilQualityModel {
        SoilQualityModel::new()
    }

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_PH
            + WEIGHT_NITROGEN
            + WEIGHT_PHOSPHORUS
            + WEIGHT_POTASSIUM
            + WEIGHT_ORGANIC_MATTER;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn overall_score_is_weighted_sum_of_parameter_scores() {
        let assessment = model().score(&SoilSample::new(6.8, 45.0, 35.0, 280.0, 4.2));

        let weighted = assessment.parameter_scores[&SoilParameter::Ph] * WEIGHT_PH
            + assessment.parameter_scores[&SoilParameter::Nitrogen] * WEIGHT_NITROGEN
            + assessment.parameter_scores[&SoilParameter::Phosphorus] * WEIGHT_PHOSPHORUS
            + assessment.parameter_scores[&SoilParameter::Potassium] * WEIGHT_POTASSIUM
            + assessment.parameter_scores[&SoilParameter::OrganicMatter] * WEIGHT_ORGANIC_MATTER;

        assert!((assessment.overall_score - weighted).abs() < 1e-9);
    }

    #[test]
    fn reference_sample_scores_excellent() {
        // ph 6.8 -> 10*(1-0.3/3.5) ~= 9.143; n 45/50 -> 9.0; p 35/40 -> 8.75;
        // k 280/300 -> 9.333; om 4.2/5 -> 8.4; weighted ~= 8.98.
        let assessment = model().score(&SoilSample::new(6.8, 45.0, 35.0, 280.0, 4.2));
        assert!((assessment.overall_score - 8.98).abs() < 0.01);
        assert_eq!(assessment.grade, SoilGrade::Excellent);

        let scores = &assessment.parameter_scores;
        assert!((scores[&SoilParameter::Ph] - 9.142857).abs() < 1e-4);
        assert!((scores[&SoilParameter::Nitrogen] - 9.0).abs() < 1e-9);
        assert!((scores[&SoilParameter::Phosphorus] - 8.75).abs() < 1e-9);
        assert!((scores[&SoilParameter::Potassium] - 9.333333).abs() < 1e-4);
        assert!((scores[&SoilParameter::OrganicMatter] - 8.4).abs() < 1e-9);
    }

    #[test]
    fn score_bounded_for_extreme_inputs() {
        let zero = model().score(&SoilSample::new(3.0, 0.0, 0.0, 0.0, 0.0));
        assert!(zero.overall_score >= 0.0);
        assert_eq!(zero.grade, SoilGrade::VeryPoor);

        let max = model().score(&SoilSample::new(6.5, 500.0, 400.0, 3000.0, 50.0));
        assert!(max.overall_score <= 10.0);
        assert!((max.overall_score - 10.0).abs() < 1e-9);
        assert_eq!(max.grade, SoilGrade::Excellent);
    }

    #[test]
    fn negative_inputs_are_clamped_not_rejected() {
        let assessment = model().score(&SoilSample::new(-2.0, -10.0, -10.0, -10.0, -10.0));
        assert!(assessment.overall_score >= 0.0);
        for score in assessment.parameter_scores.values() {
            assert!(*score >= 0.0 && *score <= 10.0);
        }
    }

    #[test]
    fn ph_score_symmetric_around_optimum() {
        let low = model().score(&SoilSample::new(5.5, 50.0, 40.0, 300.0, 5.0));
        let high = model().score(&SoilSample::new(7.5, 50.0, 40.0, 300.0, 5.0));
        assert!(
            (low.parameter_scores[&SoilParameter::Ph] - high.parameter_scores[&SoilParameter::Ph])
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn deficient_parameters_each_trigger_a_recommendation() {
        let assessment = model().score(&SoilSample::new(5.2, 20.0, 15.0, 150.0, 2.0));
        let text = assessment.recommendations.join("\n");
        assert!(text.contains("lime"));
        assert!(text.contains("nitrogen-rich"));
        assert!(text.contains("phosphorus"));
        assert!(text.contains("potassium"));
        assert!(text.contains("organic matter"));
        assert_eq!(assessment.recommendations.len(), 5);
    }

    #[test]
    fn optimal_sample_gets_maintain_message() {
        let assessment = model().score(&SoilSample::new(6.5, 50.0, 40.0, 300.0, 5.0));
        assert_eq!(assessment.recommendations.len(), 1);
        assert!(assessment.recommendations[0].contains("maintain current practices"));
    }

    #[test]
    fn excess_nitrogen_triggers_reduction_advice() {
        let assessment = model().score(&SoilSample::new(6.5, 95.0, 40.0, 300.0, 5.0));
        assert!(assessment
            .recommendations
            .iter()
            .any(|r| r.contains("Reduce nitrogen")));
    }

    #[test]
    fn suitable_crops_tiers() {
        let excellent = model().score(&SoilSample::new(6.5, 50.0, 40.0, 300.0, 5.0));
        assert!(excellent.suitable_crops.contains(&"sugarcane".to_string()));

        let poor = model().score(&SoilSample::new(4.0, 5.0, 5.0, 30.0, 0.5));
        assert_eq!(
            poor.suitable_crops,
            vec!["Hardy crops only - improve soil first".to_string()]
        );
    }
}
