use crate::error::{FarmOpsError, Result};
use crate::models::{
    ConfidenceLevel, GrowingConditions, RiskAssessment, RiskFactor, RiskLevel, YieldFactors,
    YieldPrediction,
};
use rand::Rng;

const OPTIMAL_SOIL_QUALITY: f64 = 8.0;
const OPTIMAL_NITROGEN: f64 = 120.0; // kg/ha
const OPTIMAL_PHOSPHORUS: f64 = 60.0; // kg/ha
const OPTIMAL_POTASSIUM: f64 = 80.0; // kg/ha

/// Temperature (°C) and rainfall (mm/year) bands a crop tolerates without
/// yield penalty.
#[derive(Debug, Clone, Copy)]
struct CropRequirements {
    temp_min: f64,
    temp_max: f64,
    rainfall_min: f64,
    rainfall_max: f64,
}

const DEFAULT_REQUIREMENTS: CropRequirements = CropRequirements {
    temp_min: 15.0,
    temp_max: 30.0,
    rainfall_min: 400.0,
    rainfall_max: 1000.0,
};

/// Multi-factor yield estimator: base yield scaled by soil, weather and
/// fertilizer factors, with bounded random variability on top.
#[derive(Debug, Default)]
pub struct YieldModel;

impl YieldModel {
    pub fn new() -> Self {
        Self
    }

    /// Reference yield under ideal conditions, tons/hectare.
    fn base_yield(crop: &str) -> Option<f64> {
        let yield_t_ha = match crop {
            "wheat" => 4.5,
            "rice" => 3.8,
            "corn" => 5.2,
            "barley" => 3.5,
            "millet" => 2.8,
            "soybean" => 2.5,
            "chickpea" => 1.8,
            "lentil" => 1.5,
            "groundnut" => 2.2,
            "potato" => 25.0,
            "tomato" => 30.0,
            "onion" => 20.0,
            "cabbage" => 40.0,
            "cotton" => 1.5,
            "sugarcane" => 80.0,
            "mustard" => 1.8,
            "sunflower" => 2.0,
            _ => return None,
        };
        Some(yield_t_ha)
    }

    fn requirements(crop: &str) -> CropRequirements {
        match crop {
            "wheat" => CropRequirements {
                temp_min: 15.0,
                temp_max: 25.0,
                rainfall_min: 300.0,
                rainfall_max: 800.0,
            },
            "rice" => CropRequirements {
                temp_min: 20.0,
                temp_max: 35.0,
                rainfall_min: 1000.0,
                rainfall_max: 2000.0,
            },
            "corn" => CropRequirements {
                temp_min: 18.0,
                temp_max: 30.0,
                rainfall_min: 500.0,
                rainfall_max: 1200.0,
            },
            "cotton" => CropRequirements {
                temp_min: 20.0,
                temp_max: 35.0,
                rainfall_min: 500.0,
                rainfall_max: 1000.0,
            },
            "potato" => CropRequirements {
                temp_min: 15.0,
                temp_max: 25.0,
                rainfall_min: 400.0,
                rainfall_max: 700.0,
            },
            _ => DEFAULT_REQUIREMENTS,
        }
    }

    /// Predict yield for a crop. The one explicit error in the system: a
    /// crop absent from the base-yield table is `UnsupportedCrop`.
    pub fn predict(
        &self,
        crop: &str,
        conditions: &GrowingConditions,
        area_hectares: f64,
        rng: &mut impl Rng,
    ) -> Result<YieldPrediction> {
        let crop = crop.to_lowercase();
        let base_yield = Self::base_yield(&crop)
            .ok_or_else(|| FarmOpsError::UnsupportedCrop(crop.clone()))?;

        let factors = YieldFactors {
            soil_factor: Self::soil_factor(conditions.soil_quality),
            weather_factor: Self::weather_factor(&crop, conditions),
            fertilizer_factor: Self::fertilizer_factor(conditions),
        };

        let variability = rng.gen_range(0.9..=1.1);
        let yield_per_hectare = base_yield
            * factors.soil_factor
            * factors.weather_factor
            * factors.fertilizer_factor
            * variability;

        Ok(YieldPrediction {
            crop: crop.clone(),
            yield_per_hectare,
            total_production: yield_per_hectare * area_hectares,
            area_hectares,
            factors,
            conditions: *conditions,
            confidence_level: Self::confidence(&factors),
            risk_assessment: Self::assess_risks(&crop, conditions),
            optimization_suggestions: Self::optimization_suggestions(conditions),
        })
    }

    /// Piecewise-linear soil response, continuous across segment joins.
    fn soil_factor(soil_quality: f64) -> f64 {
        if soil_quality >= OPTIMAL_SOIL_QUALITY {
            1.0
        } else if soil_quality >= 6.0 {
            0.8 + (soil_quality - 6.0) * 0.1
        } else if soil_quality >= 4.0 {
            0.6 + (soil_quality - 4.0) * 0.1
        } else {
            0.4 + soil_quality * 0.05
        }
    }

    fn weather_factor(crop: &str, conditions: &GrowingConditions) -> f64 {
        let req = Self::requirements(crop);
        let temp = conditions.temperature_c;
        let rain = conditions.rainfall_mm;
        let humidity = conditions.humidity_pct;

        let temp_factor = if (req.temp_min..=req.temp_max).contains(&temp) {
            1.0
        } else {
            let deviation = (temp - req.temp_min).abs().min((temp - req.temp_max).abs());
            (1.0 - deviation * 0.05).max(0.3)
        };

        let rain_factor = if (req.rainfall_min..=req.rainfall_max).contains(&rain) {
            1.0
        } else if rain < req.rainfall_min {
            (rain / req.rainfall_min).max(0.4)
        } else {
            let excess = rain - req.rainfall_max;
            (1.0 - excess / req.rainfall_max * 0.3).max(0.5)
        };

        let humidity_factor = if (60.0..=70.0).contains(&humidity) {
            1.0
        } else {
            (1.0 - (humidity - 65.0).abs() * 0.01).max(0.7)
        };

        temp_factor * rain_factor * humidity_factor
    }

    /// Nitrogen dominates (60%); P and K only ever reward, never penalize.
    fn fertilizer_factor(conditions: &GrowingConditions) -> f64 {
        let n = conditions.nitrogen_kg_ha;
        let n_factor = if n <= OPTIMAL_NITROGEN {
            0.7 + (n / OPTIMAL_NITROGEN) * 0.3
        } else {
            let excess = n - OPTIMAL_NITROGEN;
            (1.0 - excess / OPTIMAL_NITROGEN * 0.2).max(0.8)
        };

        let p_factor = (0.8 + (conditions.phosphorus_kg_ha / OPTIMAL_PHOSPHORUS) * 0.2).min(1.0);
        let k_factor = (0.9 + (conditions.potassium_kg_ha / OPTIMAL_POTASSIUM) * 0.1).min(1.0);

        n_factor * 0.6 + p_factor * 0.25 + k_factor * 0.15
    }

    /// Every matching predicate contributes a risk; the level only escalates.
    fn assess_risks(crop: &str, conditions: &GrowingConditions) -> RiskAssessment {
        let req = Self::requirements(crop);
        let mut risk_level = RiskLevel::Low;
        let mut risk_factors = Vec::new();

        if conditions.temperature_c < req.temp_min - 5.0 {
            risk_factors.push(RiskFactor {
                risk: "Cold stress risk - consider frost protection".to_string(),
                mitigation: "Use row covers, plant after last frost date".to_string(),
            });
            risk_level.escalate(RiskLevel::High);
        } else if conditions.temperature_c > req.temp_max + 5.0 {
            risk_factors.push(RiskFactor {
                risk: "Heat stress risk - ensure adequate irrigation".to_string(),
                mitigation: "Provide shade, increase irrigation frequency".to_string(),
            });
            risk_level.escalate(RiskLevel::High);
        }

        if conditions.rainfall_mm < req.rainfall_min * 0.7 {
            risk_factors.push(RiskFactor {
                risk: "Drought risk - plan supplemental irrigation".to_string(),
                mitigation: "Install drip irrigation, use mulching".to_string(),
            });
            risk_level.escalate(RiskLevel::High);
        } else if conditions.rainfall_mm > req.rainfall_max * 1.3 {
            risk_factors.push(RiskFactor {
                risk: "Waterlogging risk - ensure proper drainage".to_string(),
                mitigation: "Improve drainage, use raised beds".to_string(),
            });
            risk_level.escalate(RiskLevel::Medium);
        }

        if conditions.soil_quality < 5.0 {
            risk_factors.push(RiskFactor {
                risk: "Poor soil quality - consider soil improvement".to_string(),
                mitigation: "Add organic matter, balance nutrients".to_string(),
            });
            risk_level.escalate(RiskLevel::Medium);
        }

        if risk_factors.is_empty() {
            risk_factors.push(RiskFactor {
                risk: "Favorable conditions - low production risk".to_string(),
                mitigation: "Maintain current practices".to_string(),
            });
        }

        RiskAssessment {
            risk_level,
            risk_factors,
        }
    }

    fn optimization_suggestions(conditions: &GrowingConditions) -> Vec<String> {
        let mut suggestions = Vec::new();

        if conditions.soil_quality < 7.0 {
            suggestions.push(format!(
                "Improve soil quality from {:.1} to 7+ for better yields",
                conditions.soil_quality
            ));
        }

        if conditions.nitrogen_kg_ha < 100.0 {
            suggestions
                .push("Increase nitrogen fertilizer for better vegetative growth".to_string());
        } else if conditions.nitrogen_kg_ha > 150.0 {
            suggestions.push("Reduce nitrogen to prevent lodging and disease".to_string());
        }

        if conditions.phosphorus_kg_ha < 40.0 {
            suggestions.push("Add phosphorus fertilizer for root development".to_string());
        }

        if conditions.potassium_kg_ha < 60.0 {
            suggestions.push("Apply potassium for disease resistance and quality".to_string());
        }

        if suggestions.is_empty() {
            suggestions.push("Current management practices are optimal".to_string());
        }

        suggestions
    }

    fn confidence(factors: &YieldFactors) -> ConfidenceLevel {
        let mean = factors.mean();
        if mean >= 0.9 {
            ConfidenceLevel::High
        } else if mean >= 0.7 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn conditions() -> GrowingConditions {
        GrowingConditions::default()
    }

    #[test]
    fn unsupported_crop_is_an_error() {
        let result = YieldModel::new().predict("dragonfruit", &conditions(), 1.0, &mut rng());
        assert!(matches!(result, Err(FarmOpsError::UnsupportedCrop(c)) if c == "dragonfruit"));
    }

    #[test]
    fn crop_names_are_case_insensitive() {
        let prediction = YieldModel::new()
            .predict("Wheat", &conditions(), 1.0, &mut rng())
            .unwrap();
        assert_eq!(prediction.crop, "wheat");
    }

    #[test]
    fn soil_factor_is_continuous_at_segment_joins() {
        assert!((YieldModel::soil_factor(8.0) - 1.0).abs() < 1e-9);
        assert!((YieldModel::soil_factor(6.0) - 0.8).abs() < 1e-9);
        assert!((YieldModel::soil_factor(5.999999) - 0.8).abs() < 1e-5);
        assert!((YieldModel::soil_factor(4.0) - 0.6).abs() < 1e-9);
        assert!((YieldModel::soil_factor(3.999999) - 0.6).abs() < 1e-5);
        assert!((YieldModel::soil_factor(0.0) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn weather_factor_is_one_inside_all_bands() {
        let c = GrowingConditions {
            temperature_c: 20.0,
            rainfall_mm: 500.0,
            humidity_pct: 65.0,
            ..conditions()
        };
        assert!((YieldModel::weather_factor("wheat", &c) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn weather_penalties_are_floored() {
        let freezing = GrowingConditions {
            temperature_c: -40.0,
            rainfall_mm: 0.0,
            humidity_pct: 100.0,
            ..conditions()
        };
        // 0.3 * 0.4 * 0.7 at the floors
        let factor = YieldModel::weather_factor("wheat", &freezing);
        assert!((factor - 0.3 * 0.4 * 0.7).abs() < 1e-9);
    }

    #[test]
    fn fertilizer_factor_at_optimum_is_one() {
        let c = GrowingConditions {
            nitrogen_kg_ha: 120.0,
            phosphorus_kg_ha: 60.0,
            potassium_kg_ha: 80.0,
            ..conditions()
        };
        assert!((YieldModel::fertilizer_factor(&c) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn excess_nitrogen_penalized_with_floor() {
        let c = GrowingConditions {
            nitrogen_kg_ha: 1000.0,
            phosphorus_kg_ha: 60.0,
            potassium_kg_ha: 80.0,
            ..conditions()
        };
        // n_factor floored at 0.8
        assert!((YieldModel::fertilizer_factor(&c) - (0.8 * 0.6 + 0.25 + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn total_production_scales_with_area() {
        let model = YieldModel::new();
        let prediction = model.predict("rice", &conditions(), 3.5, &mut rng()).unwrap();
        assert!(
            (prediction.total_production - prediction.yield_per_hectare * 3.5).abs() < 1e-9
        );
    }

    #[test]
    fn jitter_stays_within_ten_percent() {
        let c = GrowingConditions {
            soil_quality: 9.0,
            temperature_c: 20.0,
            rainfall_mm: 500.0,
            humidity_pct: 65.0,
            nitrogen_kg_ha: 120.0,
            phosphorus_kg_ha: 60.0,
            potassium_kg_ha: 80.0,
        };
        let mut r = rng();
        for _ in 0..50 {
            let p = YieldModel::new().predict("wheat", &c, 1.0, &mut r).unwrap();
            // All factors are 1.0 so only jitter remains.
            assert!(p.yield_per_hectare >= 4.5 * 0.9 - 1e-9);
            assert!(p.yield_per_hectare <= 4.5 * 1.1 + 1e-9);
        }
    }

    #[test]
    fn multiple_risks_fire_together_and_escalate() {
        let harsh = GrowingConditions {
            soil_quality: 3.0,
            temperature_c: 45.0,
            rainfall_mm: 100.0,
            ..conditions()
        };
        let prediction = YieldModel::new().predict("wheat", &harsh, 1.0, &mut rng()).unwrap();
        let assessment = &prediction.risk_assessment;
        assert_eq!(assessment.risk_level, RiskLevel::High);
        assert!(assessment.risk_factors.len() >= 3);
        let text: Vec<&str> = assessment.risk_factors.iter().map(|r| r.risk.as_str()).collect();
        assert!(text.iter().any(|r| r.contains("Heat stress")));
        assert!(text.iter().any(|r| r.contains("Drought")));
        assert!(text.iter().any(|r| r.contains("soil quality")));
    }

    #[test]
    fn waterlogging_alone_is_medium_risk() {
        let wet = GrowingConditions {
            rainfall_mm: 1200.0, // wheat max 800 * 1.3 = 1040
            temperature_c: 20.0,
            ..conditions()
        };
        let prediction = YieldModel::new().predict("wheat", &wet, 1.0, &mut rng()).unwrap();
        assert_eq!(prediction.risk_assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn favorable_conditions_report_single_low_risk() {
        let good = GrowingConditions {
            soil_quality: 8.0,
            temperature_c: 20.0,
            rainfall_mm: 500.0,
            ..conditions()
        };
        let prediction = YieldModel::new().predict("wheat", &good, 1.0, &mut rng()).unwrap();
        assert_eq!(prediction.risk_assessment.risk_level, RiskLevel::Low);
        assert_eq!(prediction.risk_assessment.risk_factors.len(), 1);
        assert!(prediction.risk_assessment.risk_factors[0]
            .risk
            .contains("Favorable"));
    }

    #[test]
    fn optimization_suggestions_track_thresholds() {
        let c = GrowingConditions {
            soil_quality: 5.0,
            nitrogen_kg_ha: 50.0,
            phosphorus_kg_ha: 20.0,
            potassium_kg_ha: 30.0,
            ..conditions()
        };
        let suggestions = YieldModel::optimization_suggestions(&c);
        assert_eq!(suggestions.len(), 4);

        let optimal = GrowingConditions {
            soil_quality: 8.0,
            nitrogen_kg_ha: 120.0,
            phosphorus_kg_ha: 60.0,
            potassium_kg_ha: 80.0,
            ..conditions()
        };
        let suggestions = YieldModel::optimization_suggestions(&optimal);
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].contains("optimal"));
    }

    #[test]
    fn confidence_tracks_mean_factor() {
        let high = YieldFactors {
            soil_factor: 1.0,
            weather_factor: 0.9,
            fertilizer_factor: 0.9,
        };
        assert_eq!(YieldModel::confidence(&high), ConfidenceLevel::High);

        let medium = YieldFactors {
            soil_factor: 0.8,
            weather_factor: 0.7,
            fertilizer_factor: 0.75,
        };
        assert_eq!(YieldModel::confidence(&medium), ConfidenceLevel::Medium);

        let low = YieldFactors {
            soil_factor: 0.5,
            weather_factor: 0.6,
            fertilizer_factor: 0.7,
        };
        assert_eq!(YieldModel::confidence(&low), ConfidenceLevel::Low);
    }
}
