use crate::models::{
    CropCategory, CropTable, RotationAdvice, RotationAnalysis, RotationPlanEntry,
    RotationSuggestion, Season,
};
use rand::seq::SliceRandom;
use rand::Rng;

const TOP_SUGGESTIONS: usize = 5;
/// Candidates may exceed their soil minimum requirement by this tolerance.
const SOIL_TOLERANCE: f64 = 2.0;

/// Rule-based rotation advisor over the seeded crop table.
#[derive(Debug, Default)]
pub struct RotationModel;

impl RotationModel {
    pub fn new() -> Self {
        Self
    }

    /// Categories that benefit from following the given one.
    fn beneficial_successors(category: CropCategory) -> &'static [CropCategory] {
        use CropCategory::*;
        match category {
            Cereals => &[Legumes, Oilseeds, Vegetables],
            Legumes => &[Cereals, CashCrops, Vegetables],
            Oilseeds => &[Cereals, Legumes, Vegetables],
            Vegetables => &[Cereals, Legumes, Oilseeds],
            CashCrops => &[Legumes, Cereals, Oilseeds],
        }
    }

    /// Fallback successor list when the current crop is unknown.
    const DEFAULT_SUCCESSORS: &'static [CropCategory] =
        &[CropCategory::Cereals, CropCategory::Legumes];

    fn rotation_benefit(current: Option<CropCategory>, next: CropCategory) -> &'static str {
        use CropCategory::*;
        match (current, next) {
            (Some(Cereals), Legumes) => {
                "Legumes fix nitrogen, reducing fertilizer needs for next cereal crop"
            }
            (Some(Legumes), Cereals) => "Cereals utilize nitrogen fixed by previous legume crop",
            (Some(Cereals), Oilseeds) => "Different root systems improve soil structure",
            (Some(Vegetables), Cereals) => "Rotation breaks pest cycles common in vegetable crops",
            (Some(CashCrops), Legumes) => {
                "Legumes restore soil fertility after nutrient-intensive cash crops"
            }
            (Some(Oilseeds), Cereals) => "Oilseeds improve soil organic matter for cereal production",
            _ => "Crop rotation improves soil health and breaks pest cycles",
        }
    }

    pub fn suggest(
        &self,
        table: &CropTable,
        current_crop: &str,
        soil_quality: f64,
        season: Season,
        rng: &mut impl Rng,
    ) -> RotationAdvice {
        let current_crop = current_crop.to_lowercase();
        let current_category = table.get(&current_crop).map(|c| c.category);

        let beneficial = current_category
            .map(Self::beneficial_successors)
            .unwrap_or(Self::DEFAULT_SUCCESSORS);

        let mut suggestions: Vec<RotationSuggestion> = table
            .iter()
            .filter(|c| c.season.fits(season) && c.soil_min <= soil_quality + SOIL_TOLERANCE)
            .map(|c| {
                let benefit_score = if beneficial.contains(&c.category) {
                    3.0
                } else if Some(c.category) == current_category {
                    1.0 // repeat-category penalty
                } else {
                    2.0
                };
                let soil_match = (soil_quality - c.soil_min + 5.0).min(10.0);

                RotationSuggestion {
                    crop: c.name.clone(),
                    category: c.category,
                    suitability_score: benefit_score * 2.0 + soil_match,
                    rotation_benefit: Self::rotation_benefit(current_category, c.category),
                    soil_requirement: c.soil_min,
                }
            })
            .collect();

        suggestions.sort_by(|a, b| {
            b.suitability_score
                .partial_cmp(&a.suitability_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.crop.cmp(&b.crop))
        });
        suggestions.truncate(TOP_SUGGESTIONS);

        let next_crop = suggestions
            .first()
            .map(|s| s.crop.clone())
            .unwrap_or_else(|| "wheat".to_string());
        let rotation_plan = self.plan(table, &current_crop, &next_crop, rng);

        RotationAdvice {
            current_crop,
            current_category,
            season,
            soil_quality,
            suggestions,
            rotation_plan,
        }
    }

    /// Two-year plan: current crop, the top suggestion, then a random crop
    /// from a category beneficial to the second crop.
    fn plan(
        &self,
        table: &CropTable,
        current_crop: &str,
        next_crop: &str,
        rng: &mut impl Rng,
    ) -> Vec<RotationPlanEntry> {
        let mut plan = vec![
            RotationPlanEntry {
                year: 1,
                season_label: "Current",
                crop: current_crop.to_string(),
                purpose: "Current cultivation",
            },
            RotationPlanEntry {
                year: 1,
                season_label: "Next",
                crop: next_crop.to_string(),
                purpose: "Recommended rotation crop",
            },
        ];

        let next_category = table
            .get(next_crop)
            .map(|c| c.category)
            .unwrap_or(CropCategory::Cereals);
        let beneficial = Self::beneficial_successors(next_category);

        let third_options: Vec<&str> = table
            .iter()
            .filter(|c| {
                beneficial.contains(&c.category)
                    && c.name != current_crop
                    && c.name != next_crop
            })
            .map(|c| c.name.as_str())
            .collect();

        let third_crop = third_options
            .choose(rng)
            .copied()
            .unwrap_or("wheat")
            .to_string();

        plan.push(RotationPlanEntry {
            year: 2,
            season_label: "Following",
            crop: third_crop,
            purpose: "Complete rotation cycle",
        });

        plan
    }

    /// Score a multi-year sequence on diversity, nitrogen fixation and pest
    /// cycle disruption.
    pub fn analyze(&self, table: &CropTable, sequence: &[String]) -> RotationAnalysis {
        let categories: Vec<Option<CropCategory>> = sequence
            .iter()
            .map(|crop| table.get(crop).map(|c| c.category))
            .collect();

        let mut unique: Vec<Option<CropCategory>> = categories.clone();
        unique.sort_by_key(|c| c.map(|c| c.as_str()));
        unique.dedup();
        let diversity_score = (unique.len() as f64 * 2.5).min(10.0);

        let has_nitrogen_fixers = categories.contains(&Some(CropCategory::Legumes));
        let nitrogen_benefit_score = if has_nitrogen_fixers { 8.0 } else { 3.0 };

        let consecutive_repeat = categories.windows(2).any(|w| w[0].is_some() && w[0] == w[1]);
        let pest_control_score = if consecutive_repeat { 3.0 } else { 8.0 };

        let overall_sustainability =
            (diversity_score + nitrogen_benefit_score + pest_control_score) / 3.0;

        let mut recommendations = Vec::new();
        if diversity_score < 6.0 {
            recommendations.push("Include more diverse crop categories in rotation".to_string());
        }
        if nitrogen_benefit_score < 6.0 {
            recommendations
                .push("Add nitrogen-fixing legumes (soybean, chickpea, lentil)".to_string());
        }
        if pest_control_score < 6.0 {
            recommendations.push("Avoid growing same crop category consecutively".to_string());
        }
        if recommendations.is_empty() {
            recommendations.push("Excellent rotation plan - maintain this sequence".to_string());
        }

        RotationAnalysis {
            diversity_score,
            nitrogen_benefit_score,
            pest_control_score,
            overall_sustainability,
            has_nitrogen_fixers,
            recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table() -> CropTable {
        Database::open_in_memory().unwrap().load_crop_table().unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn suggestions_respect_season_filter() {
        let advice = RotationModel::new().suggest(&table(), "wheat", 7.5, Season::Monsoon, &mut rng());
        for suggestion in &advice.suggestions {
            let profile = table().get(&suggestion.crop).unwrap().clone();
            assert!(profile.season.fits(Season::Monsoon), "{}", suggestion.crop);
        }
        // Winter-only crops never appear in a monsoon plan.
        assert!(advice.suggestions.iter().all(|s| s.crop != "potato"));
    }

    #[test]
    fn suggestions_respect_soil_tolerance() {
        // soil 4.0 + tolerance 2 = 6.0: rice and sugarcane (soil_min 7) excluded.
        let advice = RotationModel::new().suggest(&table(), "wheat", 4.0, Season::Monsoon, &mut rng());
        assert!(advice.suggestions.iter().all(|s| s.soil_requirement <= 6.0));
    }

    #[test]
    fn at_most_five_suggestions_sorted_descending() {
        let advice = RotationModel::new().suggest(&table(), "wheat", 8.0, Season::Winter, &mut rng());
        assert!(advice.suggestions.len() <= 5);
        assert!(!advice.suggestions.is_empty());
        for window in advice.suggestions.windows(2) {
            assert!(window[0].suitability_score >= window[1].suitability_score);
        }
    }

    #[test]
    fn suitability_score_formula() {
        let advice = RotationModel::new().suggest(&table(), "wheat", 7.0, Season::Winter, &mut rng());
        // chickpea: legume after cereal -> benefit 3; soil_match min(10, 7-6+5)=6
        let chickpea = advice
            .suggestions
            .iter()
            .find(|s| s.crop == "chickpea")
            .expect("chickpea suggested");
        assert!((chickpea.suitability_score - (3.0 * 2.0 + 6.0)).abs() < 1e-9);
        assert!(chickpea.rotation_benefit.contains("fix nitrogen"));
    }

    #[test]
    fn repeat_category_is_penalized_out_of_top_five() {
        // After wheat, winter cereals (wheat, barley) score benefit 1 and are
        // crowded out by legumes, oilseeds and vegetables.
        let advice = RotationModel::new().suggest(&table(), "wheat", 8.0, Season::Winter, &mut rng());
        assert!(advice.suggestions.iter().all(|s| s.category != CropCategory::Cereals));
        assert!(advice.suggestions.iter().any(|s| s.crop == "chickpea"));
    }

    #[test]
    fn unknown_current_crop_uses_default_successors() {
        let advice = RotationModel::new().suggest(&table(), "quinoa", 7.0, Season::Winter, &mut rng());
        assert_eq!(advice.current_category, None);
        assert!(!advice.suggestions.is_empty());
    }

    #[test]
    fn plan_has_three_distinct_entries() {
        let advice = RotationModel::new().suggest(&table(), "wheat", 7.5, Season::Monsoon, &mut rng());
        assert_eq!(advice.rotation_plan.len(), 3);
        assert_eq!(advice.rotation_plan[0].crop, "wheat");
        assert_eq!(advice.rotation_plan[1].crop, advice.suggestions[0].crop);
        let third = &advice.rotation_plan[2].crop;
        assert_ne!(third, &advice.rotation_plan[0].crop);
        assert_ne!(third, &advice.rotation_plan[1].crop);
    }

    #[test]
    fn plan_is_deterministic_under_seeded_rng() {
        let model = RotationModel::new();
        let a = model.suggest(&table(), "wheat", 7.5, Season::Monsoon, &mut StdRng::seed_from_u64(3));
        let b = model.suggest(&table(), "wheat", 7.5, Season::Monsoon, &mut StdRng::seed_from_u64(3));
        assert_eq!(a.rotation_plan[2].crop, b.rotation_plan[2].crop);
    }

    #[test]
    fn analyze_rewards_diverse_legume_sequences() {
        let model = RotationModel::new();
        let t = table();

        let good = model.analyze(
            &t,
            &["wheat".to_string(), "soybean".to_string(), "potato".to_string()],
        );
        assert!((good.diversity_score - 7.5).abs() < 1e-9);
        assert!(good.has_nitrogen_fixers);
        assert!((good.nitrogen_benefit_score - 8.0).abs() < 1e-9);
        assert!((good.pest_control_score - 8.0).abs() < 1e-9);
        assert_eq!(good.recommendations.len(), 1);
        assert!(good.recommendations[0].contains("Excellent"));

        let monoculture = model.analyze(&t, &["wheat".to_string(), "barley".to_string()]);
        assert!(!monoculture.has_nitrogen_fixers);
        assert!((monoculture.pest_control_score - 3.0).abs() < 1e-9);
        assert!(monoculture
            .recommendations
            .iter()
            .any(|r| r.contains("legumes")));
        assert!(monoculture
            .recommendations
            .iter()
            .any(|r| r.contains("consecutively")));
    }

    #[test]
    fn sustainability_is_mean_of_components() {
        let analysis = RotationModel::new().analyze(
            &table(),
            &["wheat".to_string(), "soybean".to_string(), "mustard".to_string()],
        );
        let expected = (analysis.diversity_score
            + analysis.nitrogen_benefit_score
            + analysis.pest_control_score)
            / 3.0;
        assert!((analysis.overall_sustainability - expected).abs() < 1e-9);
    }
}
