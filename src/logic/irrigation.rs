use crate::models::{
    EnvironmentalReading, GrowthStage, IrrigationAssessment, IrrigationMethod,
    IrrigationPriority, MethodRecommendation, MoistureStatus, ScheduleEntry, SoilTexture,
    Urgency, WaterBudget,
};

/// Fallback daily water need for crops absent from the table, mm/day.
const DEFAULT_WATER_NEED: f64 = 5.0;
/// Assumed root-zone depth used in the deficit calculation, mm.
const ROOT_ZONE_MM: f64 = 300.0;
/// Moisture level (% of field capacity) the deficit is computed against.
const TARGET_MOISTURE_PCT: f64 = 70.0;
/// Water price, ₹ per litre.
const WATER_COST_PER_LITER: f64 = 0.0005;
/// Length of the generated irrigation schedule, days.
const SCHEDULE_DAYS: u32 = 14;
/// Assumed application rate when converting amounts to durations, mm/hour.
const APPLICATION_RATE_MM_HR: f64 = 5.0;

/// Irrigation scheduling and water management assessment.
///
/// Pure function composition over the reading; unknown crops and soil types
/// fall back to documented defaults instead of erroring.
#[derive(Debug, Default)]
pub struct IrrigationModel;

impl IrrigationModel {
    pub fn new() -> Self {
        Self
    }

    /// Peak-growth crop water requirement, mm/day.
    pub fn base_water_need(crop: &str) -> f64 {
        match crop.to_lowercase().as_str() {
            "wheat" => 4.5,
            "rice" => 8.0,
            "corn" => 6.0,
            "barley" => 4.0,
            "millet" => 3.5,
            "soybean" => 5.5,
            "chickpea" => 3.0,
            "lentil" => 2.5,
            "groundnut" => 4.5,
            "potato" => 5.0,
            "tomato" => 6.5,
            "onion" => 4.0,
            "cabbage" => 5.5,
            "cotton" => 7.0,
            "sugarcane" => 8.5,
            "mustard" => 3.5,
            "sunflower" => 5.0,
            _ => DEFAULT_WATER_NEED,
        }
    }

    pub fn assess(
        &self,
        crop: &str,
        reading: &EnvironmentalReading,
        growth_stage: GrowthStage,
        soil_texture: SoilTexture,
    ) -> IrrigationAssessment {
        let et_rate = self.evapotranspiration(crop, reading, growth_stage);
        let moisture_status = MoistureStatus::from_moisture(reading.soil_moisture_pct);
        let urgency = moisture_status.urgency();
        let water_deficit = self.water_deficit(reading, et_rate, soil_texture);

        let (priority, action, duration, frequency) = Self::recommendation(urgency, water_deficit);

        IrrigationAssessment {
            crop: crop.to_lowercase(),
            moisture_status,
            status_description: moisture_status.description(),
            urgency,
            et_rate_mm_day: et_rate,
            water_deficit_mm: water_deficit,
            priority,
            action,
            recommended_duration_hours: duration,
            frequency,
            best_time: "Early morning (5:00-7:00 AM) - minimal evaporation",
            method_recommendation: Self::recommend_method(crop, water_deficit),
            efficiency_tips: Self::efficiency_tips(crop, soil_texture, reading.temperature_c),
            schedule: Self::schedule(crop, water_deficit, growth_stage),
        }
    }

    /// Two-week irrigation calendar. Event spacing comes from a per-crop base
    /// frequency adjusted for growth stage; each event applies the crop's
    /// daily requirement accumulated over the interval.
    pub fn schedule(
        crop: &str,
        water_deficit: f64,
        growth_stage: GrowthStage,
    ) -> Vec<ScheduleEntry> {
        if water_deficit <= 0.0 {
            return vec![ScheduleEntry {
                day: 1,
                action: "Monitor soil moisture".to_string(),
                amount_mm: 0.0,
                duration_hours: 0.0,
                best_time: "Check soil moisture",
            }];
        }

        let base_frequency: u32 = match crop.to_lowercase().as_str() {
            "rice" => 1,
            "sugarcane" => 2,
            "cotton" => 3,
            "wheat" => 4,
            "corn" => 3,
            "tomato" => 2,
            "potato" => 3,
            "onion" => 3,
            _ => 3,
        };

        let frequency_days = match growth_stage {
            GrowthStage::Flowering | GrowthStage::GrainFilling => base_frequency.saturating_sub(1).max(1),
            GrowthStage::Maturity => base_frequency + 2,
            _ => base_frequency,
        };

        let amount = Self::base_water_need(crop) * f64::from(frequency_days);

        (1..=SCHEDULE_DAYS)
            .map(|day| {
                if (day - 1) % frequency_days == 0 {
                    ScheduleEntry {
                        day,
                        action: format!("Irrigate - {:.1}mm", amount),
                        amount_mm: amount,
                        duration_hours: amount / APPLICATION_RATE_MM_HR,
                        best_time: "6:00 AM - 8:00 AM",
                    }
                } else {
                    ScheduleEntry {
                        day,
                        action: "Monitor".to_string(),
                        amount_mm: 0.0,
                        duration_hours: 0.0,
                        best_time: "Check soil moisture",
                    }
                }
            })
            .collect()
    }

    /// Crop evapotranspiration rate, mm/day, floored at 1.0.
    ///
    /// Each environmental factor is a linear deviation from its optimum
    /// (25°C, 50% humidity, 5 km/h wind) clamped to a fixed band.
    fn evapotranspiration(
        &self,
        crop: &str,
        reading: &EnvironmentalReading,
        growth_stage: GrowthStage,
    ) -> f64 {
        let base_et = Self::base_water_need(crop);
        let stage_multiplier = growth_stage.water_multiplier();

        let temp_factor = (1.0 + (reading.temperature_c - 25.0) * 0.02).clamp(0.5, 1.5);
        let humidity_factor = (1.0 - (reading.humidity_pct - 50.0) * 0.005).clamp(0.7, 1.3);
        let wind_factor = (1.0 + (reading.wind_speed_kmh - 5.0) * 0.01).clamp(0.8, 1.4);

        (base_et * stage_multiplier * temp_factor * humidity_factor * wind_factor).max(1.0)
    }

    /// Water deficit in mm: shortfall against the target moisture level over
    /// the root zone, plus ET losses accumulated since the last rain.
    fn water_deficit(
        &self,
        reading: &EnvironmentalReading,
        et_rate: f64,
        soil_texture: SoilTexture,
    ) -> f64 {
        let moisture_deficit = (TARGET_MOISTURE_PCT - reading.soil_moisture_pct).max(0.0);
        let et_loss = et_rate * f64::from(reading.days_since_rain);

        let deficit =
            (moisture_deficit / 100.0) * soil_texture.water_capacity() * ROOT_ZONE_MM + et_loss;

        deficit.max(0.0)
    }

    /// Urgency maps to a fixed {priority, action, duration formula,
    /// frequency} tuple. Durations use urgency-specific floor/divisor pairs.
    fn recommendation(
        urgency: Urgency,
        water_deficit: f64,
    ) -> (IrrigationPriority, &'static str, f64, &'static str) {
        match urgency {
            Urgency::High => (
                IrrigationPriority::Immediate,
                "Start irrigation within 2-4 hours",
                (water_deficit / 10.0).max(2.0),
                "Daily until moisture improves",
            ),
            Urgency::Medium => (
                IrrigationPriority::Soon,
                "Irrigate within 12-24 hours",
                (water_deficit / 15.0).max(1.0),
                "Every 2-3 days",
            ),
            Urgency::Low => (
                IrrigationPriority::Monitor,
                "Continue monitoring, irrigate if conditions worsen",
                0.0,
                "As needed",
            ),
            Urgency::Drainage => (
                IrrigationPriority::Drainage,
                "Improve drainage, avoid irrigation",
                0.0,
                "None - focus on drainage",
            ),
            Urgency::None => (
                IrrigationPriority::None,
                "No irrigation needed",
                0.0,
                "Monitor daily",
            ),
        }
    }

    /// Fixed crop→method lookup with sprinkler as the default, and the
    /// deficit adjusted for the method's application efficiency.
    fn recommend_method(crop: &str, water_deficit: f64) -> MethodRecommendation {
        let method = match crop.to_lowercase().as_str() {
            "rice" => IrrigationMethod::Flood,
            "sugarcane" => IrrigationMethod::Furrow,
            "tomato" => IrrigationMethod::Drip,
            "potato" => IrrigationMethod::Sprinkler,
            "cotton" => IrrigationMethod::Drip,
            "wheat" => IrrigationMethod::Sprinkler,
            "corn" => IrrigationMethod::Furrow,
            _ => IrrigationMethod::Sprinkler,
        };

        let efficiency = method.efficiency();

        MethodRecommendation {
            method,
            efficiency_pct: efficiency * 100.0,
            water_needed_mm: water_deficit / efficiency,
            advantages: method.advantages(),
        }
    }

    fn efficiency_tips(crop: &str, soil_texture: SoilTexture, temperature_c: f64) -> Vec<String> {
        let mut tips = vec![
            "Irrigate during early morning or late evening".to_string(),
            "Use mulching to reduce evaporation".to_string(),
            "Monitor soil moisture regularly".to_string(),
        ];

        if temperature_c > 30.0 {
            tips.push("Increase irrigation frequency during hot weather".to_string());
        }

        match soil_texture {
            SoilTexture::Sandy => {
                tips.push("Apply smaller, more frequent irrigations for sandy soil".to_string());
            }
            SoilTexture::Clay => {
                tips.push("Allow longer intervals between irrigations for clay soil".to_string());
            }
            _ => {}
        }

        if matches!(crop.to_lowercase().as_str(), "tomato" | "potato" | "cotton") {
            tips.push("Consider drip irrigation for higher efficiency".to_string());
        }

        tips
    }

    /// Seasonal water budget for a crop/area/method combination.
    pub fn water_budget(
        &self,
        crop: &str,
        area_hectares: f64,
        method: IrrigationMethod,
        season_days: u32,
    ) -> WaterBudget {
        let daily_requirement = Self::base_water_need(crop);
        let efficiency = method.efficiency();

        let total_requirement_mm = daily_requirement * f64::from(season_days);
        let actual_water_needed_mm = total_requirement_mm / efficiency;
        // 1 mm over 1 hectare = 10,000 litres
        let total_water_liters = actual_water_needed_mm * area_hectares * 10_000.0;

        WaterBudget {
            crop: crop.to_lowercase(),
            area_hectares,
            method,
            season_days,
            daily_requirement_mm: daily_requirement,
            total_requirement_mm,
            actual_water_needed_mm,
            total_water_liters,
            efficiency_pct: efficiency * 100.0,
            estimated_cost_rupees: total_water_liters * WATER_COST_PER_LITER,
            water_savings_potential_mm: actual_water_needed_mm - total_requirement_mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(moisture: f64) -> EnvironmentalReading {
        EnvironmentalReading {
            temperature_c: 25.0,
            humidity_pct: 50.0,
            wind_speed_kmh: 5.0,
            soil_moisture_pct: moisture,
            days_since_rain: 3,
        }
    }

    fn model() -> IrrigationModel {
        IrrigationModel::new()
    }

    #[test]
    fn urgency_boundary_at_30_percent() {
        let low = model().assess("wheat", &reading(29.0), GrowthStage::Vegetative, SoilTexture::Loamy);
        assert_eq!(low.urgency, Urgency::High);
        assert_eq!(low.moisture_status, MoistureStatus::Critical);

        let at = model().assess("wheat", &reading(30.0), GrowthStage::Vegetative, SoilTexture::Loamy);
        assert_eq!(at.urgency, Urgency::Medium);
        assert_eq!(at.moisture_status, MoistureStatus::Stress);
    }

    #[test]
    fn et_at_optimum_conditions_is_base_times_stage() {
        // All factors 1.0 at 25°C / 50% / 5 km/h.
        let assessment =
            model().assess("wheat", &reading(60.0), GrowthStage::GrainFilling, SoilTexture::Loamy);
        assert!((assessment.et_rate_mm_day - 4.5).abs() < 1e-9);
    }

    #[test]
    fn et_is_floored_at_one_mm_per_day() {
        let cold = EnvironmentalReading {
            temperature_c: -10.0,
            humidity_pct: 100.0,
            wind_speed_kmh: 0.0,
            soil_moisture_pct: 60.0,
            days_since_rain: 0,
        };
        let assessment = model().assess("lentil", &cold, GrowthStage::Germination, SoilTexture::Loamy);
        assert!((assessment.et_rate_mm_day - 1.0).abs() < 1e-9);
    }

    #[test]
    fn environmental_factors_are_clamped() {
        let harsh = EnvironmentalReading {
            temperature_c: 60.0, // temp factor would be 1.7 unclamped
            humidity_pct: 0.0,   // humidity factor would be 1.25
            wind_speed_kmh: 80.0, // wind factor would be 1.75 unclamped
            soil_moisture_pct: 60.0,
            days_since_rain: 0,
        };
        let assessment =
            model().assess("wheat", &harsh, GrowthStage::GrainFilling, SoilTexture::Loamy);
        // 4.5 * 1.0 * 1.5 * 1.25 * 1.4
        assert!((assessment.et_rate_mm_day - 4.5 * 1.5 * 1.25 * 1.4).abs() < 1e-9);
    }

    #[test]
    fn water_deficit_never_negative() {
        let wet = EnvironmentalReading {
            temperature_c: 25.0,
            humidity_pct: 50.0,
            wind_speed_kmh: 5.0,
            soil_moisture_pct: 95.0,
            days_since_rain: 0,
        };
        let assessment = model().assess("rice", &wet, GrowthStage::Vegetative, SoilTexture::Clay);
        assert!(assessment.water_deficit_mm >= 0.0);
        assert_eq!(assessment.priority, IrrigationPriority::Drainage);
        assert!((assessment.recommended_duration_hours - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn deficit_formula_matches_hand_computation() {
        // moisture 40, loamy: (70-40)/100 * 1.5 * 300 = 135mm; plus ET*days.
        let r = reading(40.0);
        let assessment = model().assess("wheat", &r, GrowthStage::GrainFilling, SoilTexture::Loamy);
        let expected = 135.0 + assessment.et_rate_mm_day * 3.0;
        assert!((assessment.water_deficit_mm - expected).abs() < 1e-9);
    }

    #[test]
    fn critical_duration_uses_floor_and_divisor() {
        let assessment =
            model().assess("wheat", &reading(10.0), GrowthStage::Flowering, SoilTexture::Loamy);
        assert_eq!(assessment.priority, IrrigationPriority::Immediate);
        let expected = (assessment.water_deficit_mm / 10.0).max(2.0);
        assert!((assessment.recommended_duration_hours - expected).abs() < 1e-9);

        // Tiny deficit still gets the 2-hour floor.
        assert!(
            model()
                .assess(
                    "lentil",
                    &EnvironmentalReading {
                        soil_moisture_pct: 29.9,
                        days_since_rain: 0,
                        ..reading(29.9)
                    },
                    GrowthStage::Germination,
                    SoilTexture::Sandy,
                )
                .recommended_duration_hours
                >= 2.0
        );
    }

    #[test]
    fn method_lookup_with_default() {
        let rice = model().assess("rice", &reading(40.0), GrowthStage::Vegetative, SoilTexture::Clay);
        assert_eq!(rice.method_recommendation.method, IrrigationMethod::Flood);

        let unknown =
            model().assess("quinoa", &reading(40.0), GrowthStage::Vegetative, SoilTexture::Loamy);
        assert_eq!(
            unknown.method_recommendation.method,
            IrrigationMethod::Sprinkler
        );
        assert!((unknown.et_rate_mm_day
            - DEFAULT_WATER_NEED * GrowthStage::Vegetative.water_multiplier())
        .abs()
            < 1e-9);
    }

    #[test]
    fn water_needed_adjusts_for_efficiency() {
        let assessment =
            model().assess("tomato", &reading(40.0), GrowthStage::Flowering, SoilTexture::Loamy);
        let expected = assessment.water_deficit_mm / 0.90; // drip
        assert!((assessment.method_recommendation.water_needed_mm - expected).abs() < 1e-9);
    }

    #[test]
    fn efficiency_tips_respond_to_conditions() {
        let hot = EnvironmentalReading {
            temperature_c: 35.0,
            ..reading(40.0)
        };
        let tips = model()
            .assess("cotton", &hot, GrowthStage::Flowering, SoilTexture::Sandy)
            .efficiency_tips
            .join("\n");
        assert!(tips.contains("hot weather"));
        assert!(tips.contains("sandy soil"));
        assert!(tips.contains("drip irrigation"));
    }

    #[test]
    fn schedule_spacing_follows_crop_frequency() {
        // Wheat irrigates every 4 days: days 1, 5, 9, 13.
        let schedule = IrrigationModel::schedule("wheat", 50.0, GrowthStage::Vegetative);
        assert_eq!(schedule.len(), 14);
        let events: Vec<u32> = schedule
            .iter()
            .filter(|e| e.amount_mm > 0.0)
            .map(|e| e.day)
            .collect();
        assert_eq!(events, vec![1, 5, 9, 13]);

        // Each event applies 4 days of wheat's requirement at 5 mm/h.
        let event = &schedule[0];
        assert!((event.amount_mm - 4.5 * 4.0).abs() < 1e-9);
        assert!((event.duration_hours - 18.0 / 5.0).abs() < 1e-9);
        assert_eq!(event.best_time, "6:00 AM - 8:00 AM");

        // Rice irrigates daily.
        let rice = IrrigationModel::schedule("rice", 50.0, GrowthStage::Vegetative);
        assert!(rice.iter().all(|e| e.amount_mm > 0.0));
    }

    #[test]
    fn schedule_adjusts_frequency_for_growth_stage() {
        // Flowering tightens wheat from 4 to 3 days: 1, 4, 7, 10, 13.
        let flowering = IrrigationModel::schedule("wheat", 50.0, GrowthStage::Flowering);
        let events: Vec<u32> = flowering
            .iter()
            .filter(|e| e.amount_mm > 0.0)
            .map(|e| e.day)
            .collect();
        assert_eq!(events, vec![1, 4, 7, 10, 13]);

        // Maturity stretches rice from 1 to 3 days.
        let maturity = IrrigationModel::schedule("rice", 50.0, GrowthStage::Maturity);
        let events: Vec<u32> = maturity
            .iter()
            .filter(|e| e.amount_mm > 0.0)
            .map(|e| e.day)
            .collect();
        assert_eq!(events, vec![1, 4, 7, 10, 13]);

        // Flowering never drops below daily irrigation.
        let rice = IrrigationModel::schedule("rice", 50.0, GrowthStage::Flowering);
        assert!(rice.iter().all(|e| e.amount_mm > 0.0));
    }

    #[test]
    fn zero_deficit_schedule_is_monitor_only() {
        let schedule = IrrigationModel::schedule("wheat", 0.0, GrowthStage::Vegetative);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].action, "Monitor soil moisture");
        assert!((schedule[0].amount_mm - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn assessment_includes_schedule() {
        let assessment =
            model().assess("wheat", &reading(40.0), GrowthStage::Vegetative, SoilTexture::Loamy);
        assert_eq!(assessment.schedule.len(), 14);
        assert!(assessment.schedule.iter().any(|e| e.amount_mm > 0.0));
    }

    #[test]
    fn water_budget_arithmetic() {
        let budget = model().water_budget("wheat", 2.0, IrrigationMethod::Drip, 120);
        assert!((budget.total_requirement_mm - 4.5 * 120.0).abs() < 1e-9);
        assert!((budget.actual_water_needed_mm - 540.0 / 0.9).abs() < 1e-9);
        assert!((budget.total_water_liters - (540.0 / 0.9) * 2.0 * 10_000.0).abs() < 1e-6);
        assert!(
            (budget.estimated_cost_rupees - budget.total_water_liters * 0.0005).abs() < 1e-6
        );
        assert!(budget.water_savings_potential_mm > 0.0);
    }
}
