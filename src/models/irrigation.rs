use serde::{Deserialize, Serialize};

/// Five-way soil moisture classification against fixed thresholds.
///
/// Boundary convention: upper bounds are exclusive throughout, so moisture
/// exactly at 30% classifies as Stress, not Critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoistureStatus {
    Critical,
    Stress,
    Adequate,
    Optimal,
    Excess,
}

impl MoistureStatus {
    pub fn from_moisture(soil_moisture_pct: f64) -> Self {
        if soil_moisture_pct < 30.0 {
            MoistureStatus::Critical
        } else if soil_moisture_pct < 50.0 {
            MoistureStatus::Stress
        } else if soil_moisture_pct < 70.0 {
            MoistureStatus::Adequate
        } else if soil_moisture_pct < 90.0 {
            MoistureStatus::Optimal
        } else {
            MoistureStatus::Excess
        }
    }

    pub fn urgency(&self) -> Urgency {
        match self {
            MoistureStatus::Critical => Urgency::High,
            MoistureStatus::Stress => Urgency::Medium,
            MoistureStatus::Adequate => Urgency::Low,
            MoistureStatus::Optimal => Urgency::None,
            MoistureStatus::Excess => Urgency::Drainage,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MoistureStatus::Critical => {
                "Immediate irrigation required - crops under severe stress"
            }
            MoistureStatus::Stress => "Irrigation recommended - crops beginning to show stress",
            MoistureStatus::Adequate => "Soil moisture adequate - monitor conditions",
            MoistureStatus::Optimal => "Excellent soil moisture - no irrigation needed",
            MoistureStatus::Excess => "Risk of waterlogging - ensure proper drainage",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureStatus::Critical => "Critical",
            MoistureStatus::Stress => "Stress",
            MoistureStatus::Adequate => "Adequate",
            MoistureStatus::Optimal => "Optimal",
            MoistureStatus::Excess => "Excess",
        }
    }
}

impl std::fmt::Display for MoistureStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    High,
    Medium,
    Low,
    None,
    Drainage,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::High => "High",
            Urgency::Medium => "Medium",
            Urgency::Low => "Low",
            Urgency::None => "None",
            Urgency::Drainage => "Drainage",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationPriority {
    Immediate,
    Soon,
    Monitor,
    Drainage,
    None,
}

impl IrrigationPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationPriority::Immediate => "Immediate",
            IrrigationPriority::Soon => "Soon",
            IrrigationPriority::Monitor => "Monitor",
            IrrigationPriority::Drainage => "Drainage",
            IrrigationPriority::None => "None",
        }
    }
}

impl std::fmt::Display for IrrigationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IrrigationMethod {
    Flood,
    Furrow,
    Sprinkler,
    Drip,
    MicroSprinkler,
}

impl IrrigationMethod {
    /// Fraction of applied water that reaches the root zone.
    pub fn efficiency(&self) -> f64 {
        match self {
            IrrigationMethod::Flood => 0.45,
            IrrigationMethod::Furrow => 0.60,
            IrrigationMethod::Sprinkler => 0.75,
            IrrigationMethod::Drip => 0.90,
            IrrigationMethod::MicroSprinkler => 0.85,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationMethod::Flood => "Flood",
            IrrigationMethod::Furrow => "Furrow",
            IrrigationMethod::Sprinkler => "Sprinkler",
            IrrigationMethod::Drip => "Drip",
            IrrigationMethod::MicroSprinkler => "Micro-Sprinkler",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flood" => Some(IrrigationMethod::Flood),
            "furrow" => Some(IrrigationMethod::Furrow),
            "sprinkler" => Some(IrrigationMethod::Sprinkler),
            "drip" => Some(IrrigationMethod::Drip),
            "micro_sprinkler" | "micro-sprinkler" | "microsprinkler" => {
                Some(IrrigationMethod::MicroSprinkler)
            }
            _ => None,
        }
    }

    pub fn advantages(&self) -> Vec<&'static str> {
        match self {
            IrrigationMethod::Drip => vec![
                "90% water efficiency",
                "Precise water application",
                "Reduced weed growth",
                "Lower labor requirements",
            ],
            IrrigationMethod::Sprinkler => vec![
                "75% water efficiency",
                "Good for field crops",
                "Uniform water distribution",
                "Can apply fertilizers",
            ],
            IrrigationMethod::Furrow => vec![
                "60% water efficiency",
                "Low initial cost",
                "Suitable for row crops",
                "Easy maintenance",
            ],
            IrrigationMethod::Flood => vec![
                "45% water efficiency",
                "Suitable for rice",
                "Low labor requirement",
                "Traditional method",
            ],
            IrrigationMethod::MicroSprinkler => vec![
                "85% water efficiency",
                "Gentle application for young plants",
                "Good coverage under tree canopies",
            ],
        }
    }
}

impl std::fmt::Display for IrrigationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day in the two-week irrigation schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleEntry {
    pub day: u32,
    pub action: String,
    pub amount_mm: f64,
    pub duration_hours: f64,
    pub best_time: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodRecommendation {
    pub method: IrrigationMethod,
    pub efficiency_pct: f64,
    /// Deficit adjusted for application losses, mm.
    pub water_needed_mm: f64,
    pub advantages: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IrrigationAssessment {
    pub crop: String,
    pub moisture_status: MoistureStatus,
    pub status_description: &'static str,
    pub urgency: Urgency,
    pub et_rate_mm_day: f64,
    pub water_deficit_mm: f64,
    pub priority: IrrigationPriority,
    pub action: &'static str,
    pub recommended_duration_hours: f64,
    pub frequency: &'static str,
    pub best_time: &'static str,
    pub method_recommendation: MethodRecommendation,
    pub efficiency_tips: Vec<String>,
    pub schedule: Vec<ScheduleEntry>,
}

/// Seasonal water budget for one crop/method/area combination.
#[derive(Debug, Clone, Serialize)]
pub struct WaterBudget {
    pub crop: String,
    pub area_hectares: f64,
    pub method: IrrigationMethod,
    pub season_days: u32,
    pub daily_requirement_mm: f64,
    pub total_requirement_mm: f64,
    pub actual_water_needed_mm: f64,
    pub total_water_liters: f64,
    pub efficiency_pct: f64,
    pub estimated_cost_rupees: f64,
    pub water_savings_potential_mm: f64,
}
