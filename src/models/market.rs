use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical price observation, weekly granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// ₹/quintal, always positive.
    pub price: f64,
}

/// One forecast month with its uncertainty band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceForecastPoint {
    /// Months ahead of today, starting at 1.
    pub month: u32,
    pub date: NaiveDate,
    pub predicted_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Decays linearly with horizon, floored at 0.5.
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketSentiment {
    /// Three-way threshold on the projected trend percentage.
    pub fn from_trend_pct(trend_pct: f64) -> Self {
        if trend_pct > 10.0 {
            MarketSentiment::Bullish
        } else if trend_pct < -10.0 {
            MarketSentiment::Bearish
        } else {
            MarketSentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSentiment::Bullish => "Bullish",
            MarketSentiment::Bearish => "Bearish",
            MarketSentiment::Neutral => "Neutral",
        }
    }
}

impl std::fmt::Display for MarketSentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketAction {
    HoldBuy,
    Sell,
    Monitor,
}

impl MarketAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketAction::HoldBuy => "HOLD/BUY",
            MarketAction::Sell => "SELL",
            MarketAction::Monitor => "MONITOR",
        }
    }
}

impl std::fmt::Display for MarketAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceStability {
    High,
    Medium,
    Low,
}

impl PriceStability {
    pub fn from_volatility_score(score: f64) -> Self {
        if score < 5.0 {
            PriceStability::High
        } else if score < 15.0 {
            PriceStability::Medium
        } else {
            PriceStability::Low
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub historical_trend_pct: f64,
    pub future_trend_pct: f64,
    pub market_sentiment: MarketSentiment,
    /// Coefficient of variation of the historical series, percent.
    pub volatility_score: f64,
    pub price_stability: PriceStability,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketRecommendation {
    pub action: MarketAction,
    pub reason: &'static str,
    pub risk_level: super::yield_estimate::RiskLevel,
    pub confidence: super::yield_estimate::ConfidenceLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceOutlook {
    pub crop: String,
    pub current_price: f64,
    pub historical: Vec<PricePoint>,
    pub forecast: Vec<PriceForecastPoint>,
    pub analysis: MarketAnalysis,
    pub recommendation: MarketRecommendation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profitability {
    High,
    Medium,
    Low,
    Loss,
}

impl Profitability {
    /// ROI breakpoints: >50 High, >20 Medium, >0 Low, else Loss.
    pub fn from_roi_pct(roi_pct: f64) -> Self {
        if roi_pct > 50.0 {
            Profitability::High
        } else if roi_pct > 20.0 {
            Profitability::Medium
        } else if roi_pct > 0.0 {
            Profitability::Low
        } else {
            Profitability::Loss
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profitability::High => "High",
            Profitability::Medium => "Medium",
            Profitability::Low => "Low",
            Profitability::Loss => "Loss",
        }
    }
}

impl std::fmt::Display for Profitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price impact of harvest timing for a planting date.
#[derive(Debug, Clone, Serialize)]
pub struct HarvestOutlook {
    pub crop: String,
    pub planting_date: NaiveDate,
    pub expected_harvest_date: NaiveDate,
    pub days_to_harvest: i64,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub crop: String,
    pub area_hectares: f64,
    /// Quintals over the whole area.
    pub expected_yield: f64,
    pub selling_price_per_quintal: f64,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub net_profit: f64,
    pub profit_margin_pct: f64,
    pub roi_pct: f64,
    pub breakeven_price: f64,
    pub profitability: Profitability,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_thresholds() {
        assert_eq!(
            MarketSentiment::from_trend_pct(10.1),
            MarketSentiment::Bullish
        );
        assert_eq!(
            MarketSentiment::from_trend_pct(10.0),
            MarketSentiment::Neutral
        );
        assert_eq!(
            MarketSentiment::from_trend_pct(-10.1),
            MarketSentiment::Bearish
        );
        assert_eq!(MarketSentiment::from_trend_pct(0.0), MarketSentiment::Neutral);
    }

    #[test]
    fn stability_thresholds() {
        assert_eq!(
            PriceStability::from_volatility_score(4.9),
            PriceStability::High
        );
        assert_eq!(
            PriceStability::from_volatility_score(5.0),
            PriceStability::Medium
        );
        assert_eq!(
            PriceStability::from_volatility_score(15.0),
            PriceStability::Low
        );
    }

    #[test]
    fn profitability_roi_breakpoints() {
        assert_eq!(Profitability::from_roi_pct(50.1), Profitability::High);
        assert_eq!(Profitability::from_roi_pct(50.0), Profitability::Medium);
        assert_eq!(Profitability::from_roi_pct(20.0), Profitability::Low);
        assert_eq!(Profitability::from_roi_pct(0.0), Profitability::Loss);
        assert_eq!(Profitability::from_roi_pct(-12.0), Profitability::Loss);
    }
}
