use crate::models::{
    ConfidenceLevel, CropProfile, HarvestOutlook, MarketAction, MarketAnalysis,
    MarketRecommendation, MarketSentiment, PriceForecastPoint, PriceOutlook, PricePoint,
    PriceStability, Profitability, ProfitabilityReport, RiskLevel,
};
use chrono::{Datelike, Duration, NaiveDate};
use rand::Rng;

const HISTORY_DAYS: i64 = 180;
const FLAT_SEASON: [f64; 12] = [1.0; 12];

/// Commodity price simulation and market analysis.
///
/// Prices are synthesized, not fetched: a seasonal random walk for history
/// and a trend-plus-seasonality projection for the future. Callers that have
/// live market quotes overwrite `unit_price` on the profile before calling.
#[derive(Debug, Default)]
pub struct PriceModel;

impl PriceModel {
    pub fn new() -> Self {
        Self
    }

    /// Monthly price multipliers, January first.
    fn seasonal_pattern(crop: &str) -> &'static [f64; 12] {
        match crop {
            "wheat" => &[1.1, 1.1, 1.0, 0.9, 0.8, 0.8, 0.9, 1.0, 1.1, 1.2, 1.2, 1.1],
            "rice" => &[0.9, 0.9, 1.0, 1.1, 1.2, 1.2, 1.1, 1.0, 0.9, 0.8, 0.8, 0.9],
            "potato" => &[0.8, 0.8, 0.9, 1.0, 1.2, 1.3, 1.2, 1.1, 1.0, 0.9, 0.8, 0.8],
            "tomato" => &[1.2, 1.1, 1.0, 0.9, 0.8, 0.9, 1.0, 1.1, 1.2, 1.3, 1.2, 1.2],
            _ => &FLAT_SEASON,
        }
    }

    fn seasonal_multiplier(crop: &str, month: u32) -> f64 {
        Self::seasonal_pattern(crop)[(month - 1) as usize]
    }

    /// Expected annual trend plus a bounded random market factor.
    fn price_trend(crop: &str, rng: &mut impl Rng) -> f64 {
        let base_trend = match crop {
            "wheat" => 0.05,
            "rice" => 0.03,
            "potato" => 0.08,
            "tomato" => 0.10,
            "cotton" => 0.06,
            "soybean" => 0.07,
            _ => 0.05,
        };
        base_trend + rng.gen_range(-0.03..=0.03)
    }

    pub fn forecast(
        &self,
        profile: &CropProfile,
        months_ahead: u32,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> PriceOutlook {
        let historical = self.historical_series(profile, today, rng);
        let forecast = self.future_series(profile, months_ahead, today, rng);
        let analysis = Self::analyze(profile, &historical, &forecast);
        let recommendation = Self::recommend(&analysis);

        PriceOutlook {
            crop: profile.name.clone(),
            current_price: profile.unit_price,
            historical,
            forecast,
            analysis,
            recommendation,
        }
    }

    /// Six months of synthetic history: a random walk from 90% of today's
    /// price with daily volatility noise and a gradual seasonal pull,
    /// decimated to weekly points.
    fn historical_series(
        &self,
        profile: &CropProfile,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> Vec<PricePoint> {
        let volatility = profile.category.volatility();
        let base_date = today - Duration::days(HISTORY_DAYS);
        let mut price = profile.unit_price * 0.9;
        let mut series = Vec::new();

        for day in 0..HISTORY_DAYS {
            let date = base_date + Duration::days(day);
            let seasonal = Self::seasonal_multiplier(&profile.name, date.month());

            let daily_change = rng.gen_range(-volatility / 30.0..=volatility / 30.0);
            price *= 1.0 + daily_change;
            price *= 0.99 + 0.01 * seasonal;

            if day % 7 == 0 {
                series.push(PricePoint { date, price });
            }
        }

        series
    }

    /// Monthly projections with an uncertainty band that widens with the
    /// horizon and confidence that decays to a 0.5 floor.
    fn future_series(
        &self,
        profile: &CropProfile,
        months_ahead: u32,
        today: NaiveDate,
        rng: &mut impl Rng,
    ) -> Vec<PriceForecastPoint> {
        let trend = Self::price_trend(&profile.name, rng);
        let volatility = profile.category.volatility();

        let mut price = profile.unit_price;
        let mut series = Vec::new();

        for month in 1..=months_ahead {
            let date = today + Duration::days(30 * i64::from(month));

            price *= 1.0 + trend / 12.0;
            let seasonal_price = price * Self::seasonal_multiplier(&profile.name, date.month());

            let uncertainty = volatility * f64::from(month) * 0.1;

            series.push(PriceForecastPoint {
                month,
                date,
                predicted_price: seasonal_price,
                min_price: seasonal_price * (1.0 - uncertainty),
                max_price: seasonal_price * (1.0 + uncertainty),
                confidence: (1.0 - 0.1 * f64::from(month)).max(0.5),
            });
        }

        series
    }

    fn analyze(
        profile: &CropProfile,
        historical: &[PricePoint],
        forecast: &[PriceForecastPoint],
    ) -> MarketAnalysis {
        let historical_trend_pct = match (historical.first(), historical.last()) {
            (Some(first), Some(last)) if historical.len() >= 2 => {
                (last.price - first.price) / first.price * 100.0
            }
            _ => 0.0,
        };

        let future_trend_pct = match forecast.last() {
            Some(last) if forecast.len() >= 2 => {
                (last.predicted_price - profile.unit_price) / profile.unit_price * 100.0
            }
            _ => 0.0,
        };

        let volatility_score = if historical.len() > 1 {
            let prices: Vec<f64> = historical.iter().map(|p| p.price).collect();
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            let variance =
                prices.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / prices.len() as f64;
            variance.sqrt() / mean * 100.0
        } else {
            0.0
        };

        MarketAnalysis {
            historical_trend_pct,
            future_trend_pct,
            market_sentiment: MarketSentiment::from_trend_pct(future_trend_pct),
            volatility_score,
            price_stability: PriceStability::from_volatility_score(volatility_score),
        }
    }

    fn recommend(analysis: &MarketAnalysis) -> MarketRecommendation {
        let trend = analysis.future_trend_pct;

        let (action, reason) = if trend > 5.0 {
            (
                MarketAction::HoldBuy,
                "Prices expected to rise - good time to hold or buy",
            )
        } else if trend < -5.0 {
            (
                MarketAction::Sell,
                "Prices expected to decline - consider selling soon",
            )
        } else {
            (
                MarketAction::Monitor,
                "Stable prices expected - monitor market conditions",
            )
        };

        let risk_level = if analysis.volatility_score > 15.0 {
            RiskLevel::High
        } else if analysis.volatility_score > 8.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let confidence = if trend.abs() > 8.0 {
            ConfidenceLevel::High
        } else if trend.abs() > 3.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };

        MarketRecommendation {
            action,
            reason,
            risk_level,
            confidence,
        }
    }

    /// Days from planting to harvest for the crops with known cycles.
    fn crop_duration_days(crop: &str) -> i64 {
        match crop {
            "wheat" | "rice" => 120,
            "corn" | "soybean" => 100,
            "potato" => 90,
            "tomato" => 80,
            "cotton" => 180,
            _ => 100,
        }
    }

    /// Expected price impact of harvest timing given a planting date.
    pub fn harvest_outlook(
        &self,
        profile: &CropProfile,
        planting_date: NaiveDate,
        today: NaiveDate,
    ) -> HarvestOutlook {
        let harvest_date =
            planting_date + Duration::days(Self::crop_duration_days(&profile.name));
        let days_to_harvest = (harvest_date - today).num_days();

        let impact = if days_to_harvest < 0 {
            "Harvest completed - prices may be stabilizing"
        } else if days_to_harvest < 30 {
            "Harvest approaching - prices may decline due to increased supply"
        } else if days_to_harvest < 60 {
            "Pre-harvest period - prices may remain stable"
        } else {
            "Growing season - prices following seasonal trends"
        };

        HarvestOutlook {
            crop: profile.name.clone(),
            planting_date,
            expected_harvest_date: harvest_date,
            days_to_harvest,
            impact,
        }
    }

    /// Whole-season economics from the profile's reference figures. A
    /// selling month applies that month's seasonal multiplier to the price.
    pub fn profitability(
        &self,
        profile: &CropProfile,
        area_hectares: f64,
        selling_month: Option<u32>,
    ) -> ProfitabilityReport {
        let selling_price = match selling_month {
            Some(month @ 1..=12) => {
                profile.unit_price * Self::seasonal_multiplier(&profile.name, month)
            }
            _ => profile.unit_price,
        };

        let expected_yield = profile.typical_yield * area_hectares;
        let total_revenue = expected_yield * selling_price;
        let total_cost = profile.cultivation_cost * area_hectares;
        let net_profit = total_revenue - total_cost;

        let profit_margin_pct = if total_revenue > 0.0 {
            net_profit / total_revenue * 100.0
        } else {
            0.0
        };
        let roi_pct = if total_cost > 0.0 {
            net_profit / total_cost * 100.0
        } else {
            0.0
        };

        ProfitabilityReport {
            crop: profile.name.clone(),
            area_hectares,
            expected_yield,
            selling_price_per_quintal: selling_price,
            total_revenue,
            total_cost,
            net_profit,
            profit_margin_pct,
            roi_pct,
            breakeven_price: profile.cultivation_cost / profile.typical_yield,
            profitability: Profitability::from_roi_pct(roi_pct),
        }
    }
}
