use crate::config::MarketDataConfig;
use crate::error::{FarmOpsError, Result};
use crate::models::CropTable;
use rand::Rng;
use serde::Deserialize;
use std::collections::HashMap;

const API_BASE_URL: &str = "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070";

/// Agmarknet mandi price client.
pub struct MarketDataClient {
    client: reqwest::Client,
    config: MarketDataConfig,
}

#[derive(Debug, Deserialize)]
struct AgmarknetResponse {
    #[serde(default)]
    records: Vec<AgmarknetRecord>,
}

#[derive(Debug, Deserialize)]
struct AgmarknetRecord {
    #[serde(default)]
    commodity: String,
    #[serde(default)]
    modal_price: String,
}

impl MarketDataClient {
    pub fn new(config: MarketDataConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current modal prices keyed by lowercase commodity name.
    /// Unparseable price fields are skipped.
    pub async fn fetch_prices(&self) -> Result<HashMap<String, f64>> {
        let url = format!(
            "{}?api-key={}&format=json&limit=100",
            API_BASE_URL, self.config.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!("Agmarknet: {}", e))
        })?;

        if !response.status().is_success() {
            return Err(FarmOpsError::DataSourceUnavailable(format!(
                "Agmarknet returned {}",
                response.status()
            )));
        }

        let data: AgmarknetResponse = response.json().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!(
                "Failed to parse Agmarknet response: {}",
                e
            ))
        })?;

        let mut prices = HashMap::new();
        for record in data.records {
            let commodity = record.commodity.to_lowercase();
            if commodity.is_empty() {
                continue;
            }
            if let Ok(price) = record.modal_price.parse::<f64>() {
                if price > 0.0 {
                    prices.entry(commodity).or_insert(price);
                }
            }
        }

        if prices.is_empty() {
            return Err(FarmOpsError::DataSourceUnavailable(
                "Agmarknet returned no usable price records".to_string(),
            ));
        }

        Ok(prices)
    }

    /// Test connection to the Agmarknet API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}?api-key={}&format=json&limit=1",
            API_BASE_URL, self.config.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!("Agmarknet: {}", e))
        })?;

        Ok(response.status().is_success())
    }
}

/// Simulated prices when no API key is configured: reference price nudged by
/// a bounded market factor per crop.
pub fn simulated_prices(table: &CropTable, rng: &mut impl Rng) -> HashMap<String, f64> {
    table
        .iter()
        .map(|crop| {
            let factor = rng.gen_range(0.92..=1.08);
            (crop.name.clone(), crop.unit_price * factor)
        })
        .collect()
}
