use crate::config::OpenWeatherMapConfig;
use crate::error::{FarmOpsError, Result};
use crate::models::WeatherObservation;
use rand::Rng;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmWeatherResponse {
    main: OwmMain,
    wind: OwmWind,
    weather: Vec<OwmWeather>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    /// Metres per second with metric units.
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    description: String,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions from OpenWeatherMap.
    pub async fn fetch_current(&self) -> Result<WeatherObservation> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL, self.config.location, self.config.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmOpsError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmWeatherResponse = response.json().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(convert_response(owm_response))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL, self.config.location, self.config.api_key
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
        })?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OwmWeatherResponse) -> WeatherObservation {
    WeatherObservation {
        temperature_c: response.main.temp,
        humidity_pct: response.main.humidity,
        // m/s to km/h
        wind_speed_kmh: response.wind.speed * 3.6,
        description: response
            .weather
            .first()
            .map(|w| w.description.clone())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

/// Plausible weather when no API key is configured or the request fails.
pub fn simulated_observation(rng: &mut impl Rng) -> WeatherObservation {
    let descriptions = ["Clear sky", "Partly cloudy", "Overcast", "Light rain"];
    WeatherObservation {
        temperature_c: rng.gen_range(20.0..=35.0),
        humidity_pct: rng.gen_range(40.0..=80.0),
        wind_speed_kmh: rng.gen_range(5.0..=20.0),
        description: descriptions[rng.gen_range(0..descriptions.len())].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            location: "Delhi".to_string(),
            enabled: true,
        }
    }

    #[test]
    fn client_creation() {
        let client = OpenWeatherMapClient::new(sample_config());
        assert!(client.config.enabled);
    }

    #[test]
    fn converts_wind_speed_to_kmh() {
        let response = OwmWeatherResponse {
            main: OwmMain {
                temp: 28.5,
                humidity: 65.0,
            },
            wind: OwmWind { speed: 5.0 },
            weather: vec![OwmWeather {
                description: "scattered clouds".to_string(),
            }],
        };
        let observation = convert_response(response);
        assert!((observation.wind_speed_kmh - 18.0).abs() < 1e-9);
        assert_eq!(observation.description, "scattered clouds");
    }

    #[test]
    fn simulated_observation_stays_in_plausible_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let obs = simulated_observation(&mut rng);
            assert!((20.0..=35.0).contains(&obs.temperature_c));
            assert!((40.0..=80.0).contains(&obs.humidity_pct));
            assert!((5.0..=20.0).contains(&obs.wind_speed_kmh));
            assert!(!obs.description.is_empty());
        }
    }
}
