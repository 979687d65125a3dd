mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;

use chrono::Local;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use datasources::{
    fast2sms, market, ollama::ChatContext, openweathermap, ChatService, Fast2SmsClient,
    MarketDataClient, OpenWeatherMapClient,
};
use db::Database;
use error::{FarmOpsError, Result};
use logic::{IrrigationModel, PriceModel, RotationModel, SoilQualityModel, YieldModel};
use models::{
    CropTable, EnvironmentalReading, GrowingConditions, GrowthStage, IrrigationMethod, Season,
    SoilSample, SoilTexture, WeatherObservation,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    match cli.command {
        Commands::Init => {
            let (_, path) = Config::setup_interactive()?;
            println!("FarmOps is ready. Config: {}", path.display());
            Ok(())
        }
        Commands::Check => check(cli.config, cli.data_dir).await,
        Commands::Soil(args) => {
            let sample = SoilSample::new(
                args.ph,
                args.nitrogen,
                args.phosphorus,
                args.potassium,
                args.organic_matter,
            );
            let assessment = SoilQualityModel::new().score(&sample);
            print_json(&assessment)
        }
        Commands::Irrigation(args) => {
            let config = Config::load_or_default(cli.config);
            let crop = args.crop.clone().unwrap_or(config.farm.primary_crop.clone());

            if let Some(days) = args.budget_days {
                let method = IrrigationMethod::from_str(&args.method).ok_or_else(|| {
                    FarmOpsError::InvalidData(format!("Unknown irrigation method: {}", args.method))
                })?;
                let area = args.area.unwrap_or(config.farm.area_hectares);
                let budget = IrrigationModel::new().water_budget(&crop, area, method, days);
                return print_json(&budget);
            }

            let stage = GrowthStage::from_str(&args.stage)
                .ok_or_else(|| FarmOpsError::InvalidData(format!("Unknown growth stage: {}", args.stage)))?;
            let texture = SoilTexture::from_str(&args.texture).unwrap_or_else(|| {
                warn!("Unknown soil texture '{}', assuming loamy", args.texture);
                SoilTexture::Loamy
            });

            let reading = if args.live {
                let weather = fetch_weather(&config, &mut rng).await;
                EnvironmentalReading {
                    temperature_c: weather.temperature_c,
                    humidity_pct: weather.humidity_pct,
                    wind_speed_kmh: weather.wind_speed_kmh,
                    soil_moisture_pct: args.moisture,
                    days_since_rain: args.days_since_rain,
                }
            } else {
                EnvironmentalReading {
                    temperature_c: args.temperature,
                    humidity_pct: args.humidity,
                    wind_speed_kmh: args.wind,
                    soil_moisture_pct: args.moisture,
                    days_since_rain: args.days_since_rain,
                }
            };

            let assessment = IrrigationModel::new().assess(&crop, &reading, stage, texture);
            print_json(&assessment)
        }
        Commands::Yield(args) => {
            let config = Config::load_or_default(cli.config);
            let crop = args.crop.clone().unwrap_or(config.farm.primary_crop.clone());
            let area = args.area.unwrap_or(config.farm.area_hectares);

            let conditions = GrowingConditions {
                soil_quality: args.soil_quality,
                rainfall_mm: args.rainfall,
                temperature_c: args.temperature,
                humidity_pct: args.humidity,
                nitrogen_kg_ha: args.nitrogen,
                phosphorus_kg_ha: args.phosphorus,
                potassium_kg_ha: args.potassium,
            };

            let prediction = YieldModel::new().predict(&crop, &conditions, area, &mut rng)?;
            print_json(&prediction)
        }
        Commands::Price(args) => {
            let config = Config::load_or_default(cli.config);
            let crop = args.crop.clone().unwrap_or(config.farm.primary_crop.clone());
            let area = args.area.unwrap_or(config.farm.area_hectares);

            let table = open_crop_table(cli.data_dir.as_ref())?;
            let mut profile = table
                .get(&crop)
                .cloned()
                .ok_or_else(|| FarmOpsError::InvalidData(format!("Price data not available for {}", crop)))?;

            if args.live {
                let prices = fetch_prices(&config, &table, &mut rng).await;
                if let Some(price) = prices.get(&profile.name) {
                    profile.unit_price = *price;
                }
            }

            let model = PriceModel::new();
            let today = Local::now().date_naive();
            let outlook = model.forecast(&profile, args.months, today, &mut rng);
            let report = model.profitability(&profile, area, args.selling_month);
            let harvest = args
                .planting_date
                .map(|planting| model.harvest_outlook(&profile, planting, today));

            print_json(&json!({
                "outlook": outlook,
                "profitability": report,
                "harvest": harvest,
            }))
        }
        Commands::Rotation(args) => {
            let config = Config::load_or_default(cli.config);
            let table = open_crop_table(cli.data_dir.as_ref())?;
            let model = RotationModel::new();

            if let Some(sequence) = args.analyze {
                let sequence: Vec<String> =
                    sequence.iter().map(|c| c.trim().to_lowercase()).collect();
                let analysis = model.analyze(&table, &sequence);
                return print_json(&analysis);
            }

            let crop = args.crop.clone().unwrap_or(config.farm.primary_crop.clone());
            let season = Season::from_str(&args.season)
                .ok_or_else(|| FarmOpsError::InvalidData(format!("Unknown season: {}", args.season)))?;

            let advice = model.suggest(&table, &crop, args.soil_quality, season, &mut rng);
            print_json(&advice)
        }
        Commands::Ask(args) => {
            let config = Config::load_or_default(cli.config);
            let service = ChatService::new(config.ollama.clone());

            let context = ChatContext {
                weather: None,
                soil_moisture_pct: args.moisture,
                soil_ph: args.ph,
                crop: args.crop.clone().or(Some(config.farm.primary_crop.clone())),
            };

            let reply = service.ask(&args.question, &context, &mut rng).await;
            print_json(&reply)
        }
        Commands::Notify(args) => {
            let config = Config::load_or_default(cli.config);
            let phone = args
                .phone
                .clone()
                .or(config.farm.phone_number.clone())
                .ok_or_else(|| {
                    FarmOpsError::Config(
                        "No phone number configured. Pass --phone or run `farmops init`.".into(),
                    )
                })?;

            let confirmation = match &config.fast2sms {
                Some(sms_config) if sms_config.enabled => {
                    let client = Fast2SmsClient::new(sms_config.clone());
                    match client.send_alert(&phone, &args.message).await {
                        Ok(confirmation) => confirmation,
                        Err(e) => {
                            warn!("SMS delivery failed, reporting demo mode: {}", e);
                            fast2sms::demo_confirmation(&phone, &args.message)
                        }
                    }
                }
                _ => fast2sms::demo_confirmation(&phone, &args.message),
            };

            println!("{}", confirmation);
            Ok(())
        }
    }
}

/// Validate config, seed the database, and probe each configured provider.
async fn check(config_override: Option<std::path::PathBuf>, data_dir: Option<std::path::PathBuf>) -> Result<()> {
    let config = Config::load(config_override)?;
    println!("Config: OK ({})", config.farm.name);

    let table = open_crop_table(data_dir.as_ref())?;
    println!("Database: OK ({} crops seeded)", table.len());

    match &config.openweathermap {
        Some(owm) if owm.enabled => {
            let client = OpenWeatherMapClient::new(owm.clone());
            match client.test_connection().await {
                Ok(true) => println!("Weather: OK"),
                Ok(false) => println!("Weather: OFFLINE (authentication failed)"),
                Err(e) => println!("Weather: OFFLINE ({})", e),
            }
        }
        _ => println!("Weather: not configured (simulated data)"),
    }

    match &config.market {
        Some(market) if market.enabled => {
            let client = MarketDataClient::new(market.clone());
            match client.test_connection().await {
                Ok(true) => println!("Market: OK"),
                Ok(false) => println!("Market: OFFLINE (authentication failed)"),
                Err(e) => println!("Market: OFFLINE ({})", e),
            }
        }
        _ => println!("Market: not configured (simulated prices)"),
    }

    match &config.fast2sms {
        Some(sms) if sms.enabled => println!("SMS: configured"),
        _ => println!("SMS: not configured (demo mode)"),
    }

    let chat = ChatService::new(config.ollama.clone());
    let status = chat.check_status().await;
    if status.available {
        println!("Ollama: {} (models: {})", status.status, status.models.join(", "));
    } else {
        println!("Ollama: {} (rule-based fallback)", status.status);
    }

    Ok(())
}

/// Live weather when configured and reachable, simulated otherwise. Transport
/// failures never surface to the caller.
async fn fetch_weather(config: &Config, rng: &mut StdRng) -> WeatherObservation {
    if let Some(owm) = &config.openweathermap {
        if owm.enabled {
            let client = OpenWeatherMapClient::new(owm.clone());
            match client.fetch_current().await {
                Ok(observation) => return observation,
                Err(e) => warn!("Weather provider unavailable, simulating: {}", e),
            }
        }
    }
    openweathermap::simulated_observation(rng)
}

/// Live market prices when configured and reachable, simulated otherwise.
async fn fetch_prices(
    config: &Config,
    table: &CropTable,
    rng: &mut StdRng,
) -> std::collections::HashMap<String, f64> {
    if let Some(market_config) = &config.market {
        if market_config.enabled {
            let client = MarketDataClient::new(market_config.clone());
            match client.fetch_prices().await {
                Ok(prices) => return prices,
                Err(e) => warn!("Market provider unavailable, simulating: {}", e),
            }
        }
    }
    market::simulated_prices(table, rng)
}

fn open_crop_table(data_dir: Option<&std::path::PathBuf>) -> Result<CropTable> {
    let db_path = Config::db_path(data_dir)?;
    let db = Database::open(&db_path)?;
    db.load_crop_table()
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
