use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "farmops", version, about = "Farm decision support toolkit")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override SQLite data directory
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Seed for simulated data (defaults to entropy)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-run interactive setup
    Init,
    /// Validate config and test provider connections
    Check,
    /// Score a soil sample and suggest amendments
    Soil(SoilArgs),
    /// Assess irrigation need from field conditions
    Irrigation(IrrigationArgs),
    /// Estimate crop yield from growing conditions
    Yield(YieldArgs),
    /// Forecast prices and analyze profitability
    Price(PriceArgs),
    /// Suggest crop rotation for the next season
    Rotation(RotationArgs),
    /// Ask the farm advisor a question
    Ask(AskArgs),
    /// Send an SMS alert to the configured phone
    Notify(NotifyArgs),
}

#[derive(Args)]
pub struct SoilArgs {
    /// Soil pH
    #[arg(long, default_value_t = 6.5)]
    pub ph: f64,

    /// Nitrogen, mg/kg
    #[arg(short, long, default_value_t = 50.0)]
    pub nitrogen: f64,

    /// Phosphorus, mg/kg
    #[arg(short, long, default_value_t = 40.0)]
    pub phosphorus: f64,

    /// Potassium, mg/kg
    #[arg(short = 'k', long, default_value_t = 300.0)]
    pub potassium: f64,

    /// Organic matter, percent
    #[arg(short, long, default_value_t = 5.0)]
    pub organic_matter: f64,
}

#[derive(Args)]
pub struct IrrigationArgs {
    /// Crop to assess (defaults to the configured primary crop)
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil moisture, percent of field capacity
    #[arg(short, long, default_value_t = 50.0)]
    pub moisture: f64,

    /// Air temperature, °C (ignored with --live)
    #[arg(short, long, default_value_t = 25.0)]
    pub temperature: f64,

    /// Relative humidity, percent (ignored with --live)
    #[arg(long, default_value_t = 50.0)]
    pub humidity: f64,

    /// Wind speed, km/h (ignored with --live)
    #[arg(short, long, default_value_t = 5.0)]
    pub wind: f64,

    /// Days since last rain
    #[arg(long, default_value_t = 3)]
    pub days_since_rain: u32,

    /// Growth stage: germination, vegetative, flowering, grain_filling, maturity
    #[arg(long, default_value = "vegetative")]
    pub stage: String,

    /// Soil texture: sandy, loamy, clay, organic
    #[arg(long, default_value = "loamy")]
    pub texture: String,

    /// Fetch live weather instead of using the flag values
    #[arg(long)]
    pub live: bool,

    /// Print a seasonal water budget over this many days instead of an assessment
    #[arg(long)]
    pub budget_days: Option<u32>,

    /// Irrigation method for the water budget: flood, furrow, sprinkler, drip, micro_sprinkler
    #[arg(long, default_value = "sprinkler")]
    pub method: String,

    /// Area for the water budget, hectares (defaults to the configured area)
    #[arg(short, long)]
    pub area: Option<f64>,
}

#[derive(Args)]
pub struct YieldArgs {
    /// Crop to estimate (defaults to the configured primary crop)
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil quality score, 0-10
    #[arg(long, default_value_t = 7.0)]
    pub soil_quality: f64,

    /// Annual rainfall, mm
    #[arg(short, long, default_value_t = 600.0)]
    pub rainfall: f64,

    /// Average temperature, °C
    #[arg(short, long, default_value_t = 25.0)]
    pub temperature: f64,

    /// Average humidity, percent
    #[arg(long, default_value_t = 65.0)]
    pub humidity: f64,

    /// Nitrogen fertilizer, kg/ha
    #[arg(short, long, default_value_t = 100.0)]
    pub nitrogen: f64,

    /// Phosphorus fertilizer, kg/ha
    #[arg(short, long, default_value_t = 50.0)]
    pub phosphorus: f64,

    /// Potassium fertilizer, kg/ha
    #[arg(short = 'k', long, default_value_t = 70.0)]
    pub potassium: f64,

    /// Farm area, hectares (defaults to the configured area)
    #[arg(short, long)]
    pub area: Option<f64>,
}

#[derive(Args)]
pub struct PriceArgs {
    /// Crop to forecast (defaults to the configured primary crop)
    #[arg(long)]
    pub crop: Option<String>,

    /// Months ahead to forecast
    #[arg(short, long, default_value_t = 6)]
    pub months: u32,

    /// Farm area for the profitability report, hectares
    #[arg(short, long)]
    pub area: Option<f64>,

    /// Planned selling month (1-12) for seasonal price adjustment
    #[arg(long)]
    pub selling_month: Option<u32>,

    /// Planting date (YYYY-MM-DD) for the harvest timing outlook
    #[arg(long)]
    pub planting_date: Option<chrono::NaiveDate>,

    /// Use live market prices when configured
    #[arg(long)]
    pub live: bool,
}

#[derive(Args)]
pub struct RotationArgs {
    /// Currently grown crop (defaults to the configured primary crop)
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil quality score, 0-10
    #[arg(long, default_value_t = 7.0)]
    pub soil_quality: f64,

    /// Next planting season: winter, monsoon, summer
    #[arg(long, default_value = "winter")]
    pub season: String,

    /// Analyze a comma-separated rotation sequence instead of suggesting
    #[arg(long, value_delimiter = ',')]
    pub analyze: Option<Vec<String>>,
}

#[derive(Args)]
pub struct AskArgs {
    /// The question for the advisor
    pub question: String,

    /// Crop context to include
    #[arg(long)]
    pub crop: Option<String>,

    /// Soil moisture context, percent
    #[arg(long)]
    pub moisture: Option<f64>,

    /// Soil pH context
    #[arg(long)]
    pub ph: Option<f64>,
}

#[derive(Args)]
pub struct NotifyArgs {
    /// The alert message
    pub message: String,

    /// Recipient phone number (defaults to the configured number)
    #[arg(long)]
    pub phone: Option<String>,
}
