pub mod irrigation;
pub mod price_forecast;
pub mod rotation;
pub mod soil_quality;
pub mod yield_prediction;

pub use irrigation::IrrigationModel;
pub use price_forecast::PriceModel;
pub use rotation::RotationModel;
pub use soil_quality::SoilQualityModel;
pub use yield_prediction::YieldModel;
