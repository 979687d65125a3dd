pub mod fast2sms;
pub mod market;
pub mod ollama;
pub mod openweathermap;

pub use fast2sms::Fast2SmsClient;
pub use market::MarketDataClient;
pub use ollama::{ChatContext, ChatReply, ChatService, OllamaClient, ReplySource};
pub use openweathermap::OpenWeatherMapClient;
