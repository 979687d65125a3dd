use crate::config::OllamaConfig;
use crate::error::{FarmOpsError, Result};
use crate::models::WeatherObservation;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::warn;

/// Optional situational context attached to a chat question.
#[derive(Debug, Clone, Default)]
pub struct ChatContext {
    pub weather: Option<WeatherObservation>,
    pub soil_moisture_pct: Option<f64>,
    pub soil_ph: Option<f64>,
    pub crop: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Ollama,
    RuleBased,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    pub source: ReplySource,
    pub model: String,
}

/// Ollama availability probe result for the `check` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaStatus {
    pub available: bool,
    pub models: Vec<String>,
    pub status: String,
}

pub struct OllamaClient {
    client: reqwest::Client,
    config: OllamaConfig,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    #[serde(default)]
    models: Vec<OllamaModelTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Ask the local Ollama instance for a completion.
    pub async fn generate(&self, question: &str, context: &ChatContext) -> Result<String> {
        let url = format!("{}/api/generate", self.config.url);
        let prompt = format!(
            "{}\n\nUser Question: {}\n\nResponse:",
            system_prompt(context),
            question
        );

        let payload = json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": 0.7,
                "top_p": 0.9,
            }
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| FarmOpsError::DataSourceUnavailable(format!("Ollama: {}", e)))?;

        if !response.status().is_success() {
            return Err(FarmOpsError::DataSourceUnavailable(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        let body: OllamaGenerateResponse = response.json().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(body.response.trim().to_string())
    }

    /// Probe the Ollama tags endpoint and list installed models.
    pub async fn check_status(&self) -> OllamaStatus {
        let url = format!("{}/api/tags", self.config.url);

        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                match response.json::<OllamaTagsResponse>().await {
                    Ok(tags) => OllamaStatus {
                        available: true,
                        models: tags.models.into_iter().map(|m| m.name).collect(),
                        status: "Connected".to_string(),
                    },
                    Err(e) => OllamaStatus {
                        available: false,
                        models: Vec::new(),
                        status: format!("Malformed response: {}", e),
                    },
                }
            }
            Ok(response) => OllamaStatus {
                available: false,
                models: Vec::new(),
                status: format!("HTTP error {}", response.status()),
            },
            Err(e) => OllamaStatus {
                available: false,
                models: Vec::new(),
                status: format!("Connection failed: {}", e),
            },
        }
    }
}

fn system_prompt(context: &ChatContext) -> String {
    let mut prompt = String::from(
        "You are an expert agricultural advisor with deep knowledge of:\n\
         - Crop cultivation and management\n\
         - Soil health and fertilization\n\
         - Irrigation and water management\n\
         - Pest and disease control\n\
         - Market analysis and farming economics\n\
         - Sustainable farming practices\n\n\
         Provide practical, actionable advice suitable for farmers. Be specific and include:\n\
         - Clear recommendations\n\
         - Reasoning behind suggestions\n\
         - Potential risks or considerations\n\
         - Cost-effective solutions when possible\n\n\
         Keep responses concise but comprehensive.",
    );

    let mut conditions = String::new();
    if let Some(weather) = &context.weather {
        conditions.push_str(&format!("- Temperature: {:.1}°C\n", weather.temperature_c));
        conditions.push_str(&format!("- Humidity: {:.0}%\n", weather.humidity_pct));
        conditions.push_str(&format!("- Weather: {}\n", weather.description));
    }
    if let Some(moisture) = context.soil_moisture_pct {
        conditions.push_str(&format!("- Soil Moisture: {:.0}%\n", moisture));
    }
    if let Some(ph) = context.soil_ph {
        conditions.push_str(&format!("- Soil pH: {:.1}\n", ph));
    }
    if let Some(crop) = &context.crop {
        conditions.push_str(&format!("- Current Crop: {}\n", crop));
    }

    if !conditions.is_empty() {
        prompt.push_str("\n\nCurrent Conditions:\n");
        prompt.push_str(&conditions);
    }

    prompt
}

/// Keyword-scored canned responses used when Ollama is unreachable.
#[derive(Debug, Default)]
pub struct RuleBasedResponder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Weather,
    Soil,
    Irrigation,
    Pest,
    Crop,
    Market,
    General,
}

impl RuleBasedResponder {
    pub fn new() -> Self {
        Self
    }

    pub fn respond(
        &self,
        question: &str,
        context: &ChatContext,
        rng: &mut impl Rng,
    ) -> String {
        let question = question.to_lowercase();
        let topic = Self::identify_topic(&question);

        let pool = Self::responses(topic);
        let mut response = pool[rng.gen_range(0..pool.len())].to_string();

        let contextual = Self::contextual_additions(topic, context);
        if !contextual.is_empty() {
            response.push_str("\n\n");
            response.push_str(&contextual);
        }

        if let Some(advice) = Self::specific_advice(&question) {
            response.push_str("\n\nSpecific advice: ");
            response.push_str(advice);
        }

        response
    }

    /// Highest keyword-hit count wins; ties resolve in declaration order.
    fn identify_topic(question: &str) -> Topic {
        let keyword_sets: &[(Topic, &[&str])] = &[
            (Topic::Weather, &["weather", "rain", "temperature", "climate", "season"]),
            (Topic::Soil, &["soil", "ph", "nutrient", "fertilizer", "compost", "organic"]),
            (Topic::Irrigation, &["water", "irrigation", "moisture", "drought", "watering"]),
            (Topic::Pest, &["pest", "insect", "disease", "fungus", "spray", "control"]),
            (Topic::Crop, &["crop", "plant", "seed", "variety", "cultivation", "harvest"]),
            (Topic::Market, &["price", "market", "sell", "profit", "cost", "economics"]),
        ];

        let mut best = (Topic::General, 0usize);
        for (topic, keywords) in keyword_sets {
            let score = keywords.iter().filter(|k| question.contains(*k)).count();
            if score > best.1 {
                best = (*topic, score);
            }
        }
        best.0
    }

    fn responses(topic: Topic) -> &'static [&'static str] {
        match topic {
            Topic::Weather => &[
                "Weather is crucial for farming. Monitor temperature, rainfall, and humidity regularly.",
                "Check local weather forecasts daily to plan irrigation and field activities.",
                "Extreme weather can damage crops - prepare protective measures in advance.",
            ],
            Topic::Soil => &[
                "Good soil health is the foundation of successful farming. Test pH and nutrients regularly.",
                "Maintain soil pH between 6.0-7.5 for most crops. Add lime if too acidic, sulfur if too alkaline.",
                "Organic matter improves soil structure. Add compost or well-rotted manure annually.",
            ],
            Topic::Irrigation => &[
                "Water crops early morning or late evening to reduce evaporation losses.",
                "Check soil moisture before irrigating. Overwatering can be as harmful as underwatering.",
                "Drip irrigation is most efficient, saving 30-50% water compared to flood irrigation.",
            ],
            Topic::Pest => &[
                "Regular field inspection helps detect pest problems early when they're easier to control.",
                "Use integrated pest management (IPM) - combine biological, cultural, and chemical methods.",
                "Encourage beneficial insects by planting diverse crops and avoiding broad-spectrum pesticides.",
            ],
            Topic::Crop => &[
                "Choose crops suitable for your climate, soil type, and market demand.",
                "Rotate crops to break pest cycles and maintain soil fertility.",
                "Plant disease-resistant varieties when available to reduce pesticide use.",
            ],
            Topic::Market => &[
                "Study market prices and demand before deciding what crops to grow.",
                "Diversify crops to spread risk and ensure steady income throughout the year.",
                "Consider value-addition like processing or direct marketing for better profits.",
            ],
            Topic::General => &[
                "Farming success depends on good planning, regular monitoring, and timely actions.",
                "Keep detailed records of activities, inputs, and yields to improve decision-making.",
                "Stay updated with latest agricultural techniques and government schemes.",
                "Join farmer groups or cooperatives for better access to inputs and markets.",
            ],
        }
    }

    fn contextual_additions(topic: Topic, context: &ChatContext) -> String {
        let mut additions = Vec::new();

        if topic == Topic::Irrigation {
            if let Some(moisture) = context.soil_moisture_pct {
                if moisture < 30.0 {
                    additions.push(format!(
                        "Your current soil moisture is {:.0}% - irrigation is needed soon.",
                        moisture
                    ));
                } else if moisture > 70.0 {
                    additions.push(format!(
                        "Your soil moisture is {:.0}% - no irrigation needed currently.",
                        moisture
                    ));
                }
            }
        }

        if topic == Topic::Weather {
            if let Some(weather) = &context.weather {
                if weather.temperature_c > 35.0 {
                    additions.push(
                        "High temperature detected - ensure adequate irrigation and shade."
                            .to_string(),
                    );
                } else if weather.temperature_c < 10.0 {
                    additions
                        .push("Low temperature - protect crops from frost damage.".to_string());
                }
            }
        }

        if topic == Topic::Soil {
            if let Some(ph) = context.soil_ph {
                if ph < 6.0 {
                    additions.push(format!(
                        "Your soil pH is {:.1} (acidic) - consider adding lime.",
                        ph
                    ));
                } else if ph > 8.0 {
                    additions.push(format!(
                        "Your soil pH is {:.1} (alkaline) - consider adding sulfur.",
                        ph
                    ));
                }
            }
        }

        additions.join(" ")
    }

    fn specific_advice(question: &str) -> Option<&'static str> {
        let advice: &[(&str, &str)] = &[
            ("when to plant", "Plant timing depends on your location and crop. Kharif crops (June-July), Rabi crops (October-December), Zaid crops (March-April)."),
            ("how much water", "Water requirements vary by crop and growth stage. Generally, 2-3 inches per week during growing season."),
            ("fertilizer amount", "Apply fertilizers based on soil test. Typical NPK ratio: 4:2:1 for most crops."),
            ("pest control", "Use IPM approach: monitor regularly, use biological controls first, chemicals as last resort."),
            ("soil preparation", "Plow 2-3 times, add organic matter, level the field, and ensure proper drainage."),
            ("harvest time", "Harvest when crops reach physiological maturity. Look for color change, moisture content, and field drying."),
        ];

        advice
            .iter()
            .find(|(key, _)| question.contains(key))
            .map(|(_, text)| *text)
    }
}

/// Chat front end: Ollama when configured and reachable, rule-based otherwise.
pub struct ChatService {
    ollama: Option<OllamaClient>,
    fallback: RuleBasedResponder,
}

impl ChatService {
    pub fn new(ollama_config: Option<OllamaConfig>) -> Self {
        Self {
            ollama: ollama_config.map(OllamaClient::new),
            fallback: RuleBasedResponder::new(),
        }
    }

    pub async fn ask(
        &self,
        question: &str,
        context: &ChatContext,
        rng: &mut impl Rng,
    ) -> ChatReply {
        if let Some(ollama) = &self.ollama {
            match ollama.generate(question, context).await {
                Ok(response) => {
                    return ChatReply {
                        response,
                        source: ReplySource::Ollama,
                        model: ollama.model().to_string(),
                    };
                }
                Err(e) => {
                    warn!("Ollama unavailable, using rule-based responder: {}", e);
                }
            }
        }

        ChatReply {
            response: self.fallback.respond(question, context, rng),
            source: ReplySource::RuleBased,
            model: "rule_based".to_string(),
        }
    }

    pub async fn check_status(&self) -> OllamaStatus {
        match &self.ollama {
            Some(ollama) => ollama.check_status().await,
            None => OllamaStatus {
                available: false,
                models: Vec::new(),
                status: "Not configured".to_string(),
            },
        }
    }
}
