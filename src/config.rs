use crate::error::{FarmOpsError, Result};
use dialoguer::{Input, Password};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub farm: FarmConfig,
    pub openweathermap: Option<OpenWeatherMapConfig>,
    pub market: Option<MarketDataConfig>,
    pub fast2sms: Option<Fast2SmsConfig>,
    pub ollama: Option<OllamaConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FarmConfig {
    pub name: String,
    pub location: String,
    pub area_hectares: f64,
    pub primary_crop: String,
    pub soil_type: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
    pub location: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .field("location", &self.location)
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct MarketDataConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for MarketDataConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Clone, Deserialize, Serialize)]
pub struct Fast2SmsConfig {
    pub api_key: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl std::fmt::Debug for Fast2SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fast2SmsConfig")
            .field("api_key", &"[REDACTED]")
            .field("enabled", &self.enabled)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama2".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(FarmOpsError::Config(format!(
                "Config file not found at {:?}. Run `farmops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| FarmOpsError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Load the config if one exists, otherwise fall back to defaults. All
    /// assessment commands work offline, so a missing config is not fatal.
    pub fn load_or_default(config_override: Option<PathBuf>) -> Self {
        if Self::exists(config_override.as_ref()) {
            match Self::load(config_override) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config, using defaults: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("farmops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| FarmOpsError::Config("Cannot determine config directory".into()))?
            .join("farmops")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/farmops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmOpsError::Config("Cannot determine config directory".into()))?
            .join("farmops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up FarmOps!");
        println!();

        // --- Farm Profile ---
        println!("Farm Profile");
        let farm_name: String = Input::new()
            .with_prompt("  Farm name")
            .default("Main Farm".into())
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let location: String = Input::new()
            .with_prompt("  Location (city for weather lookups)")
            .default("Delhi".into())
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let area_hectares: f64 = Input::new()
            .with_prompt("  Area (hectares)")
            .default(2.0)
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let primary_crop: String = Input::new()
            .with_prompt("  Primary crop")
            .default("wheat".into())
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let phone_number: String = Input::new()
            .with_prompt("  Phone number for SMS alerts (blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- OpenWeatherMap (optional) ---
        println!("OpenWeatherMap (leave API key blank to use simulated weather)");
        let owm_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let openweathermap = if owm_api_key.is_empty() {
            None
        } else {
            Some(OpenWeatherMapConfig {
                api_key: owm_api_key,
                location: location.clone(),
                enabled: true,
            })
        };

        println!();

        // --- Market data (optional) ---
        println!("Agmarknet market data (leave API key blank to use simulated prices)");
        let market_api_key: String = Input::new()
            .with_prompt("  API key")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let market = if market_api_key.is_empty() {
            None
        } else {
            Some(MarketDataConfig {
                api_key: market_api_key,
                enabled: true,
            })
        };

        println!();

        // --- Fast2SMS (optional) ---
        println!("Fast2SMS alerts (leave API key blank for demo mode)");
        let sms_api_key: String = Password::new()
            .with_prompt("  API key")
            .allow_empty_password(true)
            .interact()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let fast2sms = if sms_api_key.is_empty() {
            None
        } else {
            Some(Fast2SmsConfig {
                api_key: sms_api_key,
                enabled: true,
            })
        };

        println!();

        // --- Ollama (optional) ---
        println!("Ollama chat assistant (blank URL uses http://localhost:11434)");
        let ollama_url: String = Input::new()
            .with_prompt("  URL")
            .default(default_ollama_url())
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        let ollama_model: String = Input::new()
            .with_prompt("  Model")
            .default(default_ollama_model())
            .interact_text()
            .map_err(|e| FarmOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            farm: FarmConfig {
                name: farm_name,
                location,
                area_hectares,
                primary_crop: primary_crop.to_lowercase(),
                soil_type: Some("Loamy".into()),
                phone_number: if phone_number.is_empty() {
                    None
                } else {
                    Some(phone_number)
                },
            },
            openweathermap,
            market,
            fast2sms,
            ollama: Some(OllamaConfig {
                url: ollama_url,
                model: ollama_model,
            }),
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| FarmOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# FarmOps Configuration\n# Generated by `farmops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("FARMOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| FarmOpsError::Config("Cannot determine data directory".into()))?
            .join("farmops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("farmops.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            farm: FarmConfig {
                name: "Main Farm".into(),
                location: "Delhi".into(),
                area_hectares: 2.0,
                primary_crop: "wheat".into(),
                soil_type: Some("Loamy".into()),
                phone_number: None,
            },
            openweathermap: None,
            market: None,
            fast2sms: None,
            ollama: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = r#"
farm:
  name: Test Farm
  location: Pune
  area_hectares: 1.5
  primary_crop: rice
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.farm.name, "Test Farm");
        assert_eq!(config.farm.primary_crop, "rice");
        assert!(config.openweathermap.is_none());
        assert!(config.fast2sms.is_none());
    }

    #[test]
    fn parse_full_config_with_defaults() {
        let yaml = r#"
farm:
  name: Test Farm
  location: Pune
  area_hectares: 1.5
  primary_crop: rice
openweathermap:
  api_key: abc123
  location: Pune
fast2sms:
  api_key: xyz
ollama:
  model: llama3
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let owm = config.openweathermap.unwrap();
        assert!(owm.enabled);
        let ollama = config.ollama.unwrap();
        assert_eq!(ollama.url, "http://localhost:11434");
        assert_eq!(ollama.model, "llama3");
    }

    #[test]
    fn env_var_substitution() {
        std::env::set_var("FARMOPS_TEST_KEY", "secret-value");
        let content = "api_key: ${FARMOPS_TEST_KEY}\nother: ${FARMOPS_UNSET_VAR}";
        let substituted = Config::substitute_env_vars(content);
        assert!(substituted.contains("secret-value"));
        // Unset variables are left as-is
        assert!(substituted.contains("${FARMOPS_UNSET_VAR}"));
    }

    #[test]
    fn debug_redacts_api_keys() {
        let owm = OpenWeatherMapConfig {
            api_key: "supersecret".into(),
            location: "Delhi".into(),
            enabled: true,
        };
        let debug = format!("{:?}", owm);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("[REDACTED]"));

        let sms = Fast2SmsConfig {
            api_key: "smskey".into(),
            enabled: true,
        };
        let debug = format!("{:?}", sms);
        assert!(!debug.contains("smskey"));
    }
}
