use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::DEFAULT_MARKET_AVG_PRICE_PER_AREA;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub property_api: PropertyApiSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyApiSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    pub capacity: Option<u64>,
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_market_avg_price_per_area")]
    pub market_avg_price_per_area: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            market_avg_price_per_area: default_market_avg_price_per_area(),
        }
    }
}

fn default_market_avg_price_per_area() -> f64 { DEFAULT_MARKET_AVG_PRICE_PER_AREA }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_type_weight")]
    pub property_type: f64,
    #[serde(default = "default_amenity_weight")]
    pub amenity: f64,
    #[serde(default = "default_popularity_weight")]
    pub popularity: f64,
    #[serde(default = "default_urgency_weight")]
    pub urgency: f64,
    #[serde(default = "default_investment_weight")]
    pub investment: f64,
    #[serde(default = "default_trend_weight")]
    pub trend: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            price: default_price_weight(),
            location: default_location_weight(),
            property_type: default_type_weight(),
            amenity: default_amenity_weight(),
            popularity: default_popularity_weight(),
            urgency: default_urgency_weight(),
            investment: default_investment_weight(),
            trend: default_trend_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        ScoringWeights {
            price: w.price,
            location: w.location,
            property_type: w.property_type,
            amenity: w.amenity,
            popularity: w.popularity,
            urgency: w.urgency,
            investment: w.investment,
            trend: w.trend,
        }
    }
}

fn default_price_weight() -> f64 { 0.25 }
fn default_location_weight() -> f64 { 0.20 }
fn default_type_weight() -> f64 { 0.15 }
fn default_amenity_weight() -> f64 { 0.10 }
fn default_popularity_weight() -> f64 { 0.10 }
fn default_urgency_weight() -> f64 { 0.08 }
fn default_investment_weight() -> f64 { 0.07 }
fn default_trend_weight() -> f64 { 0.05 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ESTATE_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ESTATE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ESTATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_well_known_env(settings)?;

        let settings: Self = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings: Self = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ESTATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.scoring_weights().validate().map_err(ConfigError::Message)?;

        if self.scoring.market_avg_price_per_area <= 0.0 {
            return Err(ConfigError::Message(
                "scoring.market_avg_price_per_area must be positive".to_string(),
            ));
        }

        if self.matching.max_limit == Some(0) {
            return Err(ConfigError::Message(
                "matching.max_limit must be at least 1".to_string(),
            ));
        }

        if let (Some(default), Some(max)) = (self.matching.default_limit, self.matching.max_limit) {
            if default > max {
                return Err(ConfigError::Message(format!(
                    "matching.default_limit ({}) exceeds matching.max_limit ({})",
                    default, max
                )));
            }
        }

        Ok(())
    }
}

/// Apply the conventional unprefixed variables on top of the loaded config
///
/// `DATABASE_URL` and `PROPERTY_API_URL` win over file values when set.
fn apply_well_known_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(url) = env::var("PROPERTY_API_URL") {
        builder = builder.set_override("property_api.base_url", url)?;
    }
    if let Ok(key) = env::var("PROPERTY_API_KEY") {
        builder = builder.set_override("property_api.api_key", key)?;
    }

    builder.build()
}
