use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::core::DEFAULT_MIN_SCORE;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
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
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub tour_packages: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// L1-only caching when absent
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_place_type_weight")]
    pub place_type: f64,
    #[serde(default = "default_hobby_weight")]
    pub hobby: f64,
    #[serde(default = "default_climate_weight")]
    pub climate: f64,
    #[serde(default = "default_age_fit_weight")]
    pub age_fit: f64,
    #[serde(default = "default_age_neutral_weight")]
    pub age_neutral: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            place_type: default_place_type_weight(),
            hobby: default_hobby_weight(),
            climate: default_climate_weight(),
            age_fit: default_age_fit_weight(),
            age_neutral: default_age_neutral_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        ScoringWeights {
            place_type: config.place_type,
            hobby: config.hobby,
            climate: config.climate,
            age_fit: config.age_fit,
            age_neutral: config.age_neutral,
        }
    }
}

fn default_place_type_weight() -> f64 { 40.0 }
fn default_hobby_weight() -> f64 { 30.0 }
fn default_climate_weight() -> f64 { 20.0 }
fn default_age_fit_weight() -> f64 { 10.0 }
fn default_age_neutral_weight() -> f64 { 5.0 }

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TOUR_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TOUR__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("TOUR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Apply Appwrite credentials and the Redis URL from plain environment
/// variables, so secrets never need to live in a config file
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let overrides = [
        ("appwrite.endpoint", "APPWRITE_ENDPOINT"),
        ("appwrite.api_key", "APPWRITE_API_KEY"),
        ("appwrite.project_id", "APPWRITE_PROJECT_ID"),
        ("appwrite.database_id", "APPWRITE_DATABASE_ID"),
        ("cache.redis_url", "REDIS_URL"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (key, var) in overrides {
        if let Ok(value) = env::var(var) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_recommendation_settings() {
        let settings = RecommendationSettings::default();
        assert_eq!(settings.min_score, 10.0);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "compact");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("tour-match-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080

[appwrite]
endpoint = "https://appwrite.test/v1"
api_key = "key"
project_id = "project"
database_id = "db"

[collection]
tour_packages = "tour_packages"

[recommendation]
min_score = 20.0

[recommendation.weights]
climate = 25.0
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.recommendation.min_score, 20.0);
        assert_eq!(settings.recommendation.weights.climate, 25.0);
        assert_eq!(settings.recommendation.weights.place_type, 40.0);
        assert!(settings.cache.redis_url.is_none());
    }
}
