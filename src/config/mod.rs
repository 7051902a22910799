use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::models::Theme;
use crate::repositories::parse_base_url;

const ENV_PREFIX: &str = "CANTEEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub feedback: FeedbackConfig,
    pub presentation: PresentationConfig,
    pub observability: ObservabilityConfig,
}

/// Endpoints of the menu backend and the recipe lookup service
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recipe_api_url")]
    pub recipe_api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackConfig {
    /// Post accepted feedback to the backend instead of only acknowledging it
    #[serde(default)]
    pub persist_feedback: bool,
    #[serde(default)]
    pub student_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresentationConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Program used to open recipe pages; URLs are printed when unset
    #[serde(default)]
    pub browser_command: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

impl Config {
    /// Load every section from `CANTEEN_*` environment variables and validate the result
    pub fn from_environment() -> Result<Self, ConfigError> {
        let config = Config {
            api: ApiConfig::from_env()?,
            feedback: FeedbackConfig::from_env()?,
            presentation: PresentationConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        };

        config.validate()?;

        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_base_url(&self.api.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("base_url: {}", e),
        })?;

        parse_base_url(&self.api.recipe_api_url).map_err(|e| ConfigError::ValidationError {
            message: format!("recipe_api_url: {}", e),
        })?;

        if self.api.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        self.presentation.theme()?;

        if let Some(command) = &self.presentation.browser_command {
            if command.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Browser command cannot be blank".to_string(),
                });
            }
        }

        if self.observability.service_name.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Service name cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Deserialize one section from the prefixed environment
fn load_section<T: DeserializeOwned>(section: &str) -> Result<T, ConfigError> {
    let settings = config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load {} config: {}", section, e),
        })?;

    settings
        .try_deserialize()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to deserialize {} config: {}", section, e),
        })
}

impl ApiConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("api")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl FeedbackConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("feedback")
    }
}

impl PresentationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("presentation")
    }

    pub fn theme(&self) -> Result<Theme, ConfigError> {
        self.theme
            .parse()
            .map_err(|message| ConfigError::ValidationError { message })
    }
}

impl ObservabilityConfig {
    fn from_env() -> Result<Self, ConfigError> {
        load_section("observability")
    }
}

// Default value functions
pub(crate) fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

pub(crate) fn default_recipe_api_url() -> String {
    "https://api.spoonacular.com".to_string()
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_theme() -> String {
    "light".to_string()
}

pub(crate) fn default_service_name() -> String {
    "canteen-menu".to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}
