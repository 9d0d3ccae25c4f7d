//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Base URL of the external prediction service (None = built-in fallback)
    pub model_service_url: Option<String>,

    /// Timeout for model service calls in seconds
    pub model_service_timeout_secs: u64,

    /// Temperature threshold (°C) used when a request carries none
    pub default_temp_threshold: f64,

    /// Environment (development, production)
    pub environment: String,

    /// Log output format (text, json)
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            model_service_url: None,
            model_service_timeout_secs: 10,
            default_temp_threshold: 84.0,
            environment: "development".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            model_service_url: env::var("MODEL_SERVICE_URL")
                .ok()
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),

            model_service_timeout_secs: env::var("MODEL_SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(defaults.model_service_timeout_secs),

            default_temp_threshold: env::var("DEFAULT_TEMP_THRESHOLD")
                .ok()
                .and_then(|t| t.parse::<f64>().ok())
                .filter(|t| t.is_finite() && *t > 0.0)
                .unwrap_or(defaults.default_temp_threshold),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or(defaults.log_format),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
