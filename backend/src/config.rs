//! Configuration management for the Pranata Mangsa server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with MANGSA_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// JWT authentication configuration
    pub jwt: JwtConfig,

    /// The single dashboard account
    pub auth: AuthConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Season prediction backend configuration
    pub prediction: PredictionConfig,

    /// Outbound HTTP policy shared by both gateways
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    /// Secret key for signing JWT tokens
    pub secret: String,

    /// Access token expiration in seconds
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Login name
    pub username: String,

    /// Plain password, hashed at startup when no hash is configured
    pub password: Option<String>,

    /// bcrypt hash of the password
    pub password_hash: Option<String>,

    /// Name shown on the dashboard
    pub display_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,

    /// Weather API key
    pub api_key: String,

    /// Provider language for condition descriptions
    pub language: String,

    /// Optional local backend serving `/weather-data`
    pub backend_proxy_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Base URL of the LVQ prediction service
    pub api_base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Extra attempts after the first failure
    pub max_retries: u32,

    /// Delay unit between attempts, multiplied by the attempt number
    pub retry_backoff_ms: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MANGSA_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("jwt.secret", "development-secret-key")?
            .set_default("jwt.access_token_expiry", 86400)?
            .set_default("auth.username", "petani")?
            .set_default("auth.password", "petani123")?
            .set_default("auth.display_name", "Petani Indonesia")?
            .set_default("weather.api_endpoint", "https://api.openweathermap.org/data/2.5")?
            .set_default("weather.api_key", "")?
            .set_default("weather.language", "id")?
            .set_default("prediction.api_base_url", "http://127.0.0.1:5000")?
            .set_default("http.timeout_secs", 15)?
            .set_default("http.max_retries", 2)?
            .set_default("http.retry_backoff_ms", 500)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MANGSA_ prefix)
            .add_source(
                Environment::with_prefix("MANGSA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Config = config.try_deserialize()?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        shared::validate_username(&self.auth.username)
            .map_err(|e| ConfigError::Message(format!("auth.username: {}", e)))?;

        match (&self.auth.password, &self.auth.password_hash) {
            (_, Some(_)) => {}
            (Some(password), None) => shared::validate_password(password)
                .map_err(|e| ConfigError::Message(format!("auth.password: {}", e)))?,
            (None, None) => {
                return Err(ConfigError::Message(
                    "either auth.password or auth.password_hash must be set".to_string(),
                ))
            }
        }

        if self.environment == "production" && self.jwt.secret == "development-secret-key" {
            return Err(ConfigError::Message(
                "jwt.secret must be changed in production".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
