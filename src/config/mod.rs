use crate::ClassifyError;
use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Prefix for environment overrides, e.g. `APP_API__PORT=8080`
const ENV_PREFIX: &str = "APP";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub facts: FactsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactsConfig {
    /// Whether classifications are enriched with a fun fact
    pub enabled: bool,
    /// Base URL of the fact service; lookups go to `<base_url>/{n}/math`
    pub base_url: String,
    /// Upper bound for a single lookup, in milliseconds
    pub timeout_ms: u64,
}

impl FactsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional `config.toml` and the environment.
    pub fn load() -> Result<Self, ClassifyError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("api.host", "127.0.0.1")
            .and_then(|b| b.set_default("api.port", 3000_i64))
            .and_then(|b| b.set_default("facts.enabled", true))
            .and_then(|b| b.set_default("facts.base_url", "http://numbersapi.com"))
            .and_then(|b| b.set_default("facts.timeout_ms", 3000_i64))
            .map_err(|e| ClassifyError::ConfigError(format!("Invalid default: {}", e)))?
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ClassifyError::ConfigError(format!("Failed to load config: {}", e)))?;

        let config: AppConfig = config
            .try_deserialize()
            .map_err(|e| ClassifyError::ConfigError(format!("Invalid config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load the configuration once and keep it for the lifetime of the process.
    pub fn init() -> Result<&'static Self, ClassifyError> {
        if let Some(config) = CONFIG.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(CONFIG.get_or_init(|| config))
    }

    fn validate(&self) -> Result<(), ClassifyError> {
        if self.facts.enabled {
            url::Url::parse(&self.facts.base_url).map_err(|e| {
                ClassifyError::ConfigError(format!("Invalid facts.base_url: {}", e))
            })?;
            if self.facts.timeout_ms == 0 {
                return Err(ClassifyError::ConfigError(
                    "facts.timeout_ms must be greater than zero".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Get socket address for API server
    pub fn api_addr(&self) -> Result<SocketAddr, ClassifyError> {
        let ip = IpAddr::from_str(&self.api.host)
            .map_err(|e| ClassifyError::ConfigError(format!("Invalid API host: {}", e)))?;
        Ok(SocketAddr::new(ip, self.api.port))
    }
}
