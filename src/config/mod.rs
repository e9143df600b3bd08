use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub generator: GeneratorConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let endpoint = env::var("GROWTHLENS_GENERATOR_URL")
            .unwrap_or_else(|_| GeneratorConfig::DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidGeneratorUrl { value: endpoint });
        }

        let api_key = env::var("GROWTHLENS_GENERATOR_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            generator: GeneratorConfig { endpoint, api_key },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings for the external narrative-generation call. The transport
/// itself lives behind the `NarrativeGenerator` trait; this only carries
/// what an adapter needs to dial out.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
}

impl GeneratorConfig {
    pub const DEFAULT_ENDPOINT: &'static str =
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-flash:generateContent";

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidGeneratorUrl { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidGeneratorUrl { value } => {
                write!(
                    f,
                    "GROWTHLENS_GENERATOR_URL must be an http(s) URL, got '{}'",
                    value
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
