use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the service.
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
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub predictor: PredictorConfig,
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = env::var("PREDICTOR_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let base_url = Some(base_url.trim().trim_end_matches('/').to_string())
            .filter(|value| !value.is_empty());
        let timeout_secs = env::var("PREDICTOR_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let mode = ScoringMode::parse(
            &env::var("SCORING_MODE").unwrap_or_else(|_| "deterministic".to_string()),
        )?;
        let seed = match env::var("SCORING_SEED") {
            Ok(raw) => Some(raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidSeed)?),
            Err(_) => None,
        };

        let selection_path = env::var("SELECTION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/selection.json"));
        let catalogue_csv = env::var("CATALOGUE_CSV_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            predictor: PredictorConfig {
                base_url,
                timeout_secs,
            },
            scoring: ScoringConfig { mode, seed },
            storage: StorageConfig {
                selection_path,
                catalogue_csv,
            },
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the remote prediction service. `base_url` is `None` when the
/// service is disabled and every submission goes straight to the local catalogue.
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl PredictorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringMode {
    Deterministic,
    Jitter,
}

impl ScoringMode {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "deterministic" | "midpoint" => Ok(Self::Deterministic),
            "jitter" | "random" => Ok(Self::Jitter),
            other => Err(ConfigError::InvalidScoringMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub mode: ScoringMode,
    pub seed: Option<u64>,
}

/// Files backing the selection store and an optional replacement catalogue.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub selection_path: PathBuf,
    pub catalogue_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimeout,
    InvalidScoringMode(String),
    InvalidSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimeout => {
                write!(f, "PREDICTOR_API_TIMEOUT_SECS must be a whole number of seconds")
            }
            ConfigError::InvalidScoringMode(value) => write!(
                f,
                "SCORING_MODE '{value}' is not one of 'deterministic' or 'jitter'"
            ),
            ConfigError::InvalidSeed => write!(f, "SCORING_SEED must be a valid u64"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
