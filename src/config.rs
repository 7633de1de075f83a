use crate::constants::*;
use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub omdb: OmdbConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub movies_csv: PathBuf,
    pub ratings_csv: PathBuf,
    pub database: PathBuf,
    pub schema: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            movies_csv: PathBuf::from(DEFAULT_MOVIES_CSV),
            ratings_csv: PathBuf::from(DEFAULT_RATINGS_CSV),
            database: PathBuf::from(DEFAULT_DATABASE),
            schema: PathBuf::from(DEFAULT_SCHEMA),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OmdbConfig {
    pub base_url: String,
    /// Pause after every lookup, hit or miss
    pub delay_ms: u64,
    /// Only the first `enrichment_cap` movies are looked up
    pub enrichment_cap: usize,
    /// Unset means the HTTP client's default (no timeout)
    pub timeout_seconds: Option<u64>,
    /// Never read from the file; filled from the environment by `Config::load`
    #[serde(skip)]
    pub api_key: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            delay_ms: DEFAULT_LOOKUP_DELAY_MS,
            enrichment_cap: DEFAULT_ENRICHMENT_CAP,
            timeout_seconds: None,
            api_key: String::new(),
        }
    }
}

impl OmdbConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub pushgateway_url: Option<String>,
}

impl Config {
    /// Load settings and the API key.
    ///
    /// An explicit `path` must exist. Without one, `config.toml` in the
    /// working directory is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                    Config::default()
                }
            }
        };

        config.omdb.api_key = api_key_from_env()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.omdb.base_url.trim().is_empty() {
            return Err(EtlError::Config("omdb.base_url must not be empty".to_string()));
        }
        Ok(config)
    }
}

fn api_key_from_env() -> Result<String> {
    match std::env::var(OMDB_API_KEY_ENV) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(EtlError::MissingApiKey),
    }
}
