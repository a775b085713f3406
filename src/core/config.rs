use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::PathBuf};
use tracing::debug;

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const EXCHANGERATE_API_KEY_VAR: &str = "EXCHANGERATE_API_KEY";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ExchangeRatesProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeminiProviderConfig {
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    pub exchange_rates: Option<ExchangeRatesProviderConfig>,
    pub gemini: Option<GeminiProviderConfig>,
}

impl ProvidersConfig {
    pub fn exchange_rates_url(&self) -> &str {
        self.exchange_rates
            .as_ref()
            .map_or("https://api.exchangeratesapi.io", |p| &p.base_url)
    }

    pub fn gemini_url(&self) -> &str {
        self.gemini
            .as_ref()
            .map_or("https://generativelanguage.googleapis.com", |p| &p.base_url)
    }

    pub fn gemini_model(&self) -> String {
        self.gemini
            .as_ref()
            .map_or_else(default_model, |p| p.model.clone())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxcall", "fxcall")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

/// API keys for the two outbound services.
#[derive(Clone)]
pub struct Credentials {
    pub google_api_key: String,
    pub exchange_rate_api_key: String,
}

impl Credentials {
    /// Reads both keys from the process environment, after loading `.env`
    /// from the working directory if one exists.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{name} environment variable is required"))
        };

        Ok(Credentials {
            google_api_key: require(GOOGLE_API_KEY_VAR)?,
            exchange_rate_api_key: require(EXCHANGERATE_API_KEY_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &"<redacted>")
            .field("exchange_rate_api_key", &"<redacted>")
            .finish()
    }
}

/// Everything the run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub credentials: Credentials,
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let app = match config_path {
            Some(path) => AppConfig::load_from_path(path)?,
            None => AppConfig::load()?,
        };
        let credentials = Credentials::from_env()?;
        Ok(Config { app, credentials })
    }
}
