use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::constants;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub store: StoreConfig,

    pub appwrite: AppwriteConfig,

    pub trending: TrendingConfig,

    pub server: ServerConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub log_level: String,

    /// "pretty" or "json"
    pub log_format: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            worker_threads: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Appwrite,
    /// Process-local store, lost on exit. Useful for local runs and tests.
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppwriteConfig {
    pub endpoint: String,

    pub project_id: String,

    pub database_id: String,

    pub collection_id: String,

    /// Server API key. Not needed when the collection grants public access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: constants::appwrite::DEFAULT_ENDPOINT.to_string(),
            project_id: String::new(),
            database_id: String::new(),
            collection_id: String::new(),
            api_key: None,
            request_timeout_seconds: 30,
        }
    }
}

impl AppwriteConfig {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.project_id.trim().is_empty()
            && !self.database_id.trim().is_empty()
            && !self.collection_id.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    /// Number of entries returned by the leaderboard (default: 5)
    pub limit: usize,

    pub image_base_url: String,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            limit: constants::trending::DEFAULT_LIMIT,
            image_base_url: constants::trending::IMAGE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 6790,
            cors_allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

/// Files the effective configuration was read from.
///
/// Loading happens before logging is set up, so the sources are reported
/// afterwards through [`ConfigSource::log`].
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    pub file: Option<PathBuf>,

    pub env_file: Option<PathBuf>,
}

impl ConfigSource {
    pub fn log(&self) {
        if let Some(path) = &self.env_file {
            info!("Loaded environment from: {}", path.display());
        }

        match &self.file {
            Some(path) => info!("Loaded config from: {}", path.display()),
            None => info!("No config file found, using defaults"),
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and
    /// environment overrides.
    pub fn load() -> Result<(Self, ConfigSource)> {
        let env_file = dotenvy::dotenv().ok();
        let file = Self::config_paths().into_iter().find(|p| p.exists());

        let mut config = match &file {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok((config, ConfigSource { file, env_file }))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Environment values win over the file. Empty values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(constants::env::ENDPOINT) {
            self.appwrite.endpoint = v;
        }
        if let Some(v) = get(constants::env::PROJECT_ID) {
            self.appwrite.project_id = v;
        }
        if let Some(v) = get(constants::env::DATABASE_ID) {
            self.appwrite.database_id = v;
        }
        if let Some(v) = get(constants::env::COLLECTION_ID) {
            self.appwrite.collection_id = v;
        }
        if let Some(v) = get(constants::env::API_KEY) {
            self.appwrite.api_key = Some(v);
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("cinetrend").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cinetrend").join("config.toml"));
        }

        paths
    }

    #[must_use]
    pub fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing(path: &Path) -> Result<bool> {
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=constants::trending::MAX_LIMIT).contains(&self.trending.limit) {
            anyhow::bail!(
                "trending.limit must be between 1 and {}",
                constants::trending::MAX_LIMIT
            );
        }

        url::Url::parse(&self.trending.image_base_url).with_context(|| {
            format!(
                "Invalid trending.image_base_url: {}",
                self.trending.image_base_url
            )
        })?;

        if self.server.port == 0 {
            anyhow::bail!("server.port cannot be 0");
        }

        if self.store.backend == StoreBackend::Appwrite {
            url::Url::parse(&self.appwrite.endpoint)
                .with_context(|| format!("Invalid appwrite.endpoint: {}", self.appwrite.endpoint))?;

            // Startup continues so the failures surface as logged store errors.
            if !self.appwrite.is_complete() {
                warn!(
                    "Appwrite project, database or collection id is not set; store calls will fail"
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.trending.limit, 5);
        assert_eq!(
            config.trending.image_base_url,
            "https://image.tmdb.org/t/p/w500"
        );
        assert_eq!(config.appwrite.endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.store.backend, StoreBackend::Appwrite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [store]
            backend = "memory"

            [appwrite]
            project_id = "p1"
            database_id = "d1"
            collection_id = "c1"

            [trending]
            limit = 10
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.appwrite.is_complete());
        assert_eq!(config.trending.limit, 10);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn env_overrides_win_over_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("APPWRITE_PROJECT_ID", "from-env"),
            ("APPWRITE_DATABASE_ID", ""),
            ("APPWRITE_API_KEY", "secret"),
        ]);

        let mut config = Config::default();
        config.appwrite.database_id = "from-file".to_string();
        config.apply_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.appwrite.project_id, "from-env");
        assert_eq!(config.appwrite.database_id, "from-file");
        assert_eq!(config.appwrite.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn validate_rejects_out_of_range_limit() {
        let mut config = Config::default();
        config.trending.limit = 0;
        assert!(config.validate().is_err());

        config.trending.limit = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn save_then_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(Config::create_default_if_missing(&path).unwrap());
        assert!(!Config::create_default_if_missing(&path).unwrap());

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.trending.limit, 5);
        assert_eq!(loaded.server.port, 6790);
    }
}
