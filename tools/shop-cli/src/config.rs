//! CLI configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "SHOP_API_URL";

/// Config file names searched from the working directory upward.
pub const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Payment settings.
    #[serde(default)]
    pub payment: PaymentConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Find the nearest config file from `start` upward.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply environment overrides.
    pub fn with_env_overrides(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL requests are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds; none by default.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Where the token, profile, cart and staged order are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage file; defaults to the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl StorageConfig {
    /// The configured path, or `<data dir>/shop-cli/storage.json`.
    pub fn resolve(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => default_data_dir().join("shop-cli").join("storage.json"),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .unwrap_or_else(std::env::temp_dir)
}

/// Payment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Simulated card processing pause, in milliseconds.
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

fn default_processing_delay_ms() -> u64 {
    2000
}

impl PaymentConfig {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout(), None);
        assert_eq!(config.payment.processing_delay(), Duration::from_millis(2000));
        assert!(config.storage.resolve().ends_with("shop-cli/storage.json"));
    }

    #[test]
    fn test_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.toml");
        std::fs::write(
            &path,
            "[api]\nrequest_timeout_secs = 5\n\n[payment]\nprocessing_delay_ms = 0\n",
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(5)));
        assert!(config.payment.processing_delay().is_zero());
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop.json");
        std::fs::write(
            &path,
            r#"{"api": {"base_url": "http://shop.test"}, "storage": {"path": "/tmp/s.json"}}"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url, "http://shop.test");
        assert_eq!(config.storage.resolve(), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_find_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(".shop.toml"), "").unwrap();

        assert_eq!(
            CliConfig::find(&nested),
            Some(dir.path().join(".shop.toml"))
        );
    }

    #[test]
    fn test_env_override() {
        let config = CliConfig::default().with_env_overrides(Some("http://api.test ".to_string()));
        assert_eq!(config.api.base_url, "http://api.test");

        let config = CliConfig::default().with_env_overrides(Some(String::new()));
        assert_eq!(config.api.base_url, "http://localhost:5000");
    }
}
