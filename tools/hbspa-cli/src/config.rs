//! CLI configuration.

use anyhow::{Context, Result};
use hbspa_preview::PreviewConfig;
use hbspa_storefront::DEFAULT_API_BASE;
use serde::{Deserialize, Serialize};

/// Config file names searched for, in order, from the working directory up.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["hbspa.toml", ".hbspa.toml", "hbspa.json"];

/// Overrides `api.base_url`.
pub const ENV_API_BASE: &str = "HBSPA_API_BASE";
/// Overrides `storage.path`.
pub const ENV_STORAGE: &str = "HBSPA_STORAGE";

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Cart preview settings.
    #[serde(default)]
    pub preview: PreviewConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `HBSPA_*` environment overrides.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(
            std::env::var(ENV_API_BASE).ok(),
            std::env::var(ENV_STORAGE).ok(),
        )
    }

    fn with_overrides(mut self, api_base: Option<String>, storage: Option<String>) -> Self {
        if let Some(base) = api_base.filter(|v| !v.trim().is_empty()) {
            self.api.base_url = base;
        }
        if let Some(path) = storage.filter(|v| !v.trim().is_empty()) {
            self.storage.path = path;
        }
        self
    }
}

/// Backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST API, including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the cart, catalog snapshot and tokens.
    #[serde(default = "default_storage_path")]
    pub path: String,
}

fn default_storage_path() -> String {
    ".hbspa/storage.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
        }
    }
}

/// Generate a default hbspa.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# hbspa storefront configuration

[api]
base_url = "{base}"

[storage]
path = ".hbspa/storage.json"

[preview]
# bubble, bar or badge
variant = "bubble"
item_limit = 6
locale = "es-MX"
currency = "MXN"
page_path = "/pages/products.html"
"#,
        base = DEFAULT_API_BASE
    )
}
