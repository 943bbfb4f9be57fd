use serde::Deserialize;

use crate::models::DEFAULT_PLACEHOLDER_IMAGE_URL;

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the roommate-matching web application
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// File backing the local key-value store
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Image shown when a candidate's photo cannot be resolved
    #[serde(default = "default_placeholder_image_url")]
    pub placeholder_image_url: String,

    /// Session cookie forwarded with every request (e.g. `session=...`)
    #[serde(default)]
    pub session_cookie: Option<String>,
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_storage_path() -> String {
    ".redwood/local_storage.json".to_string()
}

fn default_placeholder_image_url() -> String {
    DEFAULT_PLACEHOLDER_IMAGE_URL.to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
