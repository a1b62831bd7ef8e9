//! Configuration management
//!
//! Loads the Archway configuration from TOML at ~/.archway/config.toml
//! when present, falls back to built-in defaults otherwise, and applies
//! environment-variable overrides last. Every knob has a documented
//! default; a missing config file never fails the process.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **model**: Completion endpoint, region, default model id
//! - **storage**: Object-store root ("bucket") and metadata table path
//!
//! # Environment Overrides
//!
//! | Variable | Overrides |
//! |---|---|
//! | `ARCHWAY_BUCKET` | `storage.bucket_root` |
//! | `ARCHWAY_TABLE` | `storage.table_path` |
//! | `ARCHWAY_MODEL_BASE_URL` | `model.base_url` |
//! | `ARCHWAY_MODEL_REGION` | `model.region` |
//! | `ARCHWAY_MODEL_ID` | `model.default_model_id` |
//! | `ARCHWAY_MODEL_API_KEY` | completion credential (never stored in the file) |

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core engine settings
    #[serde(default)]
    pub core: CoreConfig,

    /// Model gateway settings
    #[serde(default)]
    pub model: ModelConfig,

    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Core engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Model gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the messages-style completion endpoint
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// Region label forwarded to the endpoint, informational only
    #[serde(default = "default_model_region")]
    pub region: String,

    /// Model id used when the request does not name one
    #[serde(default = "default_model_id")]
    pub default_model_id: String,
    // Note: the API credential comes from ARCHWAY_MODEL_API_KEY, never the file
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_model_base_url(),
            region: default_model_region(),
            default_model_id: default_model_id(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory of the object store (the "bucket")
    #[serde(default = "default_bucket_root")]
    pub bucket_root: PathBuf,

    /// Path of the SQLite metadata table
    #[serde(default = "default_table_path")]
    pub table_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket_root: default_bucket_root(),
            table_path: default_table_path(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to
    /// built-in defaults when the file does not exist, then apply
    /// environment overrides.
    pub fn load_or_default() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config at {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config at {}", path.display()))?
            }
            _ => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit file path, then apply
    /// environment overrides.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let mut config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Default config file location: ~/.archway/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".archway").join("config.toml"))
    }

    /// The completion credential, if configured in the environment.
    pub fn model_api_key() -> Option<String> {
        std::env::var("ARCHWAY_MODEL_API_KEY").ok()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ARCHWAY_BUCKET") {
            self.storage.bucket_root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("ARCHWAY_TABLE") {
            self.storage.table_path = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("ARCHWAY_MODEL_BASE_URL") {
            self.model.base_url = v;
        }
        if let Ok(v) = std::env::var("ARCHWAY_MODEL_REGION") {
            self.model.region = v;
        }
        if let Ok(v) = std::env::var("ARCHWAY_MODEL_ID") {
            self.model.default_model_id = v;
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_model_base_url() -> String {
    "https://api.anthropic.com/v1".to_string()
}

fn default_model_region() -> String {
    "us-east-1".to_string()
}

fn default_model_id() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_bucket_root() -> PathBuf {
    PathBuf::from("~/.archway/objects")
}

fn default_table_path() -> PathBuf {
    PathBuf::from("~/.archway/projects.db")
}

/// Expand a leading ~ to the user's home directory.
pub fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
