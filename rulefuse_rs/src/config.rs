//! Configuration for rulefuse.
//!
//! Loaded once at start-up and handed to the combiner and writer. Sources,
//! lowest precedence first: built-in defaults, `.rulefuse/config.toml` (or
//! `--config`), environment, CLI flags.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Result, RulefuseError};

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_OUTPUT_DIR: &str = "combined-rules";

pub const ENV_API_KEY: &str = "RULEFUSE_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "OPENAI_API_KEY";
pub const ENV_MODEL: &str = "RULEFUSE_MODEL";
pub const ENV_ENDPOINT: &str = "RULEFUSE_API_URL";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RulefuseConfig {
    pub api: ApiConfig,
    pub output: OutputConfig,
}

/// Remote model settings
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bearer token. Prefer the environment over the config file.
    pub api_key: Option<String>,
    pub model: String,
    /// Full chat-completions URL
    pub endpoint: String,
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 120,
            max_tokens: 8192,
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where combined rules are written
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl RulefuseConfig {
    /// Load config from `.rulefuse/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".rulefuse").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load a config file the user asked for by name. Unlike [`Self::load`],
    /// a missing or broken file is an error.
    pub fn load_explicit(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RulefuseError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            RulefuseError::Configuration(format!("invalid config {}: {}", path.display(), e))
        })
    }

    /// Overlay values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Overlay values from an arbitrary lookup (the environment in production).
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY).or_else(|| non_empty(ENV_API_KEY_FALLBACK)) {
            self.api.api_key = Some(key);
        }
        if let Some(model) = non_empty(ENV_MODEL) {
            self.api.model = model;
        }
        if let Some(endpoint) = non_empty(ENV_ENDPOINT) {
            self.api.endpoint = endpoint;
        }
    }

    /// The API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                RulefuseError::Configuration(format!(
                    "no API key configured; set {ENV_API_KEY} (or {ENV_API_KEY_FALLBACK}) \
                     or use --dry-run"
                ))
            })
    }
}
