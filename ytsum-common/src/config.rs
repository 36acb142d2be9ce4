//! Configuration loading and resolution
//!
//! Bootstrap configuration comes from three places, highest priority first:
//! 1. Command-line arguments / their environment variables (parsed by the binary)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! The Gemini credential is the exception: it is resolved from the
//! `GEMINI_API_KEY` environment variable first, then the TOML file. A missing
//! credential is NOT a startup error; the service runs in degraded mode.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable carrying the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default listen host (loopback only)
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5000;

/// Default model identifier for generateContent calls
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST endpoint base
pub const DEFAULT_GENERATOR_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default HTTP client timeout for generation requests (seconds)
///
/// Video understanding calls are slow; this is the client's own bound, the
/// summarize adapter adds no timeout of its own.
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 300;

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; a missing file yields `TomlConfig::default()`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// Listen host
    #[serde(default)]
    pub host: Option<String>,

    /// Listen port
    #[serde(default)]
    pub port: Option<u16>,

    /// Gemini API key (environment variable takes priority)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// External generator configuration
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` overrides it
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Generator (Gemini) client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Model identifier used for every call
    #[serde(default = "default_model")]
    pub model: String,

    /// REST endpoint base, overridable for testing against a local mock
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_GENERATOR_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_GENERATOR_TIMEOUT_SECS
}

impl TomlConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))
    }

    /// Load config if the file exists
    ///
    /// `Ok(None)` when no path is known or the file is absent; a missing
    /// config file is normal and the caller falls back to defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Option<Self>> {
        match path {
            Some(path) if path.exists() => Self::load(path).map(Some),
            _ => Ok(None),
        }
    }
}

/// Default config file path: `<config_dir>/ytsum/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ytsum").join("config.toml"))
}

/// Write config to a TOML file, creating parent directories
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Resolve the listen address: explicit value > TOML > default
pub fn resolve_listen_addr(host: Option<&str>, port: Option<u16>, toml: &TomlConfig) -> String {
    let host = host
        .or(toml.host.as_deref())
        .unwrap_or(DEFAULT_HOST);
    let port = port.or(toml.port).unwrap_or(DEFAULT_PORT);
    format!("{}:{}", host, port)
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Resolve the Gemini API key from environment then TOML
///
/// Returns `None` when neither source holds a usable key.
pub fn resolve_gemini_api_key(toml: &TomlConfig) -> Option<String> {
    resolve_api_key_from(std::env::var(GEMINI_API_KEY_ENV).ok(), toml)
}

/// Key resolution with the environment value passed in explicitly
pub fn resolve_api_key_from(env_key: Option<String>, toml: &TomlConfig) -> Option<String> {
    let env_key = env_key.filter(|k| is_valid_key(k));
    let toml_key = toml.gemini_api_key.clone().filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Gemini API key found in both {} and TOML config. Using environment.",
            GEMINI_API_KEY_ENV
        );
    }

    if let Some(key) = env_key {
        info!("Gemini API key loaded from environment variable");
        return Some(key.trim().to_string());
    }

    if let Some(key) = toml_key {
        info!("Gemini API key loaded from TOML config");
        return Some(key.trim().to_string());
    }

    None
}
