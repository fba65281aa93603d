//! Bootstrap configuration loading and config file resolution
//!
//! The TOML file only carries bootstrap concerns (bind address, logging,
//! generator connection). Everything else is decided per request.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default HTTP port for aocc-intel
pub const DEFAULT_PORT: u16 = 5780;

/// Default generator endpoint (REST v1beta surface)
pub const DEFAULT_GENERATOR_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Bootstrap configuration loaded from TOML file
///
/// Every section is optional; a missing file yields [`TomlConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// HTTP bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Connection settings for the hosted generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// API key (lowest priority source, after `API_KEY` and `GEMINI_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for text and JSON generation
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used for speech synthesis
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Prebuilt voice name for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side rate limit; calls beyond it wait, they are never retried
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            tts_model: default_tts_model(),
            voice: default_voice(),
            timeout_secs: default_timeout_secs(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    DEFAULT_GENERATOR_BASE_URL.to_string()
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_requests_per_minute() -> u32 {
    30
}

/// Config file resolution priority:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. OS-dependent default location, if the file exists
///
/// Returns `None` when no explicit path is given and no default file exists.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path().filter(|p| p.exists())
}

/// Platform config location: `<config_dir>/aocc/aocc-intel.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("aocc").join("aocc-intel.toml"))
}

/// Load and parse a TOML bootstrap file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read config file");
            return Err(e.into());
        }
    };
    let config: TomlConfig = toml::from_str(&content)?;

    if config.server.port == 0 {
        return Err(Error::Config("server.port must be non-zero".to_string()));
    }
    if config.generator.requests_per_minute == 0 {
        return Err(Error::Config(
            "generator.requests_per_minute must be non-zero".to_string(),
        ));
    }

    debug!(path = %path.display(), "Parsed TOML config");
    Ok(config)
}

/// Load the resolved config file, or fall back to built-in defaults
pub fn load_or_default(path: Option<&Path>) -> Result<TomlConfig> {
    match path {
        Some(path) => {
            let config = load_toml_config(path)?;
            info!("Configuration loaded from {}", path.display());
            Ok(config)
        }
        None => {
            info!("No configuration file found, using built-in defaults");
            Ok(TomlConfig::default())
        }
    }
}
