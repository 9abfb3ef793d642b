//! Configuration loading
//!
//! Bootstrap configuration is read once at startup. Resolution order for
//! each setting:
//! 1. Command-line argument (applied by the binary)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default
//!
//! A missing TOML file is not an error: the server starts with defaults and
//! logs where it looked. A TOML file that exists but does not parse is.

use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GREGGING_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// HTTP server port
    pub port: u16,

    /// Address the HTTP listener binds to
    pub bind_address: String,

    /// Path to SQLite database file. `None` resolves to the platform default.
    pub database_path: Option<PathBuf>,

    /// Maximum connections in the database pool
    pub max_connections: u32,

    /// Directory holding a built frontend bundle (optional)
    pub static_dir: Option<PathBuf>,

    /// Origins allowed to make credentialed cross-origin requests
    pub cors_origins: Vec<String>,

    pub logging: LoggingConfig,

    pub session: SessionConfig,

    pub chat: ChatConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or full `EnvFilter` directive string. `RUST_LOG` wins over this.
    pub level: String,
}

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Session cookie configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Session lifetime in hours, 1..=[`MAX_SESSION_TTL_HOURS`]
    pub ttl_hours: i64,

    /// Add the `Secure` attribute to the session cookie
    pub secure_cookie: bool,
}

/// Hosted LLM chat configuration
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    pub api_base: String,

    /// Bearer key. Chat is disabled when absent.
    pub api_key: Option<String>,

    pub model: String,

    pub system_prompt: String,

    pub timeout_secs: u64,

    /// Longest accepted user message, in characters
    pub max_message_chars: usize,
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "0.0.0.0".to_string(),
            database_path: None,
            max_connections: 5,
            static_dir: None,
            cors_origins: vec![
                "http://localhost:5000".to_string(),
                "http://localhost:3000".to_string(),
            ],
            logging: LoggingConfig::default(),
            session: SessionConfig::default(),
            chat: ChatConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24 * 7,
            secure_cookie: false,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            system_prompt: "You are a patient tutor for data structures and algorithms. \
                Explain code and concepts clearly and concisely, with small examples."
                .to_string(),
            timeout_secs: 30,
            max_message_chars: 8000,
        }
    }
}

// The API key must never reach the logs.
impl fmt::Debug for ChatConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_message_chars", &self.max_message_chars)
            .finish()
    }
}

impl SessionConfig {
    /// Session lifetime, clamped into the accepted range
    pub fn ttl(&self) -> chrono::Duration {
        let hours = self.ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS);
        chrono::Duration::try_hours(hours).unwrap_or_else(|| chrono::Duration::days(7))
    }
}

impl ChatConfig {
    /// Chat is usable only with a non-blank key
    pub fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// Compiled defaults; carries the path that was looked up, if any
    Defaults { missing: Option<PathBuf> },
}

impl TomlConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used
    pub fn validate(&self) -> Result<()> {
        let ttl = self.session.ttl_hours;
        if !(1..=MAX_SESSION_TTL_HOURS).contains(&ttl) {
            return Err(Error::Config(format!(
                "session.ttl_hours must be between 1 and {}, got {}",
                MAX_SESSION_TTL_HOURS, ttl
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        match path {
            Some(path) if path.exists() => {
                let config = Self::load(path)?;
                Ok((config, ConfigSource::File(path.to_path_buf())))
            }
            Some(path) => Ok((
                Self::default(),
                ConfigSource::Defaults {
                    missing: Some(path.to_path_buf()),
                },
            )),
            None => Ok((Self::default(), ConfigSource::Defaults { missing: None })),
        }
    }

    /// Apply environment variable overrides for settings without a CLI flag
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("GREGGING_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(base) = std::env::var("GREGGING_CHAT_API_BASE") {
            self.chat.api_base = base;
        }
        if let Ok(model) = std::env::var("GREGGING_CHAT_MODEL") {
            self.chat.model = model;
        }
        let key = std::env::var("GREGGING_CHAT_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        if key.is_some() {
            self.chat.api_key = key;
        }
    }

    /// Database path, resolving `None` to the platform default
    pub fn resolved_database_path(&self) -> PathBuf {
        self.database_path
            .clone()
            .unwrap_or_else(default_database_path)
    }
}

/// Resolve which config file to read
///
/// Priority: CLI argument, `GREGGING_CONFIG`, platform config directory.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// `<config_dir>/gregging/gregging-server.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gregging").join("gregging-server.toml"))
}

/// Get OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("gregging"))
        .unwrap_or_else(|| PathBuf::from("./gregging_data"))
        .join("gregging.db")
}
