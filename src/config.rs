//! Startup configuration read from the process environment.
//!
//! Credentials are required; everything else has a default.

use std::env;
use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use tracing::warn;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const ORG_ID_VAR: &str = "OPENAI_ORG_ID";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Environment variable to override the default request timeout.
pub const TIMEOUT_VAR: &str = "COMMITGEN_TIMEOUT_SECS";

const ENV_FILE: &str = ".env";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Historical model choices, oldest first. Only one is active per run.
pub const DEFAULT_MODELS: &[&str] = &[
    "o1-mini",
    "gpt-3.5-turbo",
    "o1-preview",
    "gpt-4o",
    "gpt-4",
    "gpt-4o-mini-realtime-preview",
    "gpt-4o-realtime-preview",
    "gpt-4-turbo",
    "gpt-4o-mini",
    "chatgpt-4o-latest",
];

/// Which catalog entry is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelSelector {
    #[default]
    Last,
    Index(usize),
}

/// Ordered candidate models plus the selector picking the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    candidates: Vec<String>,
    selector: ModelSelector,
}

impl ModelCatalog {
    pub fn new(candidates: Vec<String>, selector: ModelSelector) -> Self {
        Self {
            candidates,
            selector,
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The active model identifier, or `None` if the selector points past the list.
    pub fn active(&self) -> Option<&str> {
        match self.selector {
            ModelSelector::Last => self.candidates.last(),
            ModelSelector::Index(i) => self.candidates.get(i),
        }
        .map(String::as_str)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
            ModelSelector::Last,
        )
    }
}

/// API credentials.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub org_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("org_id", &self.org_id)
            .finish()
    }
}

/// Everything needed to construct the completion client.
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub base_url: Url,
    pub timeout: Duration,
    pub models: ModelCatalog,
}

impl Config {
    /// Load `.env` (if present) and read configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = load_env_file(Path::new(ENV_FILE)) {
            warn!("Ignoring {}: {}", ENV_FILE, e);
        }
        Self::from_env()
    }

    /// Read configuration from the process environment only.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials = Credentials {
            api_key: required_var(API_KEY_VAR)?,
            org_id: required_var(ORG_ID_VAR)?,
        };

        let base_url = match env::var(BASE_URL_VAR) {
            Ok(v) if !v.trim().is_empty() => parse_base_url(v.trim())?,
            _ => parse_base_url(DEFAULT_BASE_URL)?,
        };

        Ok(Self {
            credentials,
            base_url,
            timeout: get_timeout(),
            models: ModelCatalog::default(),
        })
    }
}

/// Load variables from a dotenv file without overriding ones already set.
///
/// A missing file is not an error.
pub fn load_env_file(path: &Path) -> Result<(), dotenvy::Error> {
    match dotenvy::from_path(path) {
        Err(e) if e.not_found() => Ok(()),
        other => other,
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if v.trim().is_empty() => Err(ConfigError::EmptyVar(name)),
        Ok(v) => Ok(v.trim().to_string()),
        Err(_) => Err(ConfigError::MissingVar(name)),
    }
}

/// Parse the API base, forcing a trailing slash so `join` keeps the path prefix.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    Ok(url)
}

/// Get the configured request timeout.
///
/// Logs a warning if the variable is set but not a positive number of seconds.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
