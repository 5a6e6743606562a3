//! Runtime configuration.
//!
//! Settings are read from a TOML file (every field has a default) and can be
//! overridden from the environment.
//!
//! ```toml
//! [source]
//! type = "http"
//! url = "https://example.org/api/Coordinate/predict?iterations=15"
//! timeout_secs = 30
//!
//! [animation]
//! step_period_ms = 1500
//!
//! [render]
//! mark_affected_sites = false
//! seed = 42
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::source::factory::SourceType;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

/// Where predictions come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type", default = "default_source_type")]
    pub source_type: String,
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_true")]
    pub skip_browser_warning: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            source_type: default_source_type(),
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
            skip_browser_warning: true,
        }
    }
}

impl SourceSettings {
    pub fn source_type(&self) -> Result<SourceType, ConfigError> {
        SourceType::from_str(&self.source_type).map_err(ConfigError::Invalid)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default = "default_step_period_ms")]
    pub step_period_ms: u64,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            step_period_ms: default_step_period_ms(),
        }
    }
}

impl AnimationSettings {
    pub fn step_period(&self) -> Duration {
        Duration::from_millis(self.step_period_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Draw a marker, label and arrow for every site inside the impact zone
    #[serde(default)]
    pub mark_affected_sites: bool,
    /// Fixed RNG seed for the particle field; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_source_type() -> String {
    "http".to_string()
}

fn default_source_url() -> String {
    crate::source::DEFAULT_PREDICTION_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_step_period_ms() -> u64 {
    1500
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl DriftConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: DriftConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `drift.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Returns `Ok(None)` when no file exists anywhere.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from("drift.toml"),
            PathBuf::from("backend/drift.toml"),
            PathBuf::from("../drift.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }

        Ok(None)
    }

    /// Apply `DRIFT_SOURCE_TYPE`, `DRIFT_SOURCE_URL`, `DRIFT_RENDER_SEED`,
    /// `HOST` and `PORT` on top of the loaded values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(value) = std::env::var("DRIFT_SOURCE_TYPE") {
            self.source.source_type = value;
        }
        if let Ok(value) = std::env::var("DRIFT_SOURCE_URL") {
            self.source.url = value;
        }
        if let Ok(value) = std::env::var("DRIFT_RENDER_SEED") {
            let seed = value.parse::<u64>().map_err(|e| {
                ConfigError::Invalid(format!("DRIFT_RENDER_SEED '{}': {}", value, e))
            })?;
            self.render.seed = Some(seed);
        }
        if let Ok(value) = std::env::var("HOST") {
            self.server.host = value;
        }
        if let Ok(value) = std::env::var("PORT") {
            self.server.port = value
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("PORT '{}': {}", value, e)))?;
        }
        self.validate()
    }

    /// Defaults, then the default-location file if any, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?.unwrap_or_default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let source_type = self.source.source_type()?;
        if source_type == SourceType::Http && self.source.url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "source.url must be set for the http source".to_string(),
            ));
        }
        if self.animation.step_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation.step_period_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
