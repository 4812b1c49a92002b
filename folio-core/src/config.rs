use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Development fallback when no API URL is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    pub api: ApiConfig,
    pub resume: ResumeConfig,
    pub logging: LoggingConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_url")]
    pub base_url: String,

    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSourceKind {
    #[default]
    Bundled,
    File,
    Remote,
}

impl FromStr for ResumeSourceKind {
    type Err = ConfigLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bundled" => Ok(ResumeSourceKind::Bundled),
            "file" => Ok(ResumeSourceKind::File),
            "remote" => Ok(ResumeSourceKind::Remote),
            other => Err(ConfigLoadError::InvalidValue {
                key: "resume.source".to_string(),
                message: format!(
                    "Unknown source '{}'. Must be one of: bundled, file, remote",
                    other
                ),
            }),
        }
    }
}

impl std::fmt::Display for ResumeSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResumeSourceKind::Bundled => write!(f, "bundled"),
            ResumeSourceKind::File => write!(f, "file"),
            ResumeSourceKind::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResumeConfig {
    #[serde(default)]
    pub source: ResumeSourceKind,

    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub color: bool,

    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}

fn default_time_format() -> String {
    "%H:%M".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            user_agent: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json_format: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: true,
            time_format: default_time_format(),
        }
    }
}

impl FolioConfig {
    pub fn load() -> Result<Self, ConfigLoadError> {
        load_dotenv_files();
        Self::load_from_paths(get_config_paths())
    }

    pub fn load_from_paths(paths: Vec<PathBuf>) -> Result<Self, ConfigLoadError> {
        let mut builder = ConfigBuilder::builder();

        for path in paths {
            if path.exists() {
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut folio_config: FolioConfig = builder.build()?.try_deserialize()?;

        if let Some(url) = first_env(&["FOLIO_API_URL", "API_URL"]) {
            folio_config.api.base_url = url;
        }

        if let Some(level) = first_env(&["FOLIO_LOG_LEVEL"]) {
            folio_config.logging.level = level;
        }

        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            folio_config.display.color = false;
        }

        folio_config.api.base_url = folio_config.api.base_url.trim_end_matches('/').to_string();
        folio_config.validate()?;

        Ok(folio_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigLoadError::MissingRequired("api.base_url".to_string()));
        }

        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigLoadError::InvalidValue {
                key: "api.base_url".to_string(),
                message: "Must be a URL starting with http:// or https://".to_string(),
            });
        }

        if self.resume.source == ResumeSourceKind::File && self.resume.path.is_none() {
            return Err(ConfigLoadError::MissingRequired("resume.path".to_string()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        let level_lower = self.logging.level.to_lowercase();
        if !valid_levels.contains(&level_lower.as_str()) && !level_lower.contains('=') {
            return Err(ConfigLoadError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Must be one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    pub fn api_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn log_level(&self) -> &str {
        &self.logging.level
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join("config").join("default.toml"));
        paths.push(cwd.join("config").join("local.toml"));
        paths.push(cwd.join("folio.toml"));
    }

    if let Some(config_dir) = get_config_dir() {
        paths.push(config_dir.join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".folio").join("config.toml"));
    }

    paths
}

fn load_dotenv_files() {
    let mut env_paths = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        env_paths.push(cwd.join(".env"));
        env_paths.push(cwd.join(".env.local"));
    }

    if let Some(home) = dirs::home_dir() {
        env_paths.push(home.join(".folio").join(".env"));
    }

    for path in env_paths {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio"))
}
