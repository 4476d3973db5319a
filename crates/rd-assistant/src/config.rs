//! Assistant configuration, loadable from TOML with environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// SQLite database URL.
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Where exported reports are written.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// CSV ingested at start-up when the file exists.
    #[serde(default = "default_seed_csv")]
    pub seed_csv: Option<PathBuf>,
    /// Intent classifier settings. Unavailable by default.
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

fn default_database_url() -> String {
    "sqlite://returns.db".into()
}
fn default_report_path() -> PathBuf {
    PathBuf::from("report.xlsx")
}
fn default_seed_csv() -> Option<PathBuf> {
    Some(PathBuf::from("sample.csv"))
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            report_path: default_report_path(),
            seed_csv: default_seed_csv(),
            classifier: ClassifierConfig::default(),
        }
    }
}

/// Configuration for the OpenAI-compatible intent classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// API key. Blank disables the classifier.
    #[serde(default)]
    pub api_key: String,
    /// Chat model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API base URL (anything exposing `/chat/completions`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ClassifierConfig {
    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl AssistantConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// File config if a path is given, defaults otherwise, then process
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overlay environment values. Blank values are ignored, except that
    /// the API key is taken as-is so an empty key can disable a file key.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(v) = lookup("OPENAI_API_KEY") {
            self.classifier.api_key = v.trim().to_string();
        }
        if let Some(v) = non_blank(lookup("OPENAI_MODEL")) {
            self.classifier.model = v;
        }
        if let Some(v) = non_blank(lookup("OPENAI_BASE_URL")) {
            self.classifier.base_url = v;
        }
        if let Some(v) = non_blank(lookup("RETURNS_DATABASE_URL")) {
            self.database_url = v;
        }
        if let Some(v) = non_blank(lookup("RETURNS_REPORT_PATH")) {
            self.report_path = PathBuf::from(v);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
