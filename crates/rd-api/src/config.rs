//! API server configuration.

use std::path::PathBuf;

/// Listen address plus the assistant config file to load.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Assistant TOML config (`RD_CONFIG`). Defaults apply when unset.
    pub assistant_config: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ApiConfig {
    /// Load config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. An unparsable port keeps
    /// the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("RD_API_HOST").filter(|v| !v.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = lookup("RD_API_PORT") {
            match port.trim().parse() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(value = %port, "invalid RD_API_PORT, using default"),
            }
        }
        config.assistant_config = lookup("RD_CONFIG")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        config
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assistant_config: None,
        }
    }
}
