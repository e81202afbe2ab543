use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_ENDPOINT: &str = "https://01.kood.tech/api/graphql-engine/v1/graphql";
pub const DEFAULT_AUTH_ENDPOINT: &str = "https://01.kood.tech/api/auth/signin";
pub const DEFAULT_CLIENT_PATH: &str = "./client";

/// Looked up relative to the working directory.
pub const CONFIG_FILE: &str = "config.json";

/// Gateway settings, built once at startup and shared read-only with every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    pub api_endpoint: String,
    pub auth_endpoint: String,
    pub client_path: PathBuf,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
            client_path: PathBuf::from(DEFAULT_CLIENT_PATH),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("read {path}: {source}")]
    Read { path: String, source: std::io::Error },
    #[error("parse {path}: {source}")]
    Parse { path: String, source: serde_json::Error },
}

/// `port` was a string in older config files; accept either form.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PortValue {
    Number(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    port: Option<PortValue>,
    api_endpoint: Option<String>,
    auth_endpoint: Option<String>,
    client_path: Option<String>,
}

impl GatewayConfig {
    /// Load `config.json` from the working directory, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(CONFIG_FILE)
    }

    /// Overlay the file at `path` on top of the defaults. A missing file is normal;
    /// an unreadable or malformed one is logged and ignored.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::try_load_from(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("ignoring config file: {e}");
                Self::default()
            }
        }
    }

    pub fn try_load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply the keys present in `raw` over the defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let file: ConfigFile = serde_json::from_str(raw)?;
        let mut cfg = Self::default();
        if let Some(port) = file.port {
            cfg.port = parse_port(&port).unwrap_or_else(|| {
                warn!("invalid port {port:?} in config, keeping {DEFAULT_PORT}");
                DEFAULT_PORT
            });
        }
        if let Some(v) = file.api_endpoint { cfg.api_endpoint = v; }
        if let Some(v) = file.auth_endpoint { cfg.auth_endpoint = v; }
        if let Some(v) = file.client_path { cfg.client_path = PathBuf::from(v); }
        Ok(cfg)
    }
}

fn parse_port(value: &PortValue) -> Option<u16> {
    match value {
        PortValue::Number(n) => u16::try_from(*n).ok().filter(|p| *p != 0),
        // empty string means "unset"
        PortValue::Text(s) if s.trim().is_empty() => Some(DEFAULT_PORT),
        PortValue::Text(s) => s.trim().parse::<u16>().ok().filter(|p| *p != 0),
    }
}
