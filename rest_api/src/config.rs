// rest_api/src/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lib::StoreConfig;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REST_API_HOST: &str = "127.0.0.1";
pub const DEFAULT_REST_API_PORT: u16 = 8082;
pub const DEFAULT_CONFIG_FILE: &str = "medase_config.yaml";

fn default_host() -> String { DEFAULT_REST_API_HOST.to_string() }
fn default_port() -> u16 { DEFAULT_REST_API_PORT }
fn default_allow_any_origin() -> bool { true }

/// Represents the configuration for the REST API server itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Send permissive CORS headers so a browser dashboard on another origin
    /// can call the API.
    #[serde(default = "default_allow_any_origin")]
    pub allow_any_origin: bool,
}

impl Default for RestApiConfig {
    fn default() -> Self {
        RestApiConfig {
            host: default_host(),
            port: default_port(),
            allow_any_origin: default_allow_any_origin(),
        }
    }
}

/// Everything the binary needs, as read from `medase_config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rest: RestApiConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Parses a YAML configuration document.
pub fn parse_app_config(content: &str) -> Result<AppConfig> {
    serde_yaml2::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))
}

/// Loads the application configuration.
///
/// An explicit `path` must exist. Without one, `medase_config.yaml` in the
/// working directory is used when present, and built-in defaults otherwise.
pub fn load_app_config(path: Option<&Path>) -> Result<AppConfig> {
    let path_to_use: PathBuf = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return Ok(AppConfig::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&path_to_use)
        .with_context(|| format!("Failed to read config file {}", path_to_use.display()))?;
    parse_app_config(&content).with_context(|| format!("Invalid config file {}", path_to_use.display()))
}
