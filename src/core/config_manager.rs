// src/core/config_manager.rs
//! Client configuration: flags override environment, environment overrides
//! `config.yaml`.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app_log;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigManager {
    pub service: ServiceConfig,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Unset by default: a pending analysis waits indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EnvironmentSection {
    service_url: Option<String>,
    request_timeout_secs: Option<u64>,
    output_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentSection,
    #[serde(default)]
    production: EnvironmentSection,
}

/// Values given on the command line; `None` falls through to the next layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub service_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub output_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load(overrides: ConfigOverrides) -> Result<Self> {
        let environment = Self::get_environment();
        app_log!(info, "Loading client configuration for: {}", environment);

        let config_path = overrides
            .config_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("config.yaml"));
        let file_section = Self::load_file_section(&config_path, &environment)?;

        let env_url = std::env::var("ATS_SERVICE_URL").ok();
        let env_timeout = match std::env::var("ATS_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("ATS_REQUEST_TIMEOUT_SECS must be a number of seconds"))?,
            ),
            Err(_) => None,
        };

        Ok(Self::merge(overrides, env_url, env_timeout, file_section))
    }

    fn merge(
        overrides: ConfigOverrides,
        env_url: Option<String>,
        env_timeout: Option<u64>,
        file: EnvironmentSection,
    ) -> Self {
        let base_url = overrides
            .service_url
            .or(env_url)
            .or(file.service_url)
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());

        Self {
            service: ServiceConfig {
                base_url,
                request_timeout_secs: overrides
                    .request_timeout_secs
                    .or(env_timeout)
                    .or(file.request_timeout_secs),
            },
            output_path: overrides
                .output_path
                .or(file.output_path)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    fn get_environment() -> String {
        std::env::var("ATS_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_file_section(path: &Path, environment: &str) -> Result<EnvironmentSection> {
        if !path.exists() {
            return Ok(EnvironmentSection::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse_section(&content, environment)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn parse_section(content: &str, environment: &str) -> Result<EnvironmentSection> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.service.request_timeout_secs.map(Duration::from_secs)
    }
}
