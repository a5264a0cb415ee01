// src/core/mod.rs
//! Configuration and the HTTP collaborator

pub mod config_manager;
pub mod service_client;

pub use config_manager::{ConfigManager, ConfigOverrides};
pub use service_client::{download_url, AnalysisService, ServiceClient};
