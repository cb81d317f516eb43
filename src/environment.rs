// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Endpoint and paging settings for one environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_ner_base_url")]
    pub ner_base_url: String,
    #[serde(default = "default_ner_model")]
    pub ner_model: String,
}

fn default_api_base_url() -> String {
    "https://api.itjobs.pt".to_string()
}

fn default_page_limit() -> u32 {
    // Maximum the listing API allows per request.
    100
}

fn default_max_pages() -> u32 {
    50
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_ner_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_ner_model() -> String {
    "dbmdz/bert-large-cased-finetuned-conll03-english".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            page_limit: default_page_limit(),
            max_pages: default_max_pages(),
            timeout_seconds: default_timeout_seconds(),
            ner_base_url: default_ner_base_url(),
            ner_model: default_ner_model(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

impl AppConfig {
    /// Load configuration for the current environment. A missing config.yaml
    /// falls back to built-in defaults so the CLI works out of the box.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        let config_path = PathBuf::from("config.yaml");

        if !config_path.exists() {
            info!("config.yaml not found, using built-in defaults");
            return Ok(Self::default());
        }

        info!("Loading configuration for environment: {}", environment);
        let config_content =
            std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?;

        let config_file: ConfigFile =
            serde_yaml::from_str(&config_content).context("Failed to parse config.yaml")?;

        Ok(match environment.as_str() {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn get_environment() -> String {
        std::env::var("JOBSCOPE_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .or_else(|_| std::env::var("ENV"))
            .unwrap_or_else(|_| "local".to_string())
    }
}

/// API credentials, read from the process environment (a `.env` file is
/// loaded at startup). Both are optional at startup: a missing itjobs key
/// makes the corresponding calls fail with a reported error, never a crash.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub api_key: Option<String>,
    pub ner_api_token: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("API_KEY").ok(),
            ner_api_token: std::env::var("NER_API_TOKEN").ok(),
        }
    }
}
