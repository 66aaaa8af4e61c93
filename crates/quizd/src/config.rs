//! Configuration management for quizd.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use lexiquiz_common::constants::{DEFAULT_EXPOSURE_MILLIS, DEFAULT_LISTEN_ADDR, DEFAULT_REDIS_URL};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Quiz engine configuration
    #[serde(default)]
    pub quiz: QuizConfig,
}

/// Quiz-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuizConfig {
    /// Per-item answer exposure window in milliseconds; a batch of N
    /// items shares a TTL of N times this value
    #[serde(default = "default_exposure_millis")]
    pub exposure_millis: u64,

    /// Secret the token codec derives its AEAD key from
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            exposure_millis: default_exposure_millis(),
            token_secret: default_token_secret(),
        }
    }
}

// Default value functions
fn default_redis_url() -> String {
    DEFAULT_REDIS_URL.to_string()
}
fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}
fn default_exposure_millis() -> u64 {
    DEFAULT_EXPOSURE_MILLIS
}
fn default_token_secret() -> String {
    "insecure-dev-secret".to_string()
}

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref redis_url) = args.redis_url {
            config.redis_url = redis_url.clone();
        }
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(ref secret) = args.token_secret {
            config.quiz.token_secret = secret.clone();
        }

        if config.quiz.token_secret == default_token_secret() {
            tracing::warn!("Running with the built-in token secret; set one for any real deployment");
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            listen_addr: default_listen_addr(),
            quiz: QuizConfig::default(),
        }
    }
}
