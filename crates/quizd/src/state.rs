//! Application state and shared resources.

use anyhow::{Context, Result};
use redis::aio::ConnectionManager;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::providers::{RedisStatisticsSink, RedisWordSource};
use crate::quiz::{QuizService, TokenCodec};
use crate::store::RedisAnswerStore;

/// The quiz service with its production adapters wired in
pub type Service = QuizService<RedisWordSource, RedisStatisticsSink, RedisAnswerStore>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Redis connection manager (auto-reconnecting)
    pub redis: ConnectionManager,

    /// Quiz orchestration service
    pub quiz: Arc<Service>,
}

impl AppState {
    /// Create new application state, connecting to Redis
    pub async fn new(config: AppConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())
            .context("Failed to create Redis client")?;

        let redis = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;

        let quiz = Arc::new(QuizService::new(
            RedisWordSource::new(redis.clone()),
            RedisStatisticsSink::new(redis.clone()),
            RedisAnswerStore::new(redis.clone()),
            TokenCodec::new(&config.quiz.token_secret),
            config.quiz.exposure_millis,
        ));

        Ok(Self {
            config,
            redis,
            quiz,
        })
    }
}
