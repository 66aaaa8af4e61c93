//! Redis adapters for the collaborator ports.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use uuid::Uuid;

use lexiquiz_common::constants::redis_keys::{STATS_PREFIX, VOCAB_PREFIX};
use lexiquiz_common::{QuizError, WordWithDefinitions};

use super::{StatisticsSink, WordSource};

/// Reads word lists the dictionary subsystem publishes as JSON under
/// `vocab:{owner_id}:{vocabulary_id}`
#[derive(Clone)]
pub struct RedisWordSource {
    redis: ConnectionManager,
}

impl RedisWordSource {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl WordSource for RedisWordSource {
    async fn vocabulary_words(
        &self,
        owner_id: Uuid,
        vocabulary_id: Uuid,
    ) -> Result<Vec<WordWithDefinitions>, QuizError> {
        let key = format!("{VOCAB_PREFIX}{owner_id}:{vocabulary_id}");

        let mut conn = self.redis.clone();
        let raw: Option<String> = conn
            .get(&key)
            .await
            .map_err(|e| QuizError::Store(e.to_string()))?;

        // The key embeds the owner, so an absent key covers both "no
        // such vocabulary" and "not yours".
        let raw = raw.ok_or_else(|| {
            QuizError::NotFound(format!("vocabulary {vocabulary_id} not found"))
        })?;

        serde_json::from_str(&raw)
            .map_err(|e| QuizError::Upstream(format!("malformed word list for {key}: {e}")))
    }
}

/// Bumps `stats:{word_id}:correct` / `stats:{word_id}:incorrect`
/// counters for the statistics subsystem to collect
#[derive(Clone)]
pub struct RedisStatisticsSink {
    redis: ConnectionManager,
}

impl RedisStatisticsSink {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    async fn bump(&self, word_id: Uuid, outcome: &str) -> Result<(), QuizError> {
        let key = format!("{STATS_PREFIX}{word_id}:{outcome}");
        let mut conn = self.redis.clone();
        conn.incr::<_, _, i64>(&key, 1)
            .await
            .map(|_| ())
            .map_err(|e| QuizError::Store(e.to_string()))
    }
}

#[async_trait]
impl StatisticsSink for RedisStatisticsSink {
    async fn record_correct(&self, word_id: Uuid) -> Result<(), QuizError> {
        self.bump(word_id, "correct").await
    }

    async fn record_incorrect(&self, word_id: Uuid) -> Result<(), QuizError> {
        self.bump(word_id, "incorrect").await
    }
}
