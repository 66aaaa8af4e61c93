//! Redis-backed answer store.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use lexiquiz_common::QuizError;

use super::AnswerStore;

/// Answer store on a shared auto-reconnecting Redis connection
#[derive(Clone)]
pub struct RedisAnswerStore {
    redis: ConnectionManager,
}

impl RedisAnswerStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl AnswerStore for RedisAnswerStore {
    async fn put(&self, key: &str, answer: &str, ttl_millis: u64) -> Result<(), QuizError> {
        let mut conn = self.redis.clone();
        conn.pset_ex::<_, _, ()>(key, answer, ttl_millis)
            .await
            .map_err(|e| QuizError::Store(e.to_string()))
    }

    async fn take(&self, key: &str) -> Result<Option<String>, QuizError> {
        let mut conn = self.redis.clone();
        // GETDEL (Redis 6.2+): fetch-and-remove in one round trip, so
        // concurrent redemptions of the same token cannot both win.
        conn.get_del::<_, Option<String>>(key)
            .await
            .map_err(|e| QuizError::Store(e.to_string()))
    }
}
