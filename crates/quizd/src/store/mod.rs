//! Pending-answer cache store.
//!
//! One entry per issued quiz item: `quiz:{owner}:{word}:{item}` maps
//! to the correct answer until it is redeemed or its TTL lapses.
//! Redemption is a single atomic get-and-delete; a read followed by a
//! separate delete would let two concurrent grading calls both observe
//! the value and both redeem the token.

mod memory;
mod redis;

pub use memory::MemoryAnswerStore;
pub use self::redis::RedisAnswerStore;

use async_trait::async_trait;
use lexiquiz_common::QuizError;

/// Key-value store with per-entry TTL holding pending quiz answers
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Register an answer under `key` for `ttl_millis` milliseconds
    async fn put(&self, key: &str, answer: &str, ttl_millis: u64) -> Result<(), QuizError>;

    /// Atomically fetch and delete the entry under `key`.
    ///
    /// Returns `None` when the entry is absent, whether it expired or
    /// was already taken; a key can never be taken twice.
    async fn take(&self, key: &str) -> Result<Option<String>, QuizError>;
}
