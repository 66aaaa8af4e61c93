//! Ports to the external vocabulary and statistics subsystems.
//!
//! The CRUD services that own vocabularies, words, and learning
//! statistics live outside this engine. The engine consumes them
//! through these two traits; the bundled adapters read word lists the
//! CRUD side publishes into Redis and bump grading counters there.

mod redis;

pub use self::redis::{RedisStatisticsSink, RedisWordSource};

use async_trait::async_trait;
use uuid::Uuid;

use lexiquiz_common::{QuizError, WordWithDefinitions};

/// Supplies a vocabulary's words enriched with their definitions
#[async_trait]
pub trait WordSource: Send + Sync {
    /// Fetch the word list for `vocabulary_id`.
    ///
    /// Fails with [`QuizError::NotFound`] when the vocabulary does not
    /// exist or does not belong to `owner_id`.
    async fn vocabulary_words(
        &self,
        owner_id: Uuid,
        vocabulary_id: Uuid,
    ) -> Result<Vec<WordWithDefinitions>, QuizError>;
}

/// Records per-word grading outcomes
#[async_trait]
pub trait StatisticsSink: Send + Sync {
    async fn record_correct(&self, word_id: Uuid) -> Result<(), QuizError>;

    async fn record_incorrect(&self, word_id: Uuid) -> Result<(), QuizError>;
}
