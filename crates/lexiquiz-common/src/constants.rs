//! Shared constants for Lexiquiz components.

/// Default Redis connection URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default quizd HTTP listen address
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

/// Namespace tag embedded at the head of every quiz cache key
pub const QUIZ_KEY_TAG: &str = "quiz";

/// How long a single quiz item stays answerable (milliseconds).
/// A batch of N items shares a TTL of N times this value.
pub const DEFAULT_EXPOSURE_MILLIS: u64 = 15_000;

/// Maximum shuffle attempts before the derangement routine gives up
/// and returns its last (possibly fixed-point-carrying) attempt
pub const DERANGE_MAX_ATTEMPTS: u32 = 30;

/// Redis key prefixes
pub mod redis_keys {
    /// Published word list: vocab:{owner_id}:{vocabulary_id}
    pub const VOCAB_PREFIX: &str = "vocab:";

    /// Grading counters: stats:{word_id}:correct / stats:{word_id}:incorrect
    pub const STATS_PREFIX: &str = "stats:";
}

/// HTTP header names
pub mod headers {
    /// Authenticated caller identity, injected by the upstream auth layer
    pub const X_USER_ID: &str = "X-User-Id";
}
