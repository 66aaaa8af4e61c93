//! In-memory answer store with lazy TTL expiry.
//!
//! Single-process stand-in for Redis, mainly exercised by tests. The
//! map mutex is held only across the lookup itself, so `take` keeps
//! the same atomic fetch-and-remove semantics as GETDEL.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use lexiquiz_common::QuizError;

use super::AnswerStore;

struct Entry {
    answer: String,
    deadline: Instant,
}

/// HashMap-backed [`AnswerStore`]; entries expire lazily on access
#[derive(Default)]
pub struct MemoryAnswerStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnswerStore for MemoryAnswerStore {
    async fn put(&self, key: &str, answer: &str, ttl_millis: u64) -> Result<(), QuizError> {
        let entry = Entry {
            answer: answer.to_string(),
            deadline: Instant::now() + Duration::from_millis(ttl_millis),
        };
        self.entries
            .lock()
            .map_err(|_| QuizError::Store("answer store poisoned".into()))?
            .insert(key.to_string(), entry);
        Ok(())
    }

    async fn take(&self, key: &str) -> Result<Option<String>, QuizError> {
        let entry = self
            .entries
            .lock()
            .map_err(|_| QuizError::Store("answer store poisoned".into()))?
            .remove(key);

        // An entry past its deadline is as gone as a redeemed one
        Ok(entry
            .filter(|e| Instant::now() < e.deadline)
            .map(|e| e.answer))
    }
}
