//! Quiz generation and stateless grading.
//!
//! The engine holds no per-session state: everything the grading path
//! needs rides in the encrypted token and the cache entry it points
//! at.

mod generator;
mod service;
mod shuffle;
mod token;

pub use service::QuizService;
pub use token::TokenCodec;
