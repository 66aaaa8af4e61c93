//! # Lexiquiz Common
//!
//! Shared types, traits, and utilities used across Lexiquiz components.
//!
//! ## Modules
//! - `types` - Core data structures (WordWithDefinitions, QuizItem, etc.)
//! - `error` - Common error types
//! - `constants` - Shared configuration constants

pub mod constants;
pub mod error;
pub mod types;

pub use error::QuizError;
pub use types::*;
