//! Core types shared across Lexiquiz components.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Part-of-speech tag attached to a definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Interjection,
}

/// A single candidate definition for a word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    /// Short definition text shown as a quiz option
    pub definition: String,

    /// Part-of-speech tag
    pub part: PartOfSpeech,
}

/// A word as stored by the (external) dictionary subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    /// Word identifier
    pub id: Uuid,

    /// Display expression, at most 45 characters
    pub expression: String,
}

/// A word enriched with its candidate definitions, as supplied by the
/// external dictionary collaborator per generation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordWithDefinitions {
    pub word: WordEntry,

    /// Candidate definitions; order carries no meaning. May be empty,
    /// in which case the word still yields a quiz item with an
    /// empty-string option.
    pub definitions: Vec<DefinitionEntry>,
}

impl WordWithDefinitions {
    /// Check whether `text` is one of this word's own definitions
    pub fn has_definition(&self, text: &str) -> bool {
        self.definitions.iter().any(|d| d.definition == text)
    }
}

/// Kind of quiz to generate. Closed set: dispatch is an explicit
/// match, never a runtime registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    /// Word paired with a (possibly swapped) definition; answered "1"/"0"
    TrueFalse,
    /// Expression with half its characters blanked out; answered with
    /// the full expression
    FillBlank,
}

/// A freshly generated quiz item. Lives only in memory and, as its
/// answer, in the cache store; never persisted durably.
#[derive(Debug, Clone)]
pub struct QuizItem {
    /// Item identifier, fresh per generation call
    pub id: Uuid,

    /// Caller the item was generated for
    pub owner_id: Uuid,

    /// Word this item quizzes
    pub word_id: Uuid,

    /// Question text shown to the client
    pub stem: String,

    /// Expected answer. Registered in the cache store, never sent to
    /// the client.
    pub answer: String,

    /// Options displayed alongside the stem
    pub options: Vec<String>,
}

/// Client-facing view of a generated quiz item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Opaque grading token; the encrypted cache key
    pub token: String,

    /// Question text
    pub stem: String,

    /// Displayed options
    pub options: Vec<String>,

    /// Milliseconds until the whole batch expires
    pub expires_in_millis: u64,
}

/// Grading submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub token: String,
    pub answer: String,
}

/// Grading outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub is_correct: bool,

    /// Revealed once the token has been redeemed
    pub correct_answer: String,
}
