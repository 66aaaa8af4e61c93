//! Quiz item generation.
//!
//! Two fixed strategies behind one entry point, selected by
//! [`QuizType`]. Both emit items in deranged word order so repeated
//! generation calls never correlate item position with a particular
//! word.

use rand::Rng;
use uuid::Uuid;

use lexiquiz_common::{QuizItem, QuizType, WordWithDefinitions};

use super::shuffle::{derange, partial_derange, pick_indices};

/// Generate one quiz item per word, in deranged word order.
///
/// An empty word list yields an empty batch.
pub fn generate(quiz_type: QuizType, owner_id: Uuid, words: &[WordWithDefinitions]) -> Vec<QuizItem> {
    match quiz_type {
        QuizType::TrueFalse => true_false(owner_id, words),
        QuizType::FillBlank => fill_blank(owner_id, words),
    }
}

/// Pick one random definition as the displayed option; a word with no
/// definitions contributes an empty-string option.
fn pick_option(word: &WordWithDefinitions) -> String {
    if word.definitions.is_empty() {
        return String::new();
    }
    let idx = rand::rng().random_range(0..word.definitions.len());
    word.definitions[idx].definition.clone()
}

/// True/false items: each word is shown with one definition that a
/// partial derangement may have swapped in from another word. The
/// answer is "1" when the displayed option really belongs to the word,
/// "0" otherwise.
fn true_false(owner_id: Uuid, words: &[WordWithDefinitions]) -> Vec<QuizItem> {
    let mut words = words.to_vec();
    derange(&mut words);

    let mut options: Vec<String> = words.iter().map(pick_option).collect();
    partial_derange(options.len() / 2 + 1, &mut options);

    words
        .iter()
        .zip(options)
        .map(|(word, option)| {
            let answer = if word.has_definition(&option) { "1" } else { "0" };
            QuizItem {
                id: Uuid::new_v4(),
                owner_id,
                word_id: word.word.id,
                stem: word.word.expression.clone(),
                answer: answer.to_string(),
                options: vec![option],
            }
        })
        .collect()
}

/// Fill-in-the-blank items: the stem is the expression with
/// `len / 2 + 1` character positions blanked out; the option is one of
/// the word's own definitions (not cross-shuffled); the answer is the
/// full expression.
fn fill_blank(owner_id: Uuid, words: &[WordWithDefinitions]) -> Vec<QuizItem> {
    let mut words = words.to_vec();
    derange(&mut words);

    words
        .iter()
        .map(|word| {
            let option = pick_option(word);
            QuizItem {
                id: Uuid::new_v4(),
                owner_id,
                word_id: word.word.id,
                stem: blank_out(&word.word.expression),
                answer: word.word.expression.clone(),
                options: vec![option],
            }
        })
        .collect()
}

/// Replace `len / 2 + 1` randomly chosen characters with underscores
fn blank_out(expression: &str) -> String {
    let mut chars: Vec<char> = expression.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let blank_count = (chars.len() / 2 + 1).min(chars.len());
    for idx in pick_indices(blank_count, chars.len()) {
        chars[idx] = '_';
    }

    chars.into_iter().collect()
}
