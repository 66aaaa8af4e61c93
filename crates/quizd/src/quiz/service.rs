//! Quiz orchestration.
//!
//! Generation: fetch the word list, build items, register each answer
//! in the cache store under a composite key, hand the client the
//! encrypted key as its token. Grading: decrypt and validate the
//! token, atomically take the cached answer, compare, and bump the
//! word's statistics counters best-effort.
//!
//! Per token the lifecycle is ISSUED -> REDEEMED or ISSUED -> EXPIRED,
//! both terminal. A caller cannot tell the two terminal states apart:
//! grading either one reports the quiz as gone rather than leaking
//! whether a token was ever redeemed.

use uuid::Uuid;

use lexiquiz_common::{GradeRequest, GradeResult, QuizError, QuizQuestion, QuizType};

use crate::providers::{StatisticsSink, WordSource};
use crate::store::AnswerStore;

use super::generator;
use super::token::{QuizKey, TokenCodec};

/// Composes the generators, token codec, cache store, and external
/// collaborators into the two public quiz operations
pub struct QuizService<W, S, C> {
    words: W,
    stats: S,
    store: C,
    codec: TokenCodec,
    exposure_millis: u64,
}

impl<W, S, C> QuizService<W, S, C>
where
    W: WordSource,
    S: StatisticsSink,
    C: AnswerStore,
{
    pub fn new(words: W, stats: S, store: C, codec: TokenCodec, exposure_millis: u64) -> Self {
        Self {
            words,
            stats,
            store,
            codec,
            exposure_millis,
        }
    }

    /// Generate a quiz batch for one vocabulary.
    ///
    /// Every item in the batch shares one TTL of `exposure_millis`
    /// times the batch size. An empty vocabulary yields an empty batch
    /// and writes nothing to the store; a missing or foreign
    /// vocabulary fails with [`QuizError::NotFound`] before any store
    /// write happens.
    pub async fn generate(
        &self,
        owner_id: Uuid,
        vocabulary_id: Uuid,
        quiz_type: QuizType,
    ) -> Result<Vec<QuizQuestion>, QuizError> {
        let words = self.words.vocabulary_words(owner_id, vocabulary_id).await?;
        if words.is_empty() {
            return Ok(Vec::new());
        }

        let items = generator::generate(quiz_type, owner_id, &words);
        let ttl_millis = self.exposure_millis * items.len() as u64;

        let mut questions = Vec::with_capacity(items.len());
        for item in items {
            let key = QuizKey {
                owner_id: item.owner_id,
                word_id: item.word_id,
                item_id: item.id,
            };
            let cache_key = key.cache_key();

            self.store.put(&cache_key, &item.answer, ttl_millis).await?;
            let token = self.codec.encrypt(&cache_key)?;

            questions.push(QuizQuestion {
                token,
                stem: item.stem,
                options: item.options,
                expires_in_millis: ttl_millis,
            });
        }

        tracing::debug!(
            owner_id = %owner_id,
            vocabulary_id = %vocabulary_id,
            quiz_type = ?quiz_type,
            items = questions.len(),
            ttl_millis,
            "Generated quiz batch"
        );

        Ok(questions)
    }

    /// Grade one submission, redeeming its token exactly once.
    ///
    /// Token validity is confirmed before the store is touched, so a
    /// malformed token never reaches the destructive read. A second
    /// grading attempt with the same token, or one past the batch TTL,
    /// fails with [`QuizError::QuizExpired`].
    pub async fn grade(
        &self,
        owner_id: Uuid,
        request: &GradeRequest,
    ) -> Result<GradeResult, QuizError> {
        let plain = self.codec.decrypt(&request.token)?;
        let key = QuizKey::parse(&plain)?;

        // A valid token minted for someone else is reported the same
        // way as a vanished quiz, not as a distinct condition.
        if key.owner_id != owner_id {
            return Err(QuizError::QuizExpired);
        }

        let correct_answer = self
            .store
            .take(&plain)
            .await?
            .ok_or(QuizError::QuizExpired)?;

        let is_correct = request.answer == correct_answer;

        // Best-effort side effect: the grade stands even if the
        // counter update fails.
        let recorded = if is_correct {
            self.stats.record_correct(key.word_id).await
        } else {
            self.stats.record_incorrect(key.word_id).await
        };
        if let Err(e) = recorded {
            tracing::warn!(
                word_id = %key.word_id,
                error = %e,
                "Statistics update failed after grading"
            );
        }

        Ok(GradeResult {
            is_correct,
            correct_answer,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use lexiquiz_common::{DefinitionEntry, PartOfSpeech, WordEntry, WordWithDefinitions};

    use crate::store::MemoryAnswerStore;

    use super::*;

    struct FakeWordSource {
        vocabularies: HashMap<(Uuid, Uuid), Vec<WordWithDefinitions>>,
    }

    #[async_trait]
    impl WordSource for FakeWordSource {
        async fn vocabulary_words(
            &self,
            owner_id: Uuid,
            vocabulary_id: Uuid,
        ) -> Result<Vec<WordWithDefinitions>, QuizError> {
            self.vocabularies
                .get(&(owner_id, vocabulary_id))
                .cloned()
                .ok_or_else(|| QuizError::NotFound("vocabulary".into()))
        }
    }

    #[derive(Clone, Default)]
    struct RecordingStats {
        counts: Arc<Mutex<HashMap<Uuid, (u32, u32)>>>,
        fail: bool,
    }

    #[async_trait]
    impl StatisticsSink for RecordingStats {
        async fn record_correct(&self, word_id: Uuid) -> Result<(), QuizError> {
            if self.fail {
                return Err(QuizError::Store("stats down".into()));
            }
            self.counts.lock().unwrap().entry(word_id).or_default().0 += 1;
            Ok(())
        }

        async fn record_incorrect(&self, word_id: Uuid) -> Result<(), QuizError> {
            if self.fail {
                return Err(QuizError::Store("stats down".into()));
            }
            self.counts.lock().unwrap().entry(word_id).or_default().1 += 1;
            Ok(())
        }
    }

    fn word(expression: &str, definition: &str) -> WordWithDefinitions {
        WordWithDefinitions {
            word: WordEntry {
                id: Uuid::new_v4(),
                expression: expression.to_string(),
            },
            definitions: vec![DefinitionEntry {
                definition: definition.to_string(),
                part: PartOfSpeech::Noun,
            }],
        }
    }

    fn five_words() -> Vec<WordWithDefinitions> {
        vec![
            word("Hello", "안녕"),
            word("Apple", "사과"),
            word("Run", "뛰다"),
            word("Edit", "편집하다"),
            word("Amazing", "개쩌는"),
        ]
    }

    struct Fixture {
        service: QuizService<FakeWordSource, RecordingStats, MemoryAnswerStore>,
        stats: RecordingStats,
        owner_id: Uuid,
        vocabulary_id: Uuid,
        words: Vec<WordWithDefinitions>,
    }

    fn fixture(words: Vec<WordWithDefinitions>, exposure_millis: u64) -> Fixture {
        let owner_id = Uuid::new_v4();
        let vocabulary_id = Uuid::new_v4();

        let mut vocabularies = HashMap::new();
        vocabularies.insert((owner_id, vocabulary_id), words.clone());

        let stats = RecordingStats::default();
        let service = QuizService::new(
            FakeWordSource { vocabularies },
            stats.clone(),
            MemoryAnswerStore::new(),
            TokenCodec::new("service-test-secret"),
            exposure_millis,
        );

        Fixture {
            service,
            stats,
            owner_id,
            vocabulary_id,
            words,
        }
    }

    #[tokio::test]
    async fn true_false_batch_grades_all_correct_end_to_end() {
        let f = fixture(five_words(), 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::TrueFalse)
            .await
            .unwrap();
        assert_eq!(questions.len(), 5);

        for question in &questions {
            assert_eq!(question.expires_in_millis, 15_000 * 5);

            // Derive the truthful boolean answer from the client view
            let source = f
                .words
                .iter()
                .find(|w| w.word.expression == question.stem)
                .expect("stem matches a known expression");
            let answer = if source.has_definition(&question.options[0]) {
                "1"
            } else {
                "0"
            };

            let result = f
                .service
                .grade(
                    f.owner_id,
                    &GradeRequest {
                        token: question.token.clone(),
                        answer: answer.to_string(),
                    },
                )
                .await
                .unwrap();

            assert!(result.is_correct, "stem {:?}", question.stem);
        }

        let counts = f.stats.counts.lock().unwrap();
        assert_eq!(counts.values().map(|c| c.0).sum::<u32>(), 5);
        assert_eq!(counts.values().map(|c| c.1).sum::<u32>(), 0);
    }

    #[tokio::test]
    async fn fill_blank_grades_against_the_full_expression() {
        let f = fixture(vec![word("Apple", "사과")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
        assert!(questions[0].stem.contains('_'));

        let result = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "Apple".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_correct);
        assert_eq!(result.correct_answer, "Apple");
    }

    #[tokio::test]
    async fn a_token_is_redeemable_exactly_once() {
        let f = fixture(vec![word("Run", "뛰다")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();
        let request = GradeRequest {
            token: questions[0].token.clone(),
            answer: "Run".to_string(),
        };

        let first = f.service.grade(f.owner_id, &request).await.unwrap();
        assert!(first.is_correct);

        let second = f.service.grade(f.owner_id, &request).await;
        assert!(matches!(second, Err(QuizError::QuizExpired)));
    }

    #[tokio::test]
    async fn an_incorrect_answer_still_reveals_the_correct_one() {
        let f = fixture(vec![word("Edit", "편집하다")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();

        let result = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "wrong".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(!result.is_correct);
        assert_eq!(result.correct_answer, "Edit");

        let counts = f.stats.counts.lock().unwrap();
        assert_eq!(counts.values().map(|c| c.1).sum::<u32>(), 1);
    }

    #[tokio::test]
    async fn an_empty_answer_still_redeems_the_token_as_incorrect() {
        let f = fixture(vec![word("Amazing", "개쩌는")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();

        // Giving up on a fill-in-the-blank item submits an empty
        // string; that is a gradable answer, not a malformed request.
        let result = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: String::new(),
                },
            )
            .await
            .unwrap();

        assert!(!result.is_correct);
        assert_eq!(result.correct_answer, "Amazing");

        let incorrect: u32 = f
            .stats
            .counts
            .lock()
            .unwrap()
            .values()
            .map(|c| c.1)
            .sum();
        assert_eq!(incorrect, 1);

        // The token was consumed by the give-up, not left live
        let again = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "Amazing".to_string(),
                },
            )
            .await;
        assert!(matches!(again, Err(QuizError::QuizExpired)));
    }

    #[tokio::test]
    async fn grading_after_the_batch_ttl_reports_expiry() {
        let f = fixture(vec![word("Hello", "안녕")], 5);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();
        assert_eq!(questions[0].expires_in_millis, 5);

        tokio::time::sleep(Duration::from_millis(40)).await;

        let result = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "Hello".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(QuizError::QuizExpired)));
    }

    #[tokio::test]
    async fn tampered_tokens_are_rejected_before_the_store_is_touched() {
        let f = fixture(vec![word("Apple", "사과")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::TrueFalse)
            .await
            .unwrap();

        let mut bytes = questions[0].token.clone().into_bytes();
        bytes[3] = if bytes[3] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        let result = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: tampered,
                    answer: "1".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(QuizError::InvalidToken)));

        // The untampered token must still be redeemable afterwards
        let intact = f
            .service
            .grade(
                f.owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "0".to_string(),
                },
            )
            .await;
        assert!(intact.is_ok());
    }

    #[tokio::test]
    async fn someone_elses_token_reads_as_no_such_quiz() {
        let f = fixture(vec![word("Run", "뛰다")], 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();

        let result = f
            .service
            .grade(
                Uuid::new_v4(),
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "Run".to_string(),
                },
            )
            .await;
        assert!(matches!(result, Err(QuizError::QuizExpired)));
    }

    #[tokio::test]
    async fn repeated_generation_issues_disjoint_tokens() {
        let f = fixture(five_words(), 15_000);

        let first = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::TrueFalse)
            .await
            .unwrap();
        let second = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::TrueFalse)
            .await
            .unwrap();

        for a in &first {
            assert!(second.iter().all(|b| b.token != a.token));
        }
    }

    #[tokio::test]
    async fn empty_vocabulary_yields_an_empty_batch() {
        let f = fixture(Vec::new(), 15_000);

        let questions = f
            .service
            .generate(f.owner_id, f.vocabulary_id, QuizType::TrueFalse)
            .await
            .unwrap();
        assert!(questions.is_empty());
    }

    #[tokio::test]
    async fn unknown_vocabulary_fails_before_any_store_write() {
        let f = fixture(five_words(), 15_000);

        let result = f
            .service
            .generate(f.owner_id, Uuid::new_v4(), QuizType::TrueFalse)
            .await;
        assert!(matches!(result, Err(QuizError::NotFound(_))));
    }

    #[tokio::test]
    async fn a_failing_statistics_sink_does_not_overturn_the_grade() {
        let owner_id = Uuid::new_v4();
        let vocabulary_id = Uuid::new_v4();
        let mut vocabularies = HashMap::new();
        vocabularies.insert((owner_id, vocabulary_id), vec![word("Apple", "사과")]);

        let service = QuizService::new(
            FakeWordSource { vocabularies },
            RecordingStats {
                fail: true,
                ..RecordingStats::default()
            },
            MemoryAnswerStore::new(),
            TokenCodec::new("service-test-secret"),
            15_000,
        );

        let questions = service
            .generate(owner_id, vocabulary_id, QuizType::FillBlank)
            .await
            .unwrap();

        let result = service
            .grade(
                owner_id,
                &GradeRequest {
                    token: questions[0].token.clone(),
                    answer: "Apple".to_string(),
                },
            )
            .await
            .unwrap();
        assert!(result.is_correct);
    }
}
