//! Quiz generation and grading endpoints.
//!
//! The caller's identity arrives in the `X-User-Id` header, injected
//! by the upstream auth layer; this service trusts it as already
//! authenticated.

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use serde::Deserialize;
use uuid::Uuid;

use lexiquiz_common::constants::headers::X_USER_ID;
use lexiquiz_common::{GradeRequest, GradeResult, QuizError, QuizQuestion, QuizType};

use crate::state::AppState;

use super::ApiError;

#[derive(Deserialize)]
pub struct GenerateQuery {
    vocabulary_id: Uuid,
}

/// Generate a true/false batch for one vocabulary
pub async fn true_false_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GenerateQuery>,
) -> Result<Json<Vec<QuizQuestion>>, ApiError> {
    generate(state, headers, params, QuizType::TrueFalse).await
}

/// Generate a fill-in-the-blank batch for one vocabulary
pub async fn blank_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GenerateQuery>,
) -> Result<Json<Vec<QuizQuestion>>, ApiError> {
    generate(state, headers, params, QuizType::FillBlank).await
}

async fn generate(
    state: AppState,
    headers: HeaderMap,
    params: GenerateQuery,
    quiz_type: QuizType,
) -> Result<Json<Vec<QuizQuestion>>, ApiError> {
    let owner_id = owner_id(&headers)?;

    let batch = state
        .quiz
        .generate(owner_id, params.vocabulary_id, quiz_type)
        .await?;

    tracing::debug!(
        owner_id = %owner_id,
        vocabulary_id = %params.vocabulary_id,
        quiz_type = ?quiz_type,
        items = batch.len(),
        "Served quiz batch"
    );

    Ok(Json(batch))
}

/// Grade one submission, redeeming its token
pub async fn grade(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GradeRequest>,
) -> Result<Json<GradeResult>, ApiError> {
    let owner_id = owner_id(&headers)?;

    // No shape check on the submission here: an empty answer is a
    // legitimate give-up and must still redeem the token, and an empty
    // token fails decryption on its own.
    let result = state.quiz.grade(owner_id, &request).await?;
    Ok(Json(result))
}

/// Pull the authenticated caller id out of the request headers
fn owner_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    headers
        .get(X_USER_ID)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .ok_or_else(|| QuizError::InvalidToken.into())
}
