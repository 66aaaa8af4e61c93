//! HTTP route handlers for quizd.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use lexiquiz_common::QuizError;

use crate::state::AppState;

mod health;
mod quiz;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health & Status
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Quiz endpoints
        .route("/quizzes/truefalse", get(quiz::true_false_batch))
        .route("/quizzes/blank", get(quiz::blank_batch))
        .route("/quizzes/grade", post(quiz::grade))
        // Request tracing
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}

/// Wire representation of an error
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// [`QuizError`] carried across an axum handler boundary
pub struct ApiError(QuizError);

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
