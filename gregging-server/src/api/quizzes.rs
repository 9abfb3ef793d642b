//! Quiz questions and score submission
//!
//! A topic slug maps to its first test; topics without a test have no
//! questions and accept no scores.

use axum::{
    extract::{Path, State},
    Json,
};
use gregging_common::db::{quizzes, scores, NewUserScore, Question, UserScore};
use serde::Deserialize;
use tracing::info;

use super::auth::AuthUser;
use super::json::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: i64,
}

/// GET /api/tests/:slug/questions
pub async fn get_questions(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Vec<Question>>> {
    let Some(test) = quizzes::get_primary_test(&state.db, &slug).await? else {
        return Ok(Json(Vec::new()));
    };

    let questions = quizzes::get_questions(&state.db, test.id).await?;
    Ok(Json(questions))
}

/// GET /api/tests/:slug/scores
///
/// The caller's most recent score on the topic's test, or `null`.
pub async fn get_latest_score(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
) -> ApiResult<Json<Option<i64>>> {
    let Some(test) = quizzes::get_primary_test(&state.db, &slug).await? else {
        return Ok(Json(None));
    };

    let latest = scores::get_latest_user_score(&state.db, user.id, test.id).await?;
    Ok(Json(latest.map(|score| score.score)))
}

/// POST /api/tests/:slug/scores
pub async fn submit_score(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
    ApiJson(req): ApiJson<SubmitScoreRequest>,
) -> ApiResult<Json<UserScore>> {
    let test = quizzes::get_primary_test(&state.db, &slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Test not found".to_string()))?;

    let saved = scores::create_user_score(
        &state.db,
        &NewUserScore {
            user_id: user.id,
            test_id: test.id,
            score: req.score,
        },
    )
    .await?;

    info!(user_id = user.id, topic = %slug, score = saved.score, "Recorded quiz score");
    Ok(Json(saved))
}
