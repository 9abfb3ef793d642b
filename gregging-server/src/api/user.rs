//! Per-user score history and progress across the lesson catalog

use axum::{extract::State, Json};
use gregging_common::db::{scores, ScoreSummary};
use gregging_common::topics;
use serde::Serialize;

use super::auth::AuthUser;
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub slug: String,
    pub title: String,
    pub latest_score: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    /// Mean of every recorded score; 0 with no attempts
    pub average_score: f64,
    pub topics: Vec<TopicProgress>,
}

/// GET /api/user/scores
pub async fn user_scores(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<ScoreSummary>>> {
    let history = scores::get_user_scores(&state.db, user.id).await?;
    Ok(Json(history))
}

/// GET /api/user/progress
pub async fn user_progress(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<ProgressResponse>> {
    let history = scores::get_user_scores(&state.db, user.id).await?;
    Ok(Json(summarize(&history)))
}

/// `history` is newest first, so the first hit per topic is the latest
fn summarize(history: &[ScoreSummary]) -> ProgressResponse {
    let average_score = if history.is_empty() {
        0.0
    } else {
        history.iter().map(|s| s.score as f64).sum::<f64>() / history.len() as f64
    };

    let topics = topics::all()
        .iter()
        .map(|topic| TopicProgress {
            slug: topic.slug.clone(),
            title: topic.title.clone(),
            latest_score: history
                .iter()
                .find(|s| s.topic_slug == topic.slug)
                .map(|s| s.score),
        })
        .collect();

    ProgressResponse {
        average_score,
        topics,
    }
}
