//! Quiz score queries

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{NewUserScore, ScoreSummary, UserScore};
use crate::{Error, Result};

const SCORE_COLUMNS: &str = "id, user_id, test_id, score, completed_at";

/// Scores are percentages
pub const MAX_SCORE: i64 = 100;

/// Every score of a user, newest first, with the test it belongs to
pub async fn get_user_scores(db: &SqlitePool, user_id: i64) -> Result<Vec<ScoreSummary>> {
    let scores = sqlx::query_as::<_, ScoreSummary>(
        r#"
        SELECT s.id, s.test_id, t.topic_slug, t.title AS test_title, s.score, s.completed_at
        FROM user_scores s
        JOIN tests t ON t.id = s.test_id
        WHERE s.user_id = ?
        ORDER BY s.completed_at DESC, s.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    Ok(scores)
}

pub async fn get_test_scores(db: &SqlitePool, test_id: i64) -> Result<Vec<UserScore>> {
    let scores = sqlx::query_as::<_, UserScore>(&format!(
        "SELECT {SCORE_COLUMNS} FROM user_scores WHERE test_id = ? ORDER BY completed_at, id"
    ))
    .bind(test_id)
    .fetch_all(db)
    .await?;

    Ok(scores)
}

/// Most recent score of one user on one test
pub async fn get_latest_user_score(
    db: &SqlitePool,
    user_id: i64,
    test_id: i64,
) -> Result<Option<UserScore>> {
    let score = sqlx::query_as::<_, UserScore>(&format!(
        r#"
        SELECT {SCORE_COLUMNS} FROM user_scores
        WHERE user_id = ? AND test_id = ?
        ORDER BY completed_at DESC, id DESC
        LIMIT 1
        "#
    ))
    .bind(user_id)
    .bind(test_id)
    .fetch_optional(db)
    .await?;

    Ok(score)
}

pub async fn create_user_score(db: &SqlitePool, score: &NewUserScore) -> Result<UserScore> {
    if !(0..=MAX_SCORE).contains(&score.score) {
        return Err(Error::InvalidInput(format!(
            "Score must be between 0 and {}, got {}",
            MAX_SCORE, score.score
        )));
    }

    let created = sqlx::query_as::<_, UserScore>(&format!(
        r#"
        INSERT INTO user_scores (user_id, test_id, score, completed_at)
        VALUES (?, ?, ?, ?)
        RETURNING {SCORE_COLUMNS}
        "#
    ))
    .bind(score.user_id)
    .bind(score.test_id)
    .bind(score.score)
    .bind(Utc::now())
    .fetch_one(db)
    .await?;

    Ok(created)
}
