//! Test and question queries

use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{NewQuestion, NewTest, Question, Test};
use crate::Result;

const TEST_COLUMNS: &str = "id, topic_slug, title, description, difficulty, created_at";
const QUESTION_COLUMNS: &str =
    "id, test_id, question_text, correct_answer, explanation, order_index";

pub async fn get_test(db: &SqlitePool, id: i64) -> Result<Option<Test>> {
    let test = sqlx::query_as::<_, Test>(&format!("SELECT {TEST_COLUMNS} FROM tests WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(test)
}

/// All tests for a topic, oldest first
pub async fn get_tests_by_topic(db: &SqlitePool, topic_slug: &str) -> Result<Vec<Test>> {
    let tests = sqlx::query_as::<_, Test>(&format!(
        "SELECT {TEST_COLUMNS} FROM tests WHERE topic_slug = ? ORDER BY id"
    ))
    .bind(topic_slug)
    .fetch_all(db)
    .await?;

    Ok(tests)
}

/// The test a topic page presents: the first one created for the slug
pub async fn get_primary_test(db: &SqlitePool, topic_slug: &str) -> Result<Option<Test>> {
    Ok(get_tests_by_topic(db, topic_slug).await?.into_iter().next())
}

pub async fn create_test(db: &SqlitePool, test: &NewTest) -> Result<Test> {
    let created = sqlx::query_as::<_, Test>(&format!(
        r#"
        INSERT INTO tests (topic_slug, title, description, difficulty, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {TEST_COLUMNS}
        "#
    ))
    .bind(&test.topic_slug)
    .bind(&test.title)
    .bind(&test.description)
    .bind(&test.difficulty)
    .bind(Utc::now())
    .fetch_one(db)
    .await?;

    Ok(created)
}

/// Questions of a test in presentation order
pub async fn get_questions(db: &SqlitePool, test_id: i64) -> Result<Vec<Question>> {
    let questions = sqlx::query_as::<_, Question>(&format!(
        "SELECT {QUESTION_COLUMNS} FROM questions WHERE test_id = ? ORDER BY order_index, id"
    ))
    .bind(test_id)
    .fetch_all(db)
    .await?;

    Ok(questions)
}

pub async fn create_question(db: &SqlitePool, question: &NewQuestion) -> Result<Question> {
    let created = sqlx::query_as::<_, Question>(&format!(
        r#"
        INSERT INTO questions (test_id, question_text, correct_answer, explanation, order_index)
        VALUES (?, ?, ?, ?, ?)
        RETURNING {QUESTION_COLUMNS}
        "#
    ))
    .bind(question.test_id)
    .bind(&question.question_text)
    .bind(&question.correct_answer)
    .bind(&question.explanation)
    .bind(question.order_index)
    .fetch_one(db)
    .await?;

    Ok(created)
}
