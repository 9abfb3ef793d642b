//! Quiz questions, score submission and progress

mod helpers;

use axum::http::{header, StatusCode};
use helpers::{error_code, extract_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_questions_in_order() {
    let app = TestApp::seeded().await;

    let response = app.get("/api/tests/arrays/questions", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let questions = extract_json(response).await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 3);
    let order: Vec<i64> = questions
        .iter()
        .map(|q| q["orderIndex"].as_i64().unwrap())
        .collect();
    assert_eq!(order, vec![1, 2, 3]);
    assert!(questions[0]["questionText"].is_string());
    assert!(questions[0]["correctAnswer"].is_string());
}

#[tokio::test]
async fn test_unknown_topic_has_no_questions() {
    let app = TestApp::seeded().await;

    let response = app.get("/api/tests/no-such-topic/questions", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response).await, json!([]));
}

#[tokio::test]
async fn test_score_submission_and_latest() {
    let app = TestApp::seeded().await;
    let cookie = app.register("ada").await;

    let response = app.get("/api/tests/arrays/scores", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(extract_json(response).await, json!(null));

    for score in [33, 100] {
        let response = app
            .post("/api/tests/arrays/scores", json!({ "score": score }), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let saved = extract_json(response).await;
        assert_eq!(saved["score"], score);
        assert!(saved["completedAt"].is_string());
    }

    let response = app.get("/api/tests/arrays/scores", Some(&cookie)).await;
    assert_eq!(extract_json(response).await, json!(100));
}

#[tokio::test]
async fn test_score_for_topic_without_test() {
    let app = TestApp::seeded().await;
    let cookie = app.register("ada").await;

    let response = app
        .post("/api/tests/sorting/scores", json!({ "score": 80 }), Some(&cookie))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(extract_json(response).await["error"]["message"], "Test not found");

    let response = app.get("/api/tests/sorting/scores", Some(&cookie)).await;
    assert_eq!(extract_json(response).await, json!(null));
}

#[tokio::test]
async fn test_score_out_of_range() {
    let app = TestApp::seeded().await;
    let cookie = app.register("ada").await;

    for score in [-5, 101] {
        let response = app
            .post("/api/tests/arrays/scores", json!({ "score": score }), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "score {}", score);
    }
}

#[tokio::test]
async fn test_non_integer_score_is_json_bad_request() {
    let app = TestApp::seeded().await;
    let cookie = app.register("ada").await;

    for body in [json!({ "score": "ninety" }), json!({ "score": 87.5 }), json!({})] {
        let response = app
            .post("/api/tests/arrays/scores", body.clone(), Some(&cookie))
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {}", body);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(error_code(response).await, "BAD_REQUEST");
    }

    let response = app.get("/api/tests/arrays/scores", Some(&cookie)).await;
    assert_eq!(extract_json(response).await, json!(null));
}

#[tokio::test]
async fn test_scores_are_per_user() {
    let app = TestApp::seeded().await;
    let ada = app.register("ada").await;
    let grace = app.register("grace").await;

    app.post("/api/tests/graphs/scores", json!({ "score": 75 }), Some(&ada))
        .await;

    let response = app.get("/api/tests/graphs/scores", Some(&grace)).await;
    assert_eq!(extract_json(response).await, json!(null));
}

#[tokio::test]
async fn test_user_scores_and_progress() {
    let app = TestApp::seeded().await;
    let cookie = app.register("ada").await;

    app.post("/api/tests/arrays/scores", json!({ "score": 40 }), Some(&cookie))
        .await;
    app.post("/api/tests/graphs/scores", json!({ "score": 80 }), Some(&cookie))
        .await;

    let response = app.get("/api/user/scores", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let scores = extract_json(response).await;
    let scores = scores.as_array().unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0]["topicSlug"], "graphs");
    assert_eq!(scores[0]["testTitle"], "Graph Fundamentals");

    let response = app.get("/api/user/progress", Some(&cookie)).await;
    let progress = extract_json(response).await;
    assert_eq!(progress["averageScore"], 60.0);

    let topics = progress["topics"].as_array().unwrap();
    let arrays = topics.iter().find(|t| t["slug"] == "arrays").unwrap();
    assert_eq!(arrays["latestScore"], 40);
    let sorting = topics.iter().find(|t| t["slug"] == "sorting").unwrap();
    assert!(sorting["latestScore"].is_null());
}
