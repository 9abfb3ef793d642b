//! Lesson catalog endpoints

use axum::{
    extract::{Path, Query},
    Json,
};
use gregging_common::topics::{self, Category, Topic, TopicSummary};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct TopicQuery {
    pub category: Option<String>,
}

/// GET /api/topics[?category=data-structures|algorithms]
pub async fn list_topics(Query(query): Query<TopicQuery>) -> ApiResult<Json<Vec<TopicSummary>>> {
    let summaries = match query.category.as_deref() {
        Some(category) => {
            let category: Category = category.parse()?;
            topics::by_category(category).map(TopicSummary::from).collect()
        }
        None => topics::all().iter().map(TopicSummary::from).collect(),
    };

    Ok(Json(summaries))
}

/// GET /api/topics/:slug
pub async fn get_topic(Path(slug): Path<String>) -> ApiResult<Json<Topic>> {
    topics::by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Topic '{}' not found", slug)))
}
