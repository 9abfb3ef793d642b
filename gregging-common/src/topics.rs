//! Static lesson catalog
//!
//! Topics are compiled into the binary from `data/topics.json`. They are
//! read-only; quizzes reference them by slug.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

static TOPICS_JSON: &str = include_str!("../data/topics.json");

static CATALOG: Lazy<Vec<Topic>> = Lazy::new(|| {
    serde_json::from_str(TOPICS_JSON).expect("data/topics.json is embedded at build time and must parse")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    DataStructures,
    Algorithms,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DataStructures => "data-structures",
            Category::Algorithms => "algorithms",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "data-structures" => Ok(Category::DataStructures),
            "algorithms" => Ok(Category::Algorithms),
            other => Err(Error::InvalidInput(format!("Unknown category: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleCode {
    pub javascript: String,
    pub python: String,
}

/// A lesson: title, description, HTML body and runnable examples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    pub slug: String,
    pub category: Category,
    pub description: String,
    /// HTML
    pub content: String,
    pub example_code: ExampleCode,
}

/// Listing view without the lesson body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub title: String,
    pub slug: String,
    pub category: Category,
    pub description: String,
}

impl From<&Topic> for TopicSummary {
    fn from(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            slug: topic.slug.clone(),
            category: topic.category,
            description: topic.description.clone(),
        }
    }
}

/// Every topic in catalog order
pub fn all() -> &'static [Topic] {
    &CATALOG
}

pub fn by_slug(slug: &str) -> Option<&'static Topic> {
    CATALOG.iter().find(|topic| topic.slug == slug)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Topic> {
    CATALOG.iter().filter(move |topic| topic.category == category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_parses() {
        assert!(!all().is_empty());
    }

    #[test]
    fn test_slugs_are_unique() {
        let slugs: HashSet<_> = all().iter().map(|t| t.slug.as_str()).collect();
        assert_eq!(slugs.len(), all().len());
    }

    #[test]
    fn test_lookup_by_slug() {
        let arrays = by_slug("arrays").expect("arrays topic");
        assert_eq!(arrays.title, "Arrays");
        assert_eq!(arrays.category, Category::DataStructures);
        assert!(arrays.content.contains("<h2>"));
        assert!(by_slug("no-such-topic").is_none());
    }

    #[test]
    fn test_categories_partition_catalog() {
        let structures = by_category(Category::DataStructures).count();
        let algorithms = by_category(Category::Algorithms).count();
        assert!(structures > 0);
        assert!(algorithms > 0);
        assert_eq!(structures + algorithms, all().len());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("algorithms".parse::<Category>().unwrap(), Category::Algorithms);
        assert!("cooking".parse::<Category>().is_err());
    }
}
