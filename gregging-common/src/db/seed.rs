//! Demo data for a fresh database
//!
//! Seeds two users (password `password123`), their profiles, quizzes for the
//! `arrays` and `graphs` topics, and one discussion with a reply. Skipped
//! entirely when any user already exists.

use sqlx::SqlitePool;
use tracing::info;

use super::models::{NewComment, NewDiscussion, NewProfile, NewQuestion, NewTest, NewUser, User};
use super::{discussions, profiles, quizzes, users};
use crate::api::auth::hash_password;
use crate::{Error, Result};

/// Password given to every seeded user
pub const DEMO_PASSWORD: &str = "password123";

struct SeedQuestion {
    text: &'static str,
    answer: &'static str,
    explanation: &'static str,
}

/// Insert demo data. Returns `false` when the database already had users.
pub async fn seed_demo_data(db: &SqlitePool) -> Result<bool> {
    if users::count_users(db).await? > 0 {
        info!("Database already has users, skipping demo seed");
        return Ok(false);
    }

    let john = seed_user(db, "john_doe", "john@example.com", "John Doe", "Software Developer").await?;
    let jane = seed_user(db, "jane_doe", "jane@example.com", "Jane Doe", "Data Scientist").await?;

    seed_test(
        db,
        NewTest {
            topic_slug: "arrays".to_string(),
            title: "Array Basics".to_string(),
            description: Some("Indexing, complexity and memory layout of arrays".to_string()),
            difficulty: "easy".to_string(),
        },
        &[
            SeedQuestion {
                text: "What is the time complexity of reading an array element by index? \
                       A) O(1) B) O(log n) C) O(n) D) O(n log n)",
                answer: "A",
                explanation: "Elements sit in contiguous memory, so the address is computed directly.",
            },
            SeedQuestion {
                text: "Which operation is typically O(n) on an array? \
                       A) Read by index B) Overwrite by index C) Insert at the front D) Read the length",
                answer: "C",
                explanation: "Inserting at the front shifts every existing element.",
            },
            SeedQuestion {
                text: "How are array elements laid out in memory? \
                       A) Linked nodes B) Contiguously C) In a hash table D) Randomly",
                answer: "B",
                explanation: "Contiguous allocation is what makes O(1) indexing possible.",
            },
        ],
    )
    .await?;

    seed_test(
        db,
        NewTest {
            topic_slug: "graphs".to_string(),
            title: "Graph Fundamentals".to_string(),
            description: Some("Vertices, edges and representations".to_string()),
            difficulty: "medium".to_string(),
        },
        &[
            SeedQuestion {
                text: "Which representation uses O(V + E) space? \
                       A) Adjacency matrix B) Adjacency list C) Incidence matrix D) Edge grid",
                answer: "B",
                explanation: "An adjacency list stores one entry per vertex plus one per edge.",
            },
            SeedQuestion {
                text: "In an undirected graph, adding edge A-B updates: \
                       A) Only A's list B) Only B's list C) Both lists D) Neither list",
                answer: "C",
                explanation: "Undirected edges are recorded on both endpoints.",
            },
        ],
    )
    .await?;

    let discussion = discussions::create_discussion(
        db,
        &NewDiscussion {
            user_id: john.id,
            title: "JavaScript Closures".to_string(),
            content: "Can someone explain closures in JavaScript?".to_string(),
        },
    )
    .await?;

    discussions::create_comment(
        db,
        &NewComment {
            discussion_id: discussion.id,
            user_id: jane.id,
            content: "A closure is a function that retains access to its lexical scope.".to_string(),
        },
    )
    .await?;

    info!("Database seeded with demo data");
    Ok(true)
}

async fn seed_user(
    db: &SqlitePool,
    username: &str,
    email: &str,
    display_name: &str,
    bio: &str,
) -> Result<User> {
    let password_hash = tokio::task::spawn_blocking(|| hash_password(DEMO_PASSWORD))
        .await
        .map_err(|e| Error::Internal(format!("Password hashing task failed: {}", e)))??;

    let user = users::create_user(
        db,
        &NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
        },
    )
    .await?;

    profiles::create_profile(
        db,
        &NewProfile {
            user_id: user.id,
            display_name: Some(display_name.to_string()),
            bio: Some(bio.to_string()),
            github_username: None,
        },
    )
    .await?;

    Ok(user)
}

async fn seed_test(db: &SqlitePool, test: NewTest, questions: &[SeedQuestion]) -> Result<()> {
    let test = quizzes::create_test(db, &test).await?;

    for (index, question) in questions.iter().enumerate() {
        quizzes::create_question(
            db,
            &NewQuestion {
                test_id: test.id,
                question_text: question.text.to_string(),
                correct_answer: question.answer.to_string(),
                explanation: Some(question.explanation.to_string()),
                order_index: index as i64 + 1,
            },
        )
        .await?;
    }

    Ok(())
}
