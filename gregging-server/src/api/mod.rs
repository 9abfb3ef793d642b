//! HTTP API handlers for gregging-server

pub mod auth;
pub mod chat;
pub mod discussions;
pub mod health;
pub mod json;
pub mod profile;
pub mod quizzes;
pub mod topics;
pub mod user;

pub use auth::{
    current_user, login, logout, register, session_middleware, AuthUser, SessionUser,
    SESSION_COOKIE,
};
pub use chat::chat;
pub use discussions::{
    create_comment, create_discussion, get_discussion, list_comments, list_discussions,
};
pub use health::{health, unknown_endpoint};
pub use json::ApiJson;
pub use profile::{get_profile, update_profile};
pub use quizzes::{get_latest_score, get_questions, submit_score};
pub use topics::{get_topic, list_topics};
pub use user::{user_progress, user_scores};
