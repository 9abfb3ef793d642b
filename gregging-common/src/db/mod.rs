//! Database models and queries

pub mod discussions;
pub mod init;
pub mod models;
pub mod profiles;
pub mod quizzes;
pub mod scores;
pub mod seed;
pub mod sessions;
pub mod users;

pub use init::*;
pub use models::*;
