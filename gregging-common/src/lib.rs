//! # Gregging Common Library
//!
//! Shared code for the Gregging Algorithms backend:
//! - Database initialization, models and queries
//! - Credential hashing and session tokens
//! - Configuration loading
//! - The static topic (lesson) catalog

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod topics;

pub use error::{Error, Result};
