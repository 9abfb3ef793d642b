//! API helpers shared with the HTTP layer
//!
//! # Design Principle
//!
//! This module contains ONLY pure functions: credential hashing, token
//! generation and registration input checks. The server crate wraps these
//! with axum handlers and middleware.

pub mod auth;

pub use auth::{
    generate_session_token, hash_password, validate_email, validate_password, validate_username,
    verify_password, SESSION_TOKEN_LEN,
};
