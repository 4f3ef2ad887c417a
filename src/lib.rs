//! Gemini-backed chat session API - Library exports for testing

pub mod api;
pub mod core;
pub mod error;
pub mod infrastructure;
