//! Database entities

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Prompt value of the synthetic row inserted when a session is created.
pub const SESSION_STARTED_PROMPT: &str = "Session started";

/// One chat turn. Sessions are not stored separately: a session is the set
/// of rows sharing `(user, session_id)`, with `chat_title` denormalized
/// onto every row.
#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub user: Uuid,
    pub session_id: String,
    pub chat_title: Option<String>,
    pub prompt: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregated view of one session, produced by grouping messages.
///
/// `chat_title` resolves to the most recent non-null title in the group so
/// the result does not depend on insertion-order accidents.
#[derive(Debug, FromRow)]
pub struct SessionSummary {
    pub session_id: String,
    pub chat_title: Option<String>,
    pub last_message_at: DateTime<Utc>,
}
