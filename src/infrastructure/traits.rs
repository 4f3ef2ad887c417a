//! Infrastructure traits, used for DI on higher levels

use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Inserts one turn and returns the stored row.
    async fn append(&self, message: entities::Message) -> Result<entities::Message, sqlx::Error>;

    /// Full transcript of a session, ascending timestamp. Empty when the
    /// session has no rows.
    async fn list_by_session(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<entities::Message>, sqlx::Error>;

    /// Number of rows in the session that are real turns, i.e. whose prompt
    /// is not the placeholder sentinel.
    async fn count_real_turns(&self, user_id: Uuid, session_id: &str)
    -> Result<i64, sqlx::Error>;

    /// One summary per session the user owns, most recently active first.
    async fn list_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entities::SessionSummary>, sqlx::Error>;

    /// Bulk-patches `chat_title` on every row of the session. Returns the
    /// number of rows matched; zero means the session does not exist.
    async fn rename_session(
        &self,
        user_id: Uuid,
        session_id: &str,
        new_title: &str,
    ) -> Result<u64, sqlx::Error>;

    /// Patches `chat_title` on the placeholder row only.
    async fn set_placeholder_title(
        &self,
        user_id: Uuid,
        session_id: &str,
        title: &str,
    ) -> Result<u64, sqlx::Error>;

    /// Removes every row of the session. Returns the number of rows
    /// deleted; zero means the session does not exist.
    async fn delete_by_session(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<u64, sqlx::Error>;
}
