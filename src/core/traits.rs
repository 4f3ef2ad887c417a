//! DI "Interfaces"

use crate::error::ChatError;
use crate::infrastructure::entities;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// Creates a new session for the given user by inserting its
    /// placeholder message. Returns the generated session id.
    async fn create_session(&self, user_id: Uuid) -> Result<String, ChatError>;

    /// Lists the user's sessions, most recently active first.
    async fn list_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<entities::SessionSummary>, ChatError>;

    /// Full transcript of one session, ascending timestamp.
    ///
    /// An unknown session yields an empty transcript, not an error.
    async fn session_history(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<entities::Message>, ChatError>;

    /// Runs one chat turn: generates a reply for the prompt, persists the
    /// pair, and returns the reply text.
    ///
    /// Returns `ChatError::Upstream` without persisting anything if the
    /// generation call fails outright.
    async fn send_message(
        &self,
        user_id: Uuid,
        session_id: &str,
        prompt: String,
    ) -> Result<String, ChatError>;

    /// Retitles every message of the session. Returns the number of rows
    /// updated.
    ///
    /// Returns `ChatError::Validation` for a whitespace-only title and
    /// `ChatError::NotFound` if the user owns no such session.
    async fn rename_session(
        &self,
        user_id: Uuid,
        session_id: &str,
        new_title: &str,
    ) -> Result<u64, ChatError>;

    /// Deletes every message of the session. Returns the number of rows
    /// removed.
    ///
    /// Returns `ChatError::NotFound` if the user owns no such session.
    async fn delete_session(&self, user_id: Uuid, session_id: &str) -> Result<u64, ChatError>;
}

#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// One-shot completion for a single user prompt. No retries, no
    /// streaming.
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}
