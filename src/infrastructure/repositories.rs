//! DB Repository abstractions

use crate::infrastructure::database::DatabaseConnection;
use crate::infrastructure::entities::{Message, SESSION_STARTED_PROMPT, SessionSummary};
use crate::infrastructure::traits::MessageRepository;
use async_trait::async_trait;
use di::{Ref, injectable};
use uuid::Uuid;

#[injectable(MessageRepository)]
pub struct DbMessageRepository {
    connection: Ref<DatabaseConnection>,
}

#[async_trait]
impl MessageRepository for DbMessageRepository {
    async fn append(&self, message: Message) -> Result<Message, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO messages (id, user, session_id, chat_title, prompt, response, timestamp) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING *",
        )
        .bind(message.id)
        .bind(message.user)
        .bind(&message.session_id)
        .bind(&message.chat_title)
        .bind(&message.prompt)
        .bind(&message.response)
        .bind(message.timestamp)
        .fetch_one(&**self.connection)
        .await
    }

    async fn list_by_session(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as(
            "SELECT * FROM messages WHERE user = ? AND session_id = ? ORDER BY datetime(timestamp) ASC",
        )
        .bind(user_id)
        .bind(session_id)
        .fetch_all(&**self.connection)
        .await
    }

    async fn count_real_turns(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE user = ? AND session_id = ? AND prompt <> ?",
        )
        .bind(user_id)
        .bind(session_id)
        .bind(SESSION_STARTED_PROMPT)
        .fetch_one(&**self.connection)
        .await
    }

    async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<SessionSummary>, sqlx::Error> {
        // Title resolution: the most recent non-null chat_title in the
        // group, independent of which row happens to come first.
        sqlx::query_as(
            "SELECT m.session_id AS session_id, \
                    (SELECT t.chat_title FROM messages t \
                       WHERE t.user = ? AND t.session_id = m.session_id AND t.chat_title IS NOT NULL \
                       ORDER BY datetime(t.timestamp) DESC LIMIT 1) AS chat_title, \
                    MAX(m.timestamp) AS last_message_at \
             FROM messages m WHERE m.user = ? \
             GROUP BY m.session_id \
             ORDER BY datetime(last_message_at) DESC",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&**self.connection)
        .await
    }

    async fn rename_session(
        &self,
        user_id: Uuid,
        session_id: &str,
        new_title: &str,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query("UPDATE messages SET chat_title = ? WHERE user = ? AND session_id = ?")
            .bind(new_title)
            .bind(user_id)
            .bind(session_id)
            .execute(&**self.connection)
            .await
            .map(|result| result.rows_affected())
    }

    async fn set_placeholder_title(
        &self,
        user_id: Uuid,
        session_id: &str,
        title: &str,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "UPDATE messages SET chat_title = ? WHERE user = ? AND session_id = ? AND prompt = ?",
        )
        .bind(title)
        .bind(user_id)
        .bind(session_id)
        .bind(SESSION_STARTED_PROMPT)
        .execute(&**self.connection)
        .await
        .map(|result| result.rows_affected())
    }

    async fn delete_by_session(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query("DELETE FROM messages WHERE user = ? AND session_id = ?")
            .bind(user_id)
            .bind(session_id)
            .execute(&**self.connection)
            .await
            .map(|result| result.rows_affected())
    }
}
