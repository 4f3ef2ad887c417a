//! Implementations for the service the app needs.
//!

use crate::core::traits::{ChatService, GenerationClient};
use crate::error::ChatError;
use crate::infrastructure::entities::{Message, SESSION_STARTED_PROMPT, SessionSummary};
use crate::infrastructure::traits::MessageRepository;
use async_trait::async_trait;
use chrono::Utc;
use di::{Ref, injectable};
use uuid::Uuid;

const DEFAULT_TITLE: &str = "New Chat";
const WELCOME_RESPONSE: &str = "Welcome to a new chat session!";

/// Maximum length of a title derived from the first prompt, in characters.
const TITLE_MAX_CHARS: usize = 30;

#[injectable(ChatService)]
pub struct MyChatService {
    repo: Ref<dyn MessageRepository>,
    generator: Ref<dyn GenerationClient>,
}

impl MyChatService {
    fn derive_title(prompt: &str) -> String {
        prompt.chars().take(TITLE_MAX_CHARS).collect()
    }
}

#[async_trait]
impl ChatService for MyChatService {
    async fn create_session(&self, user_id: Uuid) -> Result<String, ChatError> {
        let session_id = Uuid::new_v4().to_string();

        self.repo
            .append(Message {
                id: Uuid::new_v4(),
                user: user_id,
                session_id: session_id.clone(),
                chat_title: Some(DEFAULT_TITLE.to_owned()),
                prompt: SESSION_STARTED_PROMPT.to_owned(),
                response: WELCOME_RESPONSE.to_owned(),
                timestamp: Utc::now(),
            })
            .await?;

        Ok(session_id)
    }

    async fn list_sessions(&self, user_id: Uuid) -> Result<Vec<SessionSummary>, ChatError> {
        Ok(self.repo.list_sessions(user_id).await?)
    }

    async fn session_history(
        &self,
        user_id: Uuid,
        session_id: &str,
    ) -> Result<Vec<Message>, ChatError> {
        Ok(self.repo.list_by_session(user_id, session_id).await?)
    }

    async fn send_message(
        &self,
        user_id: Uuid,
        session_id: &str,
        prompt: String,
    ) -> Result<String, ChatError> {
        // The first real turn names the session after its prompt.
        let chat_title = if self.repo.count_real_turns(user_id, session_id).await? == 0 {
            Some(Self::derive_title(&prompt))
        } else {
            None
        };

        // A hard gateway failure returns here, before anything is written.
        let reply = self.generator.generate(&prompt).await?;

        self.repo
            .append(Message {
                id: Uuid::new_v4(),
                user: user_id,
                session_id: session_id.to_owned(),
                chat_title: chat_title.clone(),
                prompt,
                response: reply.clone(),
                timestamp: Utc::now(),
            })
            .await?;

        // Keep the placeholder row's title in sync with the derived one.
        if let Some(title) = chat_title {
            self.repo
                .set_placeholder_title(user_id, session_id, &title)
                .await?;
        }

        Ok(reply)
    }

    async fn rename_session(
        &self,
        user_id: Uuid,
        session_id: &str,
        new_title: &str,
    ) -> Result<u64, ChatError> {
        let new_title = new_title.trim();
        if new_title.is_empty() {
            return Err(ChatError::Validation("New title cannot be empty"));
        }

        let matched = self
            .repo
            .rename_session(user_id, session_id, new_title)
            .await?;
        if matched == 0 {
            return Err(ChatError::NotFound("Session not found"));
        }

        Ok(matched)
    }

    async fn delete_session(&self, user_id: Uuid, session_id: &str) -> Result<u64, ChatError> {
        let deleted = self.repo.delete_by_session(user_id, session_id).await?;
        if deleted == 0 {
            return Err(ChatError::NotFound("Session not found or already deleted"));
        }

        Ok(deleted)
    }
}
