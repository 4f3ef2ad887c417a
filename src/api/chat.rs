//! Chat endpoints

use crate::api::ExtractUser;
use crate::api::chat::schemas::{ChatRequest, RenameRequest};
use crate::core::traits::ChatService;
use crate::error::ChatError;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use di_axum::Inject;

pub fn router() -> Router {
    Router::new()
        .route("/", post(chat))
        .route("/sessions", get(list_sessions).post(new_session))
        .route("/history/:session_id", get(session_history))
        .route("/sessions/:session_id", delete(delete_session))
        .route("/sessions/:session_id/rename", put(rename_session))
}

async fn chat(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
    Json(request): Json<ChatRequest>,
) -> Result<Json<schemas::ChatReply>, ChatError> {
    let reply = chat_service
        .send_message(current_user, &request.session_id, request.message)
        .await?;

    Ok(Json(schemas::ChatReply { reply }))
}

async fn new_session(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
) -> Result<(StatusCode, Json<schemas::NewSession>), ChatError> {
    let session_id = chat_service.create_session(current_user).await?;

    Ok((StatusCode::CREATED, Json(schemas::NewSession { session_id })))
}

async fn list_sessions(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
) -> Result<Json<schemas::SessionList>, ChatError> {
    let sessions = chat_service.list_sessions(current_user).await?;

    Ok(Json(schemas::SessionList {
        sessions: sessions.into_iter().map(schemas::Session::from).collect(),
    }))
}

async fn session_history(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
    Path(session_id): Path<String>,
) -> Result<Json<schemas::History>, ChatError> {
    let messages = chat_service
        .session_history(current_user, &session_id)
        .await?;

    Ok(Json(schemas::History {
        history: messages.into_iter().map(schemas::Message::from).collect(),
    }))
}

async fn delete_session(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
    Path(session_id): Path<String>,
) -> Result<Json<schemas::DeletedSession>, ChatError> {
    let deleted_count = chat_service
        .delete_session(current_user, &session_id)
        .await?;

    Ok(Json(schemas::DeletedSession {
        message: "Session deleted successfully",
        deleted_count,
    }))
}

async fn rename_session(
    Inject(chat_service): Inject<dyn ChatService>,
    ExtractUser(current_user): ExtractUser,
    Path(session_id): Path<String>,
    Json(request): Json<RenameRequest>,
) -> Result<Json<schemas::RenamedSession>, ChatError> {
    let updated_count = chat_service
        .rename_session(current_user, &session_id, &request.new_title)
        .await?;

    Ok(Json(schemas::RenamedSession {
        message: "Session renamed successfully",
        updated_count,
    }))
}

pub mod schemas {
    use crate::infrastructure::entities;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct ChatRequest {
        pub message: String,
        pub session_id: String,
    }

    #[derive(Serialize, Debug)]
    pub struct ChatReply {
        pub reply: String,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct NewSession {
        pub session_id: String,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Session {
        pub session_id: String,
        pub chat_title: Option<String>,
        pub last_message_at: DateTime<Utc>,
    }

    impl From<entities::SessionSummary> for Session {
        fn from(summary: entities::SessionSummary) -> Self {
            Session {
                session_id: summary.session_id,
                chat_title: summary.chat_title,
                last_message_at: summary.last_message_at,
            }
        }
    }

    #[derive(Serialize, Debug, Default)]
    pub struct SessionList {
        pub sessions: Vec<Session>,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct Message {
        pub id: Uuid,
        pub session_id: String,
        pub chat_title: Option<String>,
        pub prompt: String,
        pub response: String,
        pub timestamp: DateTime<Utc>,
    }

    impl From<entities::Message> for Message {
        fn from(message: entities::Message) -> Self {
            Message {
                id: message.id,
                session_id: message.session_id,
                chat_title: message.chat_title,
                prompt: message.prompt,
                response: message.response,
                timestamp: message.timestamp,
            }
        }
    }

    #[derive(Serialize, Debug, Default)]
    pub struct History {
        pub history: Vec<Message>,
    }

    #[derive(Deserialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RenameRequest {
        pub new_title: String,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct DeletedSession {
        pub message: &'static str,
        pub deleted_count: u64,
    }

    #[derive(Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct RenamedSession {
        pub message: &'static str,
        pub updated_count: u64,
    }
}
