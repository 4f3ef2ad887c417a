use async_trait::async_trait;
use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde_json::{Value, json};
use std::str::FromStr;
use uuid::Uuid;

pub mod chat;

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication gate for the chat routes.
///
/// The bearer token is the opaque user id issued by the credential service;
/// anything missing or malformed is rejected before a handler runs.
#[derive(Debug)]
pub struct ExtractUser(pub Uuid);

fn unauthorized(message: &'static str) -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": message })))
}

#[async_trait]
impl<S> FromRequestParts<S> for ExtractUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Err(unauthorized("`Authorization` header is missing"));
        };
        let header = header
            .to_str()
            .map_err(|_| unauthorized("invalid authorization token"))?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or_else(|| unauthorized("invalid authorization scheme"))?;
        let user_id = Uuid::from_str(token.trim())
            .map_err(|_| unauthorized("invalid authorization token"))?;

        Ok(ExtractUser(user_id))
    }
}
