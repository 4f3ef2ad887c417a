//! Generation gateway: one-shot calls to the Gemini generateContent API.

use crate::core::traits::GenerationClient;
use crate::error::ChatError;
use async_trait::async_trait;
use di::{inject, injectable};
use serde::{Deserialize, Serialize};
use std::env;

const DEFAULT_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1/models/gemini-2.0-flash:generateContent";

/// Substituted when the response envelope carries no candidate text.
const FALLBACK_REPLY: &str = "No response";

pub struct GeminiClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

#[injectable(GenerationClient)]
impl GeminiClient {
    #[inject]
    pub fn create() -> GeminiClient {
        dotenvy::dotenv().ok();
        let api_key = env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set");
        // Override point for tests and proxies.
        let api_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned());

        GeminiClient::new(api_url, api_key)
    }
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String) -> GeminiClient {
        GeminiClient {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// First candidate's first text part, if the whole chain is present.
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::Upstream(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Upstream(e.to_string()))?;

        Ok(envelope
            .first_text()
            .unwrap_or_else(|| FALLBACK_REPLY.to_owned()))
    }
}
