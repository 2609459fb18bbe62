//! # Gemini `generateContent` Client
//!
//! File: cli/src/recommend/gemini.rs
//!
//! ## Overview
//!
//! Sends the recommendation prompt to a `generateContent` endpoint:
//!
//! ```text
//! POST {base_url}/{api_version}/models/{model}:generateContent[?key=...]
//! {"contents":[{"parts":[{"text":"Recommend 6 books for ..."}]}]}
//! ```
//!
//! and reads `candidates[0].content.parts[0].text` from the answer. Every
//! level of that path is optional; a hole or `null` anywhere is an
//! `EmptyResponse`. A body that is not JSON at all is a `RequestFailed`.
//!
//! The key query parameter is only added when a key was supplied. Without
//! one the client can talk to a proxy that attaches the credential itself.
//!
use super::{build_prompt, RecommendationSource};
use crate::core::config::ApiConfig;
use crate::core::error::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

/// HTTP implementation of [`RecommendationSource`].
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api: &ApiConfig, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: api.endpoint(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, FetchError> {
        let mut request = self.client.post(&self.endpoint).json(body);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request
            .send()
            .await
            .map_err(|err| FetchError::request_failed(format!("transport error: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::request_failed(format!("API error: {status}")));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|err| FetchError::request_failed(format!("undecodable response: {err}")))?;

        extract_text(&parsed)
    }
}

#[async_trait]
impl RecommendationSource for GeminiClient {
    async fn fetch_recommendation(
        &self,
        genre: &str,
        mood: &str,
        level: &str,
    ) -> Result<String, FetchError> {
        let prompt = build_prompt(genre, mood, level);
        debug!("Prompt: {}", prompt);
        info!("Requesting recommendations from {}", self.endpoint);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let result = self.send_request(&request).await;
        if let Err(e) = &result {
            warn!("Fetch error: {}", e);
        }
        result
    }
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

const TEXT_POINTER: &str = "/candidates/0/content/parts/0/text";

/// First candidate, first part, its text. A `null`, a missing key, an empty
/// array or empty text anywhere along the path all count as missing.
fn extract_text(response: &Value) -> Result<String, FetchError> {
    response
        .pointer(TEXT_POINTER)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            FetchError::empty_response("no text at candidates[0].content.parts[0].text")
        })
}
