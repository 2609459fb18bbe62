//! # BookRec Recommendation Fetcher
//!
//! File: cli/src/recommend/mod.rs
//!
//! ## Overview
//!
//! The boundary between a session and the text-generation service. Given the
//! three selections it builds one prompt, sends one request, and returns the
//! extracted text or a [`FetchError`]. It never touches session state; the
//! caller turns the result into an `AddResponse` or `SetError` action.
//!
//! - `RecommendationSource`: the async seam the session depends on
//! - `gemini`: the HTTP implementation (`GeminiClient`)
//!
//! There is no retry, caching or cancellation. Every call is one attempt.
//!
use crate::core::error::FetchError;
use async_trait::async_trait;

pub mod gemini;

pub use gemini::GeminiClient;

/// Anything that can turn a genre, mood and level into recommendation text.
///
/// Callers must only invoke this with all three values non-empty.
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    async fn fetch_recommendation(
        &self,
        genre: &str,
        mood: &str,
        level: &str,
    ) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: RecommendationSource + ?Sized> RecommendationSource for &T {
    async fn fetch_recommendation(
        &self,
        genre: &str,
        mood: &str,
        level: &str,
    ) -> Result<String, FetchError> {
        (**self).fetch_recommendation(genre, mood, level).await
    }
}

/// The single natural-language prompt sent for a selection.
pub fn build_prompt(genre: &str, mood: &str, level: &str) -> String {
    format!("Recommend 6 books for a {level} {genre} reader feeling {mood}. Explain why.")
}
