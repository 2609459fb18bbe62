//! # BookRec Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout BookRec. It follows
//! the same split as the rest of the crate:
//! - `BookrecError`: a `thiserror` enum for the specific, user-facing failures
//!   raised by configuration, catalog and selection handling.
//! - `FetchError`: the failure taxonomy of the recommendation fetcher. Both
//!   kinds are recoverable and end up as a message in the session's error slot.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by application
//!   plumbing, so context can be attached with `.context(...)`.
//!
//! ## Examples
//!
//! ```ignore
//! // Return a specific error type
//! if !catalog.has_genre(&genre) {
//!     return Err(BookrecError::InvalidSelection { field: "genre", value: genre })?;
//! }
//!
//! // Translate a fetch failure into the message shown to the user
//! match source.fetch_recommendation(g, m, l).await {
//!     Ok(text) => dispatch(Action::AddResponse(text)),
//!     Err(e) => dispatch(Action::SetError(e.user_message().to_string())),
//! }
//! ```
//!
use thiserror::Error;

/// Message stored in the session when a request fails at the transport or HTTP level.
pub const REQUEST_FAILED_MESSAGE: &str = "Failed to fetch recommendations. Please try again.";

/// Message stored in the session when the API answers without any text.
pub const EMPTY_RESPONSE_MESSAGE: &str = "No response from AI.";

/// Custom error type for the BookRec application.
#[derive(Error, Debug)]
pub enum BookrecError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Unknown {field} '{value}'.")]
    InvalidSelection { field: &'static str, value: String },

    #[error("Genre '{name}' not found in the catalog.")]
    GenreNotFound { name: String },
}

/// Failure kinds of a single recommendation fetch.
///
/// The `detail` carried by each variant is for logs only. What the user sees
/// is [`FetchError::user_message`], which never exposes it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failure, non-success status, or an undecodable body.
    #[error("recommendation request failed: {detail}")]
    RequestFailed { detail: String },

    /// Well-formed response with no text at `candidates[0].content.parts[0].text`.
    #[error("recommendation response carried no text: {detail}")]
    EmptyResponse { detail: String },
}

impl FetchError {
    pub fn request_failed(detail: impl Into<String>) -> Self {
        Self::RequestFailed {
            detail: detail.into(),
        }
    }

    pub fn empty_response(detail: impl Into<String>) -> Self {
        Self::EmptyResponse {
            detail: detail.into(),
        }
    }

    /// The generic message written into the session's error slot.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::RequestFailed { .. } => REQUEST_FAILED_MESSAGE,
            FetchError::EmptyResponse { .. } => EMPTY_RESPONSE_MESSAGE,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
