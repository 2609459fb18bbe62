//! # BookRec Library Interface
//!
//! File: cli/src/lib.rs
//!
//! Exposes the session state machine, the recommendation fetcher and the
//! command handlers so `main.rs` stays a thin router and integration tests
//! can reach the same code.
//!
//! - `session`: `SessionState`, `Action`, `transition`, `Session`
//! - `recommend`: `RecommendationSource`, `GeminiClient`, `build_prompt`
//! - `core`: configuration, catalog, errors
//! - `commands`: CLI handlers
//! - `common`: terminal rendering
//!
pub mod commands;
pub mod common;
pub mod core;
pub mod recommend;
pub mod session;
