//! # BookRec Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the session, the fetcher and the commands:
//! - `catalog`: the genre → moods table and the reading levels
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the `Result` alias
//!
//! ```ignore
//! use crate::core::catalog::Catalog;
//! use crate::core::config;
//! use crate::core::error::{BookrecError, Result};
//! ```
//!
pub mod catalog;
pub mod config;
pub mod error;
