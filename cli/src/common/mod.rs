//! # BookRec Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! Helpers shared across command handlers. Currently only terminal rendering:
//!
//! - `ui`: formatting of selections, errors and recommendation panels
//!
pub mod ui;
