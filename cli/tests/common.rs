//! # BookRec CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Every command built here
//! runs against an isolated configuration file and without an API key from
//! the surrounding environment, so results do not depend on the machine.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

/// `bookrec` binary with the environment stripped of credentials and log filters.
pub fn bookrec_cmd() -> Command {
    let mut cmd = Command::cargo_bin("bookrec").expect("Failed to find bookrec binary for testing");
    cmd.env_remove("BOOKREC_API_KEY").env_remove("RUST_LOG");
    cmd
}

/// Writes a `bookrec.toml` into `dir` and returns its path.
pub fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("bookrec.toml");
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

/// Config pointing the API at `base_url`.
pub fn config_for_endpoint(dir: &Path, base_url: &str) -> PathBuf {
    write_config(dir, &format!("[api]\nbase_url = \"{}\"\n", base_url))
}
