//! # BookRec Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the command handlers of the `bookrec` CLI and the
//! `AppContext` they share (effective configuration, the loaded catalog and
//! the API credential).
//!
//! ## Command Groups
//!
//! - `catalog`: `genres` and `moods`, browsing the selection data
//! - `recommend`: one-shot selection + fetch
//! - `interactive`: a line-oriented session over the same state machine
//!
use crate::core::catalog::Catalog;
use crate::core::config::{self, Config};
use crate::core::error::Result;
use crate::recommend::GeminiClient;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Catalog browsing commands (`genres`, `moods`).
pub mod catalog;
/// Line-oriented session (`interactive`).
pub mod interactive;
/// One-shot recommendation (`recommend`).
pub mod recommend;

/// Everything a handler needs, built once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub catalog: Cow<'static, Catalog>,
    api_key: Option<String>,
}

impl AppContext {
    /// Loads configuration and the catalog it points to.
    pub fn load(config_path: Option<&Path>, api_key: Option<String>) -> Result<Self> {
        let config = config::load_config(config_path)?;
        let catalog = match &config.catalog.path {
            Some(path) => Cow::Owned(Catalog::from_path(Path::new(path))?),
            None => {
                debug!("Using built-in mood catalog");
                Cow::Borrowed(Catalog::builtin())
            }
        };
        Ok(Self::new(config, catalog, api_key))
    }

    pub fn new(config: Config, catalog: Cow<'static, Catalog>, api_key: Option<String>) -> Self {
        Self {
            config,
            catalog,
            api_key,
        }
    }

    /// The HTTP fetcher for the configured endpoint.
    pub fn client(&self) -> GeminiClient {
        if self.api_key.is_none() {
            warn!(
                "No API key set (BOOKREC_API_KEY); sending unauthenticated requests to {}",
                self.config.api.base_url
            );
        }
        GeminiClient::new(&self.config.api, self.api_key.clone())
    }
}
