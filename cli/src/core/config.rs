//! # BookRec Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the BookRec configuration. It
//! combines defaults, user settings and project-specific overrides.
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (used on its own)
//! 2. Project-specific `.bookrec.toml` in current directory or ancestors
//! 3. User-specific `config.toml` in the platform config directory
//! 4. Default values defined in the code
//!
//! A relative `[catalog] path` is resolved against the directory of the file
//! that sets it.
//!
//! The API key is never read from files. It comes
//! from the `BOOKREC_API_KEY` environment variable (or `--api-key`).
//!
//! ## Examples
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8787"   # e.g. a proxy that holds the real key
//! model = "gemini-pro"
//!
//! [catalog]
//! path = "~/.config/bookrec/moods.toml"
//! ```
//!
//! ```ignore
//! let cfg = config::load_config(None)?;
//! let endpoint = cfg.api.endpoint();
//! ```
//!
use crate::core::error::{BookrecError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Settings for the text-generation endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Scheme and host of the endpoint, without a trailing path.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version segment of the path.
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Model name used in `models/{model}:generateContent`.
    #[serde(default = "default_model")]
    pub model: String,
}

/// Where the genre/mood table comes from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Optional TOML catalog (can use ~). Falls back to the built-in catalog.
    pub path: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            model: default_model(),
        }
    }
}

impl ApiConfig {
    /// Full `generateContent` URL, without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            self.model
        )
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_api_version() -> String {
    "v1".to_string()
}
fn default_model() -> String {
    "gemini-pro".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".bookrec.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read (and it must exist).
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut merged_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "BookRec", "bookrec") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.bookrec.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the root, stopping at the first `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))?;
    anchor_catalog_path(&mut config, path);
    Ok(config)
}

/// Resolves a relative `[catalog] path` against the directory of the file that set it.
fn anchor_catalog_path(config: &mut Config, config_file: &Path) {
    let Some(catalog_path) = config.catalog.path.as_mut() else {
        return;
    };
    if catalog_path.starts_with('~') || Path::new(catalog_path.as_str()).is_absolute() {
        return;
    }
    if let Some(dir) = config_file.parent() {
        *catalog_path = dir.join(catalog_path.as_str()).to_string_lossy().into_owned();
        debug!("Anchored catalog path to config directory: {}", catalog_path);
    }
}

/// Project values win wherever they differ from the defaults.
///
/// A project value equal to the default is treated as unset, so a project
/// file cannot put a field back to its default over a user-level override.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.api.base_url = if project_cfg.api.base_url != default_base_url() {
        project_cfg.api.base_url
    } else {
        user.api.base_url
    };
    merged.api.api_version = if project_cfg.api.api_version != default_api_version() {
        project_cfg.api.api_version
    } else {
        user.api.api_version
    };
    merged.api.model = if project_cfg.api.model != default_model() {
        project_cfg.api.model
    } else {
        user.api.model
    };
    merged.catalog.path = project_cfg.catalog.path.or(user.catalog.path);
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(path) = config.catalog.path.as_mut() {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded catalog path: {}", path);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    let api = &config.api;
    if !(api.base_url.starts_with("http://") || api.base_url.starts_with("https://")) {
        return Err(anyhow!(BookrecError::Config(format!(
            "Invalid base_url '{}'. Expected an http:// or https:// URL.",
            api.base_url
        ))));
    }
    if api.model.trim().is_empty() {
        return Err(anyhow!(BookrecError::Config(
            "api.model cannot be empty.".to_string()
        )));
    }
    if api.api_version.trim().is_empty() {
        return Err(anyhow!(BookrecError::Config(
            "api.api_version cannot be empty.".to_string()
        )));
    }
    if let Some(path) = &config.catalog.path {
        let catalog_path = Path::new(path);
        if !catalog_path.is_file() {
            return Err(anyhow!(BookrecError::Config(format!(
                "Configured catalog '{}' does not exist or is not a file.",
                catalog_path.display()
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [api]
            base_url = "http://localhost:8787"
            model = "gemini-1.5-flash"

            [catalog]
            path = "~/moods.toml"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.api.base_url, "http://localhost:8787");
        assert_eq!(config.api.model, "gemini-1.5-flash");
        assert_eq!(config.api.api_version, default_api_version()); // Default
        assert_eq!(config.catalog.path.as_deref(), Some("~/moods.toml")); // Not yet expanded
    }

    #[test]
    fn test_rejects_api_key_in_file() {
        let toml_content = r#"
            [api]
            api_key = "secret"
        "#;
        assert!(toml::from_str::<Config>(toml_content).is_err());
    }

    #[test]
    fn test_endpoint_formatting() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            api.endpoint(),
            "http://127.0.0.1:9000/v1/models/gemini-pro:generateContent"
        );
        assert_eq!(
            ApiConfig::default().endpoint(),
            "https://generativelanguage.googleapis.com/v1/models/gemini-pro:generateContent"
        );
    }

    #[test]
    fn test_merge_prefers_project_overrides() {
        let user = Config {
            api: ApiConfig {
                model: "user-model".into(),
                base_url: "http://user-proxy".into(),
                ..Default::default()
            },
            catalog: CatalogConfig {
                path: Some("/user/moods.toml".into()),
            },
        };
        let project = Config {
            api: ApiConfig {
                model: "project-model".into(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.api.model, "project-model");
        assert_eq!(merged.api.base_url, "http://user-proxy");
        assert_eq!(merged.catalog.path.as_deref(), Some("/user/moods.toml"));
    }

    #[test]
    fn test_merge_treats_project_default_as_unset() {
        let user = Config {
            api: ApiConfig {
                model: "user-model".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let project = Config {
            api: ApiConfig {
                model: default_model(),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.api.model, "user-model");
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            catalog: CatalogConfig {
                path: Some("~/moods.toml".to_string()),
            },
            ..Default::default()
        };

        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.catalog.path.unwrap(),
            home_dir.join("moods.toml").to_string_lossy()
        );
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bookrec.toml");
        fs::write(&path, "[api]\nmodel = \"gemini-1.5-pro\"\n").unwrap();

        let config = load_config(Some(&path)).expect("config should load");
        assert_eq!(config.api.model, "gemini-1.5-pro");
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    fn test_relative_catalog_path_follows_config_file() {
        let temp_dir = tempdir().unwrap();
        let catalogs = temp_dir.path().join("catalogs");
        fs::create_dir(&catalogs).unwrap();
        fs::write(catalogs.join("moods.toml"), "").unwrap();
        let path = temp_dir.path().join(PROJECT_CONFIG_FILENAME);
        fs::write(&path, "[catalog]\npath = \"catalogs/moods.toml\"\n").unwrap();

        // The process cwd is not the config directory here.
        let config = load_config(Some(&path)).expect("relative catalog should resolve");
        assert_eq!(
            config.catalog.path.as_deref().map(Path::new),
            Some(catalogs.join("moods.toml").as_path())
        );
    }

    #[test]
    fn test_anchor_leaves_absolute_and_home_paths() {
        let mut config = Config {
            catalog: CatalogConfig {
                path: Some("~/moods.toml".into()),
            },
            ..Default::default()
        };
        anchor_catalog_path(&mut config, Path::new("/etc/bookrec/config.toml"));
        assert_eq!(config.catalog.path.as_deref(), Some("~/moods.toml"));

        let absolute = std::env::temp_dir().join("moods.toml");
        config.catalog.path = Some(absolute.to_string_lossy().into_owned());
        anchor_catalog_path(&mut config, Path::new("/etc/bookrec/config.toml"));
        assert_eq!(config.catalog.path.as_deref().map(Path::new), Some(absolute.as_path()));
    }

    #[test]
    fn test_validate_config_invalid_base_url() {
        let config = Config {
            api: ApiConfig {
                base_url: "generativelanguage.googleapis.com".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("Invalid base_url"));
    }

    #[test]
    fn test_validate_config_missing_catalog() {
        let temp_dir = tempdir().unwrap();
        let config = Config {
            catalog: CatalogConfig {
                path: Some(temp_dir.path().join("nope.toml").to_string_lossy().into_owned()),
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }
}
