//! # BookRec Mood Catalog
//!
//! File: cli/src/core/catalog.rs
//!
//! ## Overview
//!
//! The catalog is the static selection data behind the three pickers:
//! - an ordered list of genres, each with its own ordered list of moods;
//! - the fixed set of reading levels (`ReadingLevel`).
//!
//! Moods are scoped to a genre. A mood that is valid for "Fantasy" is not
//! necessarily offered for "Mystery", which is why the session resets the
//! mood whenever the genre changes.
//!
//! ## Sources
//!
//! 1. The built-in catalog, constructed once on first use and shared for the
//!    lifetime of the process (`Catalog::builtin`).
//! 2. A TOML file named by `[catalog] path` in the configuration, loaded once at
//!    startup (`Catalog::from_path`). The file format is:
//!
//! ```toml
//! [[genres]]
//! name = "Fantasy"
//! moods = ["Adventurous", "Curious"]
//!
//! [[genres]]
//! name = "Mystery"
//! moods = ["Suspenseful"]
//! ```
//!
//! Neither source is mutated after it has been loaded.
//!
use crate::core::error::{BookrecError, Result};
use anyhow::{anyhow, Context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// One genre and the moods offered for it, in display order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GenreEntry {
    pub name: String,
    pub moods: Vec<String>,
}

/// Genre → moods lookup table.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    genres: Vec<GenreEntry>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "Fantasy",
            &["Adventurous", "Curious", "Whimsical", "Nostalgic", "Dark"],
        ),
        (
            "Mystery",
            &["Suspenseful", "Puzzled", "Cozy", "Paranoid", "Clever"],
        ),
        (
            "Science Fiction",
            &["Curious", "Optimistic", "Dystopian", "Philosophical", "Thrilled"],
        ),
        (
            "Romance",
            &["Romantic", "Heartbroken", "Hopeful", "Playful", "Wistful"],
        ),
        (
            "Thriller",
            &["Tense", "Restless", "Anxious", "Daring", "Vengeful"],
        ),
        (
            "Historical Fiction",
            &["Reflective", "Nostalgic", "Inspired", "Melancholic", "Curious"],
        ),
        (
            "Horror",
            &["Scared", "Unsettled", "Morbid", "Brave", "Lonely"],
        ),
        (
            "Non-Fiction",
            &["Curious", "Motivated", "Reflective", "Skeptical", "Inspired"],
        ),
    ];
    Catalog {
        genres: table
            .iter()
            .map(|(name, moods)| GenreEntry {
                name: (*name).to_string(),
                moods: moods.iter().map(|m| (*m).to_string()).collect(),
            })
            .collect(),
    }
});

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Builds a catalog from entries, validating it the same way a file is validated.
    pub fn new(genres: Vec<GenreEntry>) -> Result<Self> {
        let catalog = Catalog { genres };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Loads and validates a TOML catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        info!("Loading mood catalog from: {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let catalog: Catalog = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML from catalog: {}", path.display()))?;
        catalog
            .validate()
            .with_context(|| format!("Invalid catalog: {}", path.display()))?;
        debug!("Loaded {} genres from {}", catalog.genres.len(), path.display());
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        if self.genres.is_empty() {
            return Err(anyhow!(BookrecError::Catalog(
                "catalog must define at least one genre".to_string()
            )));
        }
        let mut seen = HashSet::new();
        for entry in &self.genres {
            if entry.name.trim().is_empty() {
                return Err(anyhow!(BookrecError::Catalog(
                    "genre names cannot be empty".to_string()
                )));
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(anyhow!(BookrecError::Catalog(format!(
                    "duplicate genre '{}'",
                    entry.name
                ))));
            }
            if entry.moods.is_empty() {
                return Err(anyhow!(BookrecError::Catalog(format!(
                    "genre '{}' has no moods",
                    entry.name
                ))));
            }
            if entry.moods.iter().any(|m| m.trim().is_empty()) {
                return Err(anyhow!(BookrecError::Catalog(format!(
                    "genre '{}' has an empty mood",
                    entry.name
                ))));
            }
        }
        Ok(())
    }

    /// Genre names in catalog order.
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.iter().map(|g| g.name.as_str())
    }

    /// Moods offered for `genre`, in catalog order. Unknown (or unset) genres have none.
    pub fn moods(&self, genre: &str) -> &[String] {
        self.genres
            .iter()
            .find(|g| g.name == genre)
            .map(|g| g.moods.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g.name == genre)
    }

    pub fn has_mood(&self, genre: &str, mood: &str) -> bool {
        self.moods(genre).iter().any(|m| m == mood)
    }

    /// Case-insensitive genre lookup returning the canonical spelling.
    pub fn find_genre(&self, input: &str) -> Option<&str> {
        let input = input.trim();
        self.genres()
            .find(|g| g.eq_ignore_ascii_case(input))
    }

    /// Case-insensitive mood lookup within `genre` returning the canonical spelling.
    pub fn find_mood(&self, genre: &str, input: &str) -> Option<&str> {
        let input = input.trim();
        self.moods(genre)
            .iter()
            .map(String::as_str)
            .find(|m| m.eq_ignore_ascii_case(input))
    }
}

/// Reading level picker values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ReadingLevel {
    Beginner,
    Intermediate,
    Expert,
}

impl ReadingLevel {
    pub const ALL: [ReadingLevel; 3] = [
        ReadingLevel::Beginner,
        ReadingLevel::Intermediate,
        ReadingLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "Beginner",
            ReadingLevel::Intermediate => "Intermediate",
            ReadingLevel::Expert => "Expert",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingLevel {
    type Err = BookrecError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        ReadingLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BookrecError::InvalidSelection {
                field: "level",
                value: s.to_string(),
            })
    }
}
