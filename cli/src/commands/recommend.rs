//! # One-Shot Recommendation Command
//!
//! File: cli/src/commands/recommend.rs
//!
//! ## Overview
//!
//! `bookrec recommend --genre G --mood M --level L` runs one session from
//! start to finish:
//! 1. validate the three selections against the catalog (what the pickers enforce)
//! 2. dispatch `SetGenre`, `SetMood`, `SetLevel`
//! 3. trigger a single fetch
//! 4. print the expanded panel, or the final session state with `--json`
//!    (in which case stdout carries the JSON document only)
//!
//! A session that ends with its error slot set makes the command fail, so
//! scripts see a non-zero exit status.
//!
//! ```bash
//! bookrec recommend --genre Fantasy --mood Curious --level beginner
//! bookrec recommend -g "Science Fiction" -m Dystopian -l expert --json
//! ```
//!
use super::AppContext;
use crate::common::ui;
use crate::core::catalog::{Catalog, ReadingLevel};
use crate::core::error::{BookrecError, Result};
use crate::recommend::RecommendationSource;
use crate::session::{Action, Session, SessionState};
use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct RecommendArgs {
    /// Genre, as listed by `bookrec genres`.
    #[arg(long, short)]
    pub genre: String,

    /// Mood, as listed by `bookrec moods <GENRE>`.
    #[arg(long, short)]
    pub mood: String,

    /// Reading level.
    #[arg(long, short, value_enum, ignore_case = true)]
    pub level: ReadingLevel,

    /// Print the final session state as JSON instead of a panel.
    #[arg(long)]
    pub json: bool,
}

/// Selections after catalog validation, in canonical spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub genre: String,
    pub mood: String,
    pub level: ReadingLevel,
}

pub fn validate_selection(
    catalog: &Catalog,
    genre: &str,
    mood: &str,
    level: ReadingLevel,
) -> std::result::Result<Selection, BookrecError> {
    let genre = catalog
        .find_genre(genre)
        .ok_or_else(|| BookrecError::InvalidSelection {
            field: "genre",
            value: genre.to_string(),
        })?;
    let mood = catalog
        .find_mood(genre, mood)
        .ok_or_else(|| BookrecError::InvalidSelection {
            field: "mood",
            value: mood.to_string(),
        })?;
    Ok(Selection {
        genre: genre.to_string(),
        mood: mood.to_string(),
        level,
    })
}

/// Runs a fresh session for `selection` and returns its final state.
pub async fn run_once<S: RecommendationSource>(source: S, selection: Selection) -> SessionState {
    let mut session = Session::new(source);
    session.dispatch(Action::SetGenre(selection.genre));
    session.dispatch(Action::SetMood(selection.mood));
    session.dispatch(Action::SetLevel(selection.level.to_string()));
    session.request_recommendations().await;
    session.state().clone()
}

pub async fn handle_recommend(ctx: &AppContext, args: RecommendArgs) -> Result<()> {
    info!("Handling recommend command with args: {:?}", args);
    let selection = validate_selection(&ctx.catalog, &args.genre, &args.mood, args.level)?;

    if !args.json {
        println!("Generating...");
    }
    let state = run_once(ctx.client(), selection).await;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&state).context("Failed to serialize session state")?;
        println!("{}", rendered);
    } else {
        println!("{}", ui::selections(&state));
        if let Some(panel) = ui::panel(&state.responses, state.responses.len()) {
            println!("{}", panel);
        }
    }

    match state.error {
        Some(message) => Err(anyhow!(message)),
        None => Ok(()),
    }
}
