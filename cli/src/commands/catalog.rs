//! # Catalog Browsing Commands
//!
//! File: cli/src/commands/catalog.rs
//!
//! `bookrec genres` lists the genres in catalog order. `bookrec moods <GENRE>`
//! lists the moods offered for one genre (matched case-insensitively).
//!
use super::AppContext;
use crate::core::catalog::Catalog;
use crate::core::error::{BookrecError, Result};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct MoodsArgs {
    /// Genre whose moods should be listed.
    pub genre: String,
}

pub async fn handle_genres(ctx: &AppContext) -> Result<()> {
    info!("Listing genres");
    for genre in ctx.catalog.genres() {
        println!("{}", genre);
    }
    Ok(())
}

pub async fn handle_moods(ctx: &AppContext, args: MoodsArgs) -> Result<()> {
    info!("Listing moods for genre '{}'", args.genre);
    for mood in moods_for(&ctx.catalog, &args.genre)? {
        println!("{}", mood);
    }
    Ok(())
}

fn moods_for<'a>(catalog: &'a Catalog, genre: &str) -> Result<&'a [String]> {
    let canonical = catalog
        .find_genre(genre)
        .ok_or_else(|| BookrecError::GenreNotFound {
            name: genre.to_string(),
        })?;
    Ok(catalog.moods(canonical))
}
