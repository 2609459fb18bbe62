//! # BookRec Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the BookRec CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration and the mood catalog once
//! - Routing execution to the appropriate command handler
//!
//! ## Examples
//!
//! ```bash
//! # Browse the catalog
//! bookrec genres
//! bookrec moods Fantasy
//!
//! # One request, with more logging
//! BOOKREC_API_KEY=... bookrec -v recommend --genre Fantasy --mood Curious --level beginner
//!
//! # Keep a session open
//! bookrec interactive
//! ```
//!
use bookrec::commands::{self, AppContext};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "bookrec",
    about = "📚 BookRec: book recommendations by genre, mood and reading level",
    long_about = "Pick a genre, a mood and a reading level, and BookRec asks a\n\
                  generative-language API for six books that fit.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file only.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// API key for the text-generation endpoint.
    #[arg(long, env = "BOOKREC_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the genres in the catalog.
    Genres,
    /// List the moods offered for a genre.
    Moods(commands::catalog::MoodsArgs),
    /// Fetch one set of recommendations.
    #[command(alias = "r")]
    Recommend(commands::recommend::RecommendArgs),
    /// Start an interactive session.
    #[command(alias = "i")]
    Interactive(commands::interactive::InteractiveArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli.command);

    let command_result = async move {
        let ctx = AppContext::load(cli.config.as_deref(), cli.api_key)?;
        match cli.command {
            Commands::Genres => commands::catalog::handle_genres(&ctx).await,
            Commands::Moods(args) => commands::catalog::handle_moods(&ctx, args).await,
            Commands::Recommend(args) => commands::recommend::handle_recommend(&ctx, args).await,
            Commands::Interactive(args) => {
                commands::interactive::handle_interactive(&ctx, args).await
            }
        }
    }
    .await;

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
