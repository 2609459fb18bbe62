//! # Interactive Session Command
//!
//! File: cli/src/commands/interactive.rs
//!
//! ## Overview
//!
//! `bookrec interactive` keeps one session alive and reads commands line by
//! line. Selection commands are checked against the catalog before anything
//! is dispatched, just like a dropdown only offers valid options. Input that
//! is not a known command leaves the session untouched.
//!
//! ```text
//! > genre fantasy
//! > mood curious
//! > level beginner
//! > fetch
//! Generating...
//! ▾ Recommendation #1
//!   ...
//! > show
//! ▸ Recommendation #1
//! > reset
//! > quit
//! ```
//!
use super::AppContext;
use crate::common::ui;
use crate::core::catalog::{Catalog, ReadingLevel};
use crate::core::error::{BookrecError, Result};
use crate::recommend::RecommendationSource;
use crate::session::{Action, FetchOutcome, Session};
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

#[derive(Parser, Debug)]
pub struct InteractiveArgs {}

const HELP: &str = "\
Commands:
  genre <name>   select a genre (clears the mood)
  mood <name>    select a mood for the current genre
  level <name>   select Beginner, Intermediate or Expert
  genres         list genres
  moods          list moods for the current genre
  fetch          get book recommendations
  show [N]       list panels, or expand recommendation N
  status         show selections, errors and panels
  reset          start over
  help           show this help
  quit           leave the session";

/// One line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Genre(String),
    Mood(String),
    Level(String),
    Genres,
    Moods,
    Fetch,
    Show(Option<usize>),
    Status,
    Reset,
    Help,
    Quit,
}

/// `None` for anything that is not a well-formed command.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("genre", value) if !value.is_empty() => Command::Genre(value.to_string()),
        ("mood", value) if !value.is_empty() => Command::Mood(value.to_string()),
        ("level", value) if !value.is_empty() => Command::Level(value.to_string()),
        ("genres", "") => Command::Genres,
        ("moods", "") => Command::Moods,
        ("fetch", "") => Command::Fetch,
        ("show", "") => Command::Show(None),
        ("show", n) => Command::Show(Some(n.parse().ok()?)),
        ("status", "") => Command::Status,
        ("reset", "") => Command::Reset,
        ("help", "") | ("?", "") => Command::Help,
        ("quit", "") | ("exit", "") => Command::Quit,
        _ => return None,
    };
    Some(command)
}

pub async fn handle_interactive(ctx: &AppContext, _args: InteractiveArgs) -> Result<()> {
    info!("Starting interactive session");
    let mut session = Session::new(ctx.client());
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    writeln!(stdout, "📚 Book Recommendation Bot. Type 'help' for commands.")?;
    run_repl(&ctx.catalog, &mut session, stdin, &mut stdout).await
}

/// Drives `session` from `input` until `quit` or end of input.
pub async fn run_repl<S, R, W>(
    catalog: &Catalog,
    session: &mut Session<S>,
    input: R,
    out: &mut W,
) -> Result<()>
where
    S: RecommendationSource,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = parse_command(&line) else {
            debug!("Ignoring unrecognized input: {:?}", line);
            writeln!(
                out,
                "Unknown command '{}'. Type 'help' for commands.",
                line.trim()
            )?;
            continue;
        };

        if command == Command::Quit {
            break;
        }
        execute(catalog, session, command, out).await?;
    }
    Ok(())
}

async fn execute<S, W>(
    catalog: &Catalog,
    session: &mut Session<S>,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    S: RecommendationSource,
    W: Write,
{
    match command {
        Command::Genre(input) => match catalog.find_genre(&input) {
            Some(genre) => {
                session.dispatch(Action::SetGenre(genre.to_string()));
                writeln!(out, "{}", ui::selections(session.state()))?;
            }
            None => reject(out, "genre", &input)?,
        },
        Command::Mood(input) => {
            if session.state().genre.is_empty() {
                writeln!(out, "Select a genre first.")?;
            } else {
                match catalog.find_mood(&session.state().genre, &input) {
                    Some(mood) => {
                        session.dispatch(Action::SetMood(mood.to_string()));
                        writeln!(out, "{}", ui::selections(session.state()))?;
                    }
                    None => reject(out, "mood", &input)?,
                }
            }
        }
        Command::Level(input) => match input.parse::<ReadingLevel>() {
            Ok(level) => {
                session.dispatch(Action::SetLevel(level.to_string()));
                writeln!(out, "{}", ui::selections(session.state()))?;
            }
            Err(e) => writeln!(out, "{}", e)?,
        },
        Command::Genres => {
            writeln!(out, "{}", catalog.genres().collect::<Vec<_>>().join(", "))?;
        }
        Command::Moods => {
            let moods = catalog.moods(&session.state().genre);
            if moods.is_empty() {
                writeln!(out, "Select a genre first.")?;
            } else {
                writeln!(out, "{}", moods.join(", "))?;
            }
        }
        Command::Fetch => {
            if !session.state().is_ready() {
                writeln!(out, "Select a genre, mood and reading level first.")?;
                return Ok(());
            }
            writeln!(out, "Generating...")?;
            out.flush()?;
            match session.request_recommendations().await {
                FetchOutcome::Added => {
                    let responses = &session.state().responses;
                    if let Some(panel) = ui::panel(responses, responses.len()) {
                        writeln!(out, "{}", panel)?;
                    }
                }
                FetchOutcome::Failed => {
                    if let Some(line) = ui::error_line(session.state()) {
                        writeln!(out, "{}", line)?;
                    }
                }
                // Commands run one at a time and readiness was checked above,
                // so `loading` is never set here.
                FetchOutcome::Skipped => writeln!(out, "A request is already in progress.")?,
            }
        }
        Command::Show(None) => writeln!(out, "{}", ui::panel_list(&session.state().responses))?,
        Command::Show(Some(n)) => match ui::panel(&session.state().responses, n) {
            Some(panel) => writeln!(out, "{}", panel)?,
            None => writeln!(out, "No recommendation #{}.", n)?,
        },
        Command::Status => writeln!(out, "{}", ui::status(session.state()))?,
        Command::Reset => {
            session.dispatch(Action::Reset);
            writeln!(out, "Session reset.")?;
        }
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => {}
    }
    Ok(())
}

fn reject<W: Write>(out: &mut W, field: &'static str, value: &str) -> Result<()> {
    let err = BookrecError::InvalidSelection {
        field,
        value: value.to_string(),
    };
    writeln!(out, "{} Type '{}s' to see the options.", err, field)?;
    Ok(())
}
