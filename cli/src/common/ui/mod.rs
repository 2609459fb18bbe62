//! # BookRec UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Plain-text rendering of a session for the terminal. Each function returns
//! a `String` so commands decide where it goes (stdout, a test buffer).
//!
//! - `selections`: the three pickers, `(unset)` when empty
//! - `error_line`: the session's error slot, if any
//! - `panel_list`: every recommendation as a collapsed panel
//! - `panel`: one recommendation expanded
//! - `status`: all of the above plus the trigger state
//!
//! ```text
//! Genre: Fantasy  Mood: Curious  Level: (unset)
//! ▸ Recommendation #1
//! ▾ Recommendation #2
//!   Try The Hobbit...
//! ```
//!
use crate::session::SessionState;
use std::fmt::Write;

const UNSET: &str = "(unset)";

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        UNSET
    } else {
        value
    }
}

pub fn selections(state: &SessionState) -> String {
    format!(
        "Genre: {}  Mood: {}  Level: {}",
        or_unset(&state.genre),
        or_unset(&state.mood),
        or_unset(&state.level)
    )
}

pub fn error_line(state: &SessionState) -> Option<String> {
    state.error.as_ref().map(|e| format!("⚠ {}", e))
}

/// Collapsed panels, one line each. 1-based numbering.
pub fn panel_list(responses: &[String]) -> String {
    if responses.is_empty() {
        return "No recommendations yet.".to_string();
    }
    let mut out = String::new();
    for index in 1..=responses.len() {
        let _ = writeln!(out, "▸ Recommendation #{}", index);
    }
    out.trim_end().to_string()
}

/// Expanded panel for the 1-based `number`, or `None` when out of range.
pub fn panel(responses: &[String], number: usize) -> Option<String> {
    let text = responses.get(number.checked_sub(1)?)?;
    let mut out = format!("▾ Recommendation #{}\n", number);
    for line in text.lines() {
        let _ = writeln!(out, "  {}", line);
    }
    Some(out.trim_end().to_string())
}

pub fn status(state: &SessionState) -> String {
    let mut out = selections(state);
    out.push('\n');
    let trigger = if state.loading {
        "Generating..."
    } else if state.is_ready() {
        "Ready: type 'fetch' to get book recommendations"
    } else {
        "Select a genre, mood and reading level to enable 'fetch'"
    };
    out.push_str(trigger);
    if let Some(err) = error_line(state) {
        out.push('\n');
        out.push_str(&err);
    }
    out.push('\n');
    out.push_str(&panel_list(&state.responses));
    out
}
