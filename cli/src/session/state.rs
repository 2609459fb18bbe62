//! # Session State and Transitions
//!
//! File: cli/src/session/state.rs
//!
//! ## Overview
//!
//! `SessionState` is the in-memory record of one session: the three
//! selections, the accumulated recommendations, the loading flag and the
//! error slot. It only changes through [`transition`], a pure function from
//! `(state, action)` to the next state.
//!
//! | Action        | Effect                                                  |
//! |---------------|---------------------------------------------------------|
//! | `SetGenre`    | sets genre, resets mood, clears error                   |
//! | `SetMood`     | sets mood, clears error                                 |
//! | `SetLevel`    | sets level, clears error                                |
//! | `SetLoading`  | sets loading, clears error                              |
//! | `AddResponse` | appends a response, stops loading, clears error         |
//! | `SetError`    | sets error, stops loading                               |
//! | `Reset`       | initial state                                           |
//!
use serde::Serialize;

/// Selections, fetch status and accumulated responses. Empty strings mean "unset".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub genre: String,
    pub mood: String,
    pub level: String,
    pub responses: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

impl SessionState {
    /// All three selections are present.
    pub fn is_ready(&self) -> bool {
        !self.genre.is_empty() && !self.mood.is_empty() && !self.level.is_empty()
    }

    /// The fetch trigger is enabled.
    pub fn can_fetch(&self) -> bool {
        self.is_ready() && !self.loading
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetGenre(String),
    SetMood(String),
    SetLevel(String),
    SetLoading(bool),
    AddResponse(String),
    SetError(String),
    Reset,
}

/// Computes the next state. Never touches `state`.
pub fn transition(state: &SessionState, action: Action) -> SessionState {
    match action {
        Action::SetGenre(genre) => SessionState {
            genre,
            mood: String::new(),
            error: None,
            ..state.clone()
        },
        Action::SetMood(mood) => SessionState {
            mood,
            error: None,
            ..state.clone()
        },
        Action::SetLevel(level) => SessionState {
            level,
            error: None,
            ..state.clone()
        },
        Action::SetLoading(loading) => SessionState {
            loading,
            error: None,
            ..state.clone()
        },
        Action::AddResponse(text) => {
            let mut responses = state.responses.clone();
            responses.push(text);
            SessionState {
                responses,
                loading: false,
                error: None,
                ..state.clone()
            }
        }
        Action::SetError(message) => SessionState {
            error: Some(message),
            loading: false,
            ..state.clone()
        },
        Action::Reset => SessionState::default(),
    }
}
