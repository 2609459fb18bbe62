//! # BookRec Session
//!
//! File: cli/src/session/mod.rs
//!
//! ## Overview
//!
//! A `Session` owns the single `SessionState` of a run and is the only place
//! that mutates it, always through `state::transition`. It also wires the
//! fetch trigger to a `RecommendationSource`:
//!
//! 1. the trigger is ignored unless all selections are set and no fetch is outstanding;
//! 2. `SetLoading(true)` is dispatched;
//! 3. the source is awaited (the only suspension point);
//! 4. the result is fed back as `AddResponse(text)` or `SetError(message)`.
//!
use crate::recommend::RecommendationSource;
use tracing::{debug, error, info};

pub mod state;

pub use state::{transition, Action, SessionState};

/// What happened to a fetch trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A response was appended.
    Added,
    /// The session's error slot was set.
    Failed,
    /// The trigger was disabled (missing selection or fetch in progress).
    Skipped,
}

pub struct Session<S> {
    state: SessionState,
    source: S,
}

impl<S: RecommendationSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            state: SessionState::default(),
            source,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!("Dispatching {:?}", action);
        self.state = transition(&self.state, action);
    }

    /// Runs one fetch for the current selections, if the trigger is enabled.
    pub async fn request_recommendations(&mut self) -> FetchOutcome {
        if !self.state.can_fetch() {
            debug!(
                "Fetch trigger disabled (ready: {}, loading: {})",
                self.state.is_ready(),
                self.state.loading
            );
            return FetchOutcome::Skipped;
        }

        self.dispatch(Action::SetLoading(true));

        let result = self
            .source
            .fetch_recommendation(&self.state.genre, &self.state.mood, &self.state.level)
            .await;

        match result {
            Ok(text) => {
                info!("Received recommendation ({} chars)", text.len());
                self.dispatch(Action::AddResponse(text));
                FetchOutcome::Added
            }
            Err(e) => {
                error!("Fetch error: {}", e);
                self.dispatch(Action::SetError(e.user_message().to_string()));
                FetchOutcome::Failed
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;
    use crate::core::error::{FetchError, EMPTY_RESPONSE_MESSAGE, REQUEST_FAILED_MESSAGE};
    use crate::core::config::ApiConfig;
    use crate::recommend::GeminiClient;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn select<S: RecommendationSource>(session: &mut Session<S>) {
        session.dispatch(Action::SetGenre("Fantasy".into()));
        session.dispatch(Action::SetMood("Curious".into()));
        session.dispatch(Action::SetLevel("Beginner".into()));
    }

    #[tokio::test]
    async fn test_success_appends_response() {
        let source = ScriptedSource::new(vec![Ok("Try The Hobbit...".into())]);
        let mut session = Session::new(&source);
        select(&mut session);

        assert_eq!(session.request_recommendations().await, FetchOutcome::Added);
        assert_eq!(session.state().responses, vec!["Try The Hobbit..."]);
        assert!(!session.state().loading);
        assert_eq!(session.state().error, None);
        assert_eq!(
            source.calls.lock().unwrap()[0],
            ("Fantasy".into(), "Curious".into(), "Beginner".into())
        );
    }

    #[tokio::test]
    async fn test_failure_sets_generic_error() {
        let source = ScriptedSource::new(vec![
            Ok("first".into()),
            Err(FetchError::request_failed("API error: 500")),
        ]);
        let mut session = Session::new(&source);
        select(&mut session);

        session.request_recommendations().await;
        assert_eq!(session.request_recommendations().await, FetchOutcome::Failed);
        assert_eq!(session.state().error.as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert!(!session.state().loading);
        assert_eq!(session.state().responses, vec!["first"]);
    }

    #[tokio::test]
    async fn test_trigger_disabled_without_selections() {
        let source = ScriptedSource::new(vec![Ok("unused".into())]);
        let mut session = Session::new(&source);
        session.dispatch(Action::SetGenre("Fantasy".into()));

        assert_eq!(session.request_recommendations().await, FetchOutcome::Skipped);
        assert_eq!(source.call_count(), 0);
        assert_eq!(session.state().genre, "Fantasy");
        assert_eq!(session.state().error, None);
    }

    #[tokio::test]
    async fn test_trigger_disabled_while_loading() {
        let source = ScriptedSource::new(vec![Ok("unused".into())]);
        let mut session = Session::new(&source);
        select(&mut session);
        session.dispatch(Action::SetLoading(true));

        assert_eq!(session.request_recommendations().await, FetchOutcome::Skipped);
        assert_eq!(source.call_count(), 0);
        assert!(session.state().loading);
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "Try The Hobbit..."}]}}]
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{}]}}]
            })))
            .mount(&server)
            .await;

        let api = ApiConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let mut session = Session::new(GeminiClient::new(&api, None));
        select(&mut session);

        session.request_recommendations().await;
        assert_eq!(session.state().responses, vec!["Try The Hobbit..."]);
        assert_eq!(session.state().error, None);

        session.request_recommendations().await;
        assert_eq!(session.state().error.as_deref(), Some(REQUEST_FAILED_MESSAGE));
        assert_eq!(session.state().responses.len(), 1);

        session.request_recommendations().await;
        assert_eq!(session.state().error.as_deref(), Some(EMPTY_RESPONSE_MESSAGE));
        assert!(!session.state().loading);
    }
}
