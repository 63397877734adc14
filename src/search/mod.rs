//! # Product Search
//!
//! The header's search box. Keystrokes update the query verbatim; only a
//! submit trims and validates it.
//!
//! A valid submit produces exactly one navigation to
//! `{products_route}?{search_param}=<escaped term>` and clears the box.
//! The navigation call is synchronous, but it still runs through an
//! [`ActionSlot`] so a burst of Enter presses yields a single navigation
//! and the box can be disabled while it is in flight.

use crate::collaborators::{NavigationRequest, Navigator};
use crate::config::ShellConfig;
use crate::framework::{ActionSlot, ActionState, SubmitOutcome};
use crate::validation::{check_search_term, is_valid_search_term_with};
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, info, instrument};

pub struct SearchController {
    navigator: Arc<dyn Navigator>,
    query: Mutex<String>,
    slot: ActionSlot,
    products_route: String,
    search_param: String,
    min_len: usize,
}

impl SearchController {
    pub fn new(navigator: Arc<dyn Navigator>, config: &ShellConfig) -> Self {
        Self {
            navigator,
            query: Mutex::new(String::new()),
            slot: ActionSlot::new("search").with_timeout(config.action_timeout()),
            products_route: config.products_route.clone(),
            search_param: config.search_param.clone(),
            min_len: config.min_search_len,
        }
    }

    /// Text-change event. Stored as typed, untrimmed.
    pub fn on_query_change(&self, text: impl Into<String>) {
        *self.query.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    pub fn query(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn state(&self) -> ActionState {
        self.slot.state()
    }

    pub fn watch(&self) -> watch::Receiver<ActionState> {
        self.slot.watch()
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.slot.is_running() && is_valid_search_term_with(&self.query(), self.min_len)
    }

    /// Submit event.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let raw = self.query();
        let term = match check_search_term(&raw, self.min_len) {
            Ok(term) => term.to_string(),
            Err(e) => {
                debug!(error = %e, "Search blocked");
                return SubmitOutcome::Invalid(e);
            }
        };

        let request =
            NavigationRequest::to(self.products_route.as_str()).with_param(&self.search_param, &term);
        let navigator = &self.navigator;
        let outcome = self
            .slot
            .run(move || async move {
                navigator.go_to(request);
                Ok::<_, Infallible>(())
            })
            .await;

        if outcome.is_succeeded() {
            self.on_query_change(String::new());
            self.slot.reset();
            info!(%term, "Search submitted");
        }
        outcome.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::memory::HistoryNavigator;
    use crate::validation::ValidationError;

    fn controller() -> (SearchController, Arc<HistoryNavigator>) {
        let navigator = Arc::new(HistoryNavigator::starting_at("/"));
        let controller = SearchController::new(navigator.clone(), &ShellConfig::default());
        (controller, navigator)
    }

    #[tokio::test]
    async fn test_short_term_does_not_navigate() {
        let (search, navigator) = controller();
        search.on_query_change("a");

        let outcome = search.submit().await;

        assert_eq!(
            outcome,
            SubmitOutcome::Invalid(ValidationError::SearchTermTooShort { min: 2 })
        );
        assert!(navigator.requests().is_empty());
        assert_eq!(search.state(), ActionState::Idle);
        assert_eq!(search.query(), "a");
    }

    #[tokio::test]
    async fn test_valid_term_navigates_once_and_clears() {
        let (search, navigator) = controller();
        search.on_query_change("ab");

        let outcome = search.submit().await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        let requests = navigator.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].location(), "/products?search=ab");
        assert_eq!(search.query(), "");
        assert_eq!(search.state(), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_term_is_trimmed_and_escaped() {
        let (search, navigator) = controller();
        search.on_query_change("  running shoes & socks ");

        search.submit().await;

        let requests = navigator.requests();
        let request = &requests[0];
        assert_eq!(request.path(), "/products");
        assert_eq!(request.query(), Some("search=running+shoes+%26+socks"));
        assert_eq!(request.param("search").as_deref(), Some("running shoes & socks"));
        assert!(!request.replace_history());
    }

    #[tokio::test]
    async fn test_keystrokes_are_stored_verbatim() {
        let (search, _) = controller();
        search.on_query_change("  ab ");
        assert_eq!(search.query(), "  ab ");
        assert!(search.can_submit());

        search.on_query_change(" a ");
        assert!(!search.can_submit());
    }

    #[tokio::test]
    async fn test_second_submit_after_clear_is_blocked() {
        let (search, navigator) = controller();
        search.on_query_change("boots");

        search.submit().await;
        let again = search.submit().await;

        assert!(matches!(again, SubmitOutcome::Invalid(_)));
        assert_eq!(navigator.requests().len(), 1);
    }
}
