//! # Mock Collaborators
//!
//! Expectation-based stand-ins for the collaborators that *act*
//! (`subscribe`, `logout`). Queue the responses you want, hand the mock to
//! a controller, then call `verify()` to assert every expectation was used.
//!
//! ```rust
//! use std::sync::Arc;
//! use storefront_shell::collaborators::mock::MockSubscriptionService;
//! use storefront_shell::collaborators::SubscriptionService;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockSubscriptionService::new());
//!     mock.expect_subscribe().with_email("a@b").return_ok();
//!
//!     mock.subscribe("a@b").await.unwrap();
//!
//!     assert_eq!(mock.call_count(), 1);
//!     mock.verify();
//! }
//! ```
//!
//! A call with no queued expectation panics, the same way an unexpected
//! request would fail a test against a strict mock.
//!
//! ## Holding an operation open
//!
//! `.after(delay)` makes the mock sleep before answering. Combined with a
//! paused tokio clock this keeps a slot `Running` for as long as a test
//! needs, e.g. to fire a second trigger at it.

use super::{AuthError, AuthStore, SubscriptionError, SubscriptionService, UserProfile};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// EXPECTATIONS
// =============================================================================

struct Expectation<E> {
    delay: Option<Duration>,
    response: Result<(), E>,
}

type Queue<E> = Arc<Mutex<VecDeque<Expectation<E>>>>;

/// Builder returned by `expect_*`. Finish with `return_ok` or `return_err`.
pub struct ExpectationBuilder<E> {
    queue: Queue<E>,
    delay: Option<Duration>,
    email: Option<String>,
    emails: Option<Arc<Mutex<VecDeque<Option<String>>>>>,
}

impl<E> ExpectationBuilder<E> {
    /// Waits `delay` before answering.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: E) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), E>) {
        if let Some(emails) = &self.emails {
            emails.lock().unwrap().push_back(self.email.clone());
        }
        self.queue.lock().unwrap().push_back(Expectation {
            delay: self.delay,
            response,
        });
    }
}

impl ExpectationBuilder<SubscriptionError> {
    /// Asserts the address passed to `subscribe`.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

fn next<E>(queue: &Queue<E>, call: &str) -> Expectation<E> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| panic!("Unexpected {call} call: no expectation queued"))
}

fn verify_empty<E>(queue: &Queue<E>, what: &str) {
    let remaining = queue.lock().unwrap().len();
    if remaining != 0 {
        panic!("Not all {what} expectations were met. {remaining} remaining");
    }
}

// =============================================================================
// SUBSCRIPTION SERVICE
// =============================================================================

/// A [`SubscriptionService`] answering from a queue of expectations.
#[derive(Default)]
pub struct MockSubscriptionService {
    expectations: Queue<SubscriptionError>,
    emails: Arc<Mutex<VecDeque<Option<String>>>>,
    calls: Mutex<Vec<String>>,
}

impl MockSubscriptionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one `subscribe` call.
    pub fn expect_subscribe(&self) -> ExpectationBuilder<SubscriptionError> {
        ExpectationBuilder {
            queue: self.expectations.clone(),
            delay: None,
            email: None,
            emails: Some(self.emails.clone()),
        }
    }

    /// Addresses received so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        verify_empty(&self.expectations, "subscribe");
    }
}

#[async_trait]
impl SubscriptionService for MockSubscriptionService {
    async fn subscribe(&self, email: &str) -> Result<(), SubscriptionError> {
        self.calls.lock().unwrap().push(email.to_string());
        let expectation = next(&self.expectations, "subscribe");
        let expected_email = self.emails.lock().unwrap().pop_front().flatten();
        if let Some(expected) = expected_email {
            assert_eq!(email, expected, "subscribe called with unexpected email");
        }
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}

// =============================================================================
// AUTH STORE
// =============================================================================

/// An [`AuthStore`] with a fixed session snapshot and queued `logout` answers.
///
/// The snapshot does not change when `logout` succeeds; use
/// [`InMemoryAuthStore`](super::memory::InMemoryAuthStore) when a test needs
/// the session to actually end.
pub struct MockAuthStore {
    user: Option<UserProfile>,
    admin: bool,
    loading: bool,
    expectations: Queue<AuthError>,
    logout_calls: Mutex<usize>,
}

impl MockAuthStore {
    pub fn guest() -> Self {
        Self {
            user: None,
            admin: false,
            loading: false,
            expectations: Arc::default(),
            logout_calls: Mutex::new(0),
        }
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Some(user),
            ..Self::guest()
        }
    }

    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub fn with_loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Expects one `logout` call.
    pub fn expect_logout(&self) -> ExpectationBuilder<AuthError> {
        ExpectationBuilder {
            queue: self.expectations.clone(),
            delay: None,
            email: None,
            emails: None,
        }
    }

    pub fn logout_calls(&self) -> usize {
        *self.logout_calls.lock().unwrap()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        verify_empty(&self.expectations, "logout");
    }
}

#[async_trait]
impl AuthStore for MockAuthStore {
    fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }

    fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    fn is_admin(&self) -> bool {
        self.admin
    }

    fn is_loading(&self) -> bool {
        self.loading
    }

    async fn logout(&self) -> Result<(), AuthError> {
        *self.logout_calls.lock().unwrap() += 1;
        let expectation = next(&self.expectations, "logout");
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.response
    }
}
