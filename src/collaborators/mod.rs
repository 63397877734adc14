//! Contracts for the app's data layer, as seen by the controllers.
//!
//! The controllers never own auth, cart, routing, or the newsletter
//! backend. They reach them through these narrow traits, injected at
//! construction time (see [`crate::runtime::StorefrontShell`]).
//!
//! - [`AuthStore`] - session identity and the `logout` command
//! - [`CartStore`] - item count plus a revision that changes on every mutation
//! - [`Navigator`] - fire-and-forget route changes
//! - [`SubscriptionService`] - the newsletter `subscribe` command
//!
//! [`memory`] holds in-process implementations; [`mock`] holds
//! expectation-based mocks for tests.

pub mod error;
pub mod memory;
pub mod mock;
pub mod navigation;

pub use error::*;
pub use navigation::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The identity record of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// Session state and the logout command.
///
/// Read accessors are synchronous snapshots; only `logout` suspends.
#[async_trait]
pub trait AuthStore: Send + Sync {
    fn current_user(&self) -> Option<UserProfile>;

    fn is_authenticated(&self) -> bool;

    fn is_admin(&self) -> bool;

    /// `true` while the store is still resolving the session.
    fn is_loading(&self) -> bool;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// The cart-size source.
pub trait CartStore: Send + Sync {
    /// Total number of items in the cart.
    fn item_count(&self) -> usize;

    /// Identity of the current cart contents. Changes whenever the cart does.
    fn revision(&self) -> u64;
}

/// The router.
pub trait Navigator: Send + Sync {
    fn go_to(&self, request: NavigationRequest);
}

/// The newsletter backend.
#[async_trait]
pub trait SubscriptionService: Send + Sync {
    async fn subscribe(&self, email: &str) -> Result<(), SubscriptionError>;
}
