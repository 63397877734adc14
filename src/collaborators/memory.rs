//! In-process collaborators.
//!
//! Used by the demo binary and the integration tests. Nothing here talks to
//! a network; [`SimulatedSubscriptionService`] only sleeps to stand in for one.

use super::{
    AuthError, AuthStore, CartStore, NavigationRequest, Navigator, SubscriptionError,
    SubscriptionService, UserProfile,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// CART
// =============================================================================

/// Cart lines keyed by product id.
///
/// Every mutation that changes the contents bumps [`CartStore::revision`].
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    lines: Mutex<HashMap<String, usize>>,
    revision: AtomicU64,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `product_id`. Adding zero is a no-op.
    pub fn add_item(&self, product_id: impl Into<String>, quantity: usize) {
        if quantity == 0 {
            return;
        }
        let product_id = product_id.into();
        *lock(&self.lines).entry(product_id.clone()).or_insert(0) += quantity;
        self.bump();
        debug!(%product_id, quantity, "Cart item added");
    }

    /// Sets the quantity of a line. Zero removes it.
    pub fn set_quantity(&self, product_id: impl Into<String>, quantity: usize) {
        let product_id = product_id.into();
        let changed = {
            let mut lines = lock(&self.lines);
            if quantity == 0 {
                lines.remove(&product_id).is_some()
            } else {
                lines.insert(product_id.clone(), quantity) != Some(quantity)
            }
        };
        if changed {
            self.bump();
            debug!(%product_id, quantity, "Cart quantity set");
        }
    }

    pub fn remove_item(&self, product_id: &str) {
        if lock(&self.lines).remove(product_id).is_some() {
            self.bump();
            debug!(product_id, "Cart item removed");
        }
    }

    pub fn clear(&self) {
        let had_items = {
            let mut lines = lock(&self.lines);
            let had_items = !lines.is_empty();
            lines.clear();
            had_items
        };
        if had_items {
            self.bump();
            debug!("Cart cleared");
        }
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }
}

impl CartStore for InMemoryCartStore {
    fn item_count(&self) -> usize {
        lock(&self.lines).values().sum()
    }

    fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// A session held in memory. `logout` clears it.
#[derive(Debug, Default)]
pub struct InMemoryAuthStore {
    user: Mutex<Option<UserProfile>>,
    admin: AtomicBool,
    loading: AtomicBool,
    logout_failure: Mutex<Option<String>>,
}

impl InMemoryAuthStore {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserProfile) -> Self {
        Self {
            user: Mutex::new(Some(user)),
            ..Self::default()
        }
    }

    pub fn with_admin(self, admin: bool) -> Self {
        self.admin.store(admin, Ordering::SeqCst);
        self
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.store(loading, Ordering::SeqCst);
    }

    /// Makes every subsequent `logout` fail with `reason` until cleared with `None`.
    pub fn set_logout_failure(&self, reason: Option<String>) {
        *lock(&self.logout_failure) = reason;
    }

    pub fn sign_in(&self, user: UserProfile) {
        *lock(&self.user) = Some(user);
    }
}

#[async_trait]
impl AuthStore for InMemoryAuthStore {
    fn current_user(&self) -> Option<UserProfile> {
        lock(&self.user).clone()
    }

    fn is_authenticated(&self) -> bool {
        lock(&self.user).is_some()
    }

    fn is_admin(&self) -> bool {
        self.is_authenticated() && self.admin.load(Ordering::SeqCst)
    }

    fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        if let Some(reason) = lock(&self.logout_failure).clone() {
            return Err(AuthError::LogoutFailed(reason));
        }
        let previous = lock(&self.user).take();
        self.admin.store(false, Ordering::SeqCst);
        info!(was_signed_in = previous.is_some(), "Session ended");
        Ok(())
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// A browser-like history stack.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
    requests: Mutex<Vec<NavigationRequest>>,
}

impl HistoryNavigator {
    /// Starts with `initial` as the only history entry.
    pub fn starting_at(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial.into()]),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn current(&self) -> Option<String> {
        lock(&self.entries).last().cloned()
    }

    pub fn entries(&self) -> Vec<String> {
        lock(&self.entries).clone()
    }

    /// Every request received, in order.
    pub fn requests(&self) -> Vec<NavigationRequest> {
        lock(&self.requests).clone()
    }
}

impl Navigator for HistoryNavigator {
    fn go_to(&self, request: NavigationRequest) {
        let location = request.location();
        {
            let mut entries = lock(&self.entries);
            if request.replace_history() {
                entries.pop();
            }
            entries.push(location.clone());
        }
        info!(%location, replace = request.replace_history(), "Navigated");
        lock(&self.requests).push(request);
    }
}

// =============================================================================
// SUBSCRIPTIONS
// =============================================================================

/// Accepts every address after a fixed latency.
#[derive(Debug)]
pub struct SimulatedSubscriptionService {
    latency: Duration,
    subscribers: Mutex<Vec<String>>,
}

impl SimulatedSubscriptionService {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1000);

    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribers(&self) -> Vec<String> {
        lock(&self.subscribers).clone()
    }
}

impl Default for SimulatedSubscriptionService {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl SubscriptionService for SimulatedSubscriptionService {
    async fn subscribe(&self, email: &str) -> Result<(), SubscriptionError> {
        debug!(latency_ms = self.latency.as_millis() as u64, "Simulating subscribe call");
        tokio::time::sleep(self.latency).await;
        let mut subscribers = lock(&self.subscribers);
        if !subscribers.iter().any(|known| known == email) {
            subscribers.push(email.to_string());
        }
        Ok(())
    }
}
