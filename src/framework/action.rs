//! # Action Slots
//!
//! An [`ActionSlot`] gives a user-triggered async operation a lifecycle:
//!
//! ```text
//! Idle ──trigger──▶ Running ──ok──▶ Succeeded ──reset──▶ Idle
//!                      │                  ▲
//!                      └──err──▶ Failed ──┘ (trigger again, or reset)
//! ```
//!
//! ## Guarantees
//!
//! - **Single flight**: a trigger while the slot is `Running` is dropped and
//!   reported as [`RunOutcome::Rejected`]. It is never queued.
//! - **Containment**: an operation error is recorded on the slot and returned
//!   as [`RunOutcome::Failed`]. Nothing is re-thrown.
//! - **No stuck spinner**: `Running` is cleared on every exit path. If the
//!   running future is dropped or panics, the slot settles as
//!   [`ActionError::Abandoned`].
//!
//! ## Observing a slot
//!
//! The state lives in a `tokio::sync::watch` channel so the rendering layer
//! can subscribe with [`ActionSlot::watch`] and disable the control while
//! the slot is `Running`.
//!
//! ```rust
//! use storefront_shell::framework::{ActionSlot, ActionState, RunOutcome};
//!
//! #[tokio::main]
//! async fn main() {
//!     let slot = ActionSlot::new("demo");
//!     let outcome = slot.run(|| async { Ok::<_, std::io::Error>(42) }).await;
//!     assert_eq!(outcome, RunOutcome::Succeeded(42));
//!     assert_eq!(slot.state(), ActionState::Succeeded);
//! }
//! ```

use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle of one action slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ActionState {
    #[default]
    Idle,
    Running,
    Succeeded,
    Failed,
}

/// The recorded reason a slot run failed.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Operation failed: {0}")]
    Operation(String),
    #[error("Operation timed out after {0:?}")]
    TimedOut(Duration),
    #[error("Operation abandoned before it settled")]
    Abandoned,
}

/// What happened to a single trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<T> {
    /// The slot was already running; the operation was not invoked.
    Rejected,
    Succeeded(T),
    Failed(ActionError),
}

impl<T> RunOutcome<T> {
    pub fn is_rejected(&self) -> bool {
        matches!(self, RunOutcome::Rejected)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, RunOutcome::Succeeded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed(_))
    }
}

/// A named unit of mutually exclusive async work.
pub struct ActionSlot {
    name: &'static str,
    state: watch::Sender<ActionState>,
    last_error: Mutex<Option<ActionError>>,
    timeout: Option<Duration>,
}

impl ActionSlot {
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(ActionState::Idle);
        Self {
            name,
            state,
            last_error: Mutex::new(None),
            timeout: None,
        }
    }

    /// Bounds every run by `timeout`. `None` lets operations run until they settle.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> ActionState {
        *self.state.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.state() == ActionState::Running
    }

    /// Subscribes to state transitions.
    pub fn watch(&self) -> watch::Receiver<ActionState> {
        self.state.subscribe()
    }

    /// Error recorded by the most recent failed run. Cleared on success.
    pub fn last_error(&self) -> Option<ActionError> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns a settled slot (`Succeeded` or `Failed`) to `Idle`.
    ///
    /// A `Running` or already `Idle` slot is left alone. Returns whether the
    /// state changed.
    pub fn reset(&self) -> bool {
        self.reset_from(|state| matches!(state, ActionState::Succeeded | ActionState::Failed))
    }

    /// Like [`reset`](Self::reset), but only from `Succeeded`.
    ///
    /// A `Failed` outcome that settled after the success stays visible.
    pub fn reset_succeeded(&self) -> bool {
        self.reset_from(|state| state == ActionState::Succeeded)
    }

    fn reset_from(&self, eligible: impl Fn(ActionState) -> bool) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if eligible(*state) {
                *state = ActionState::Idle;
                true
            } else {
                false
            }
        });
        if changed {
            debug!(slot = self.name, "Reset");
        }
        changed
    }

    /// Runs `op` under this slot.
    ///
    /// `op` is only invoked if the slot is not already running.
    pub async fn run<F, Fut, T, E>(&self, op: F) -> RunOutcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.try_begin() {
            warn!(slot = self.name, "Rejected, already running");
            return RunOutcome::Rejected;
        }
        let guard = RunningGuard::new(self);
        debug!(slot = self.name, "Running");

        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, op()).await {
                Ok(settled) => settled.map_err(|e| ActionError::Operation(e.to_string())),
                Err(_) => Err(ActionError::TimedOut(limit)),
            },
            None => op()
                .await
                .map_err(|e| ActionError::Operation(e.to_string())),
        };
        guard.disarm();

        match result {
            Ok(value) => {
                self.settle(ActionState::Succeeded, None);
                info!(slot = self.name, "Succeeded");
                RunOutcome::Succeeded(value)
            }
            Err(e) => {
                warn!(slot = self.name, error = %e, "Failed");
                self.settle(ActionState::Failed, Some(e.clone()));
                RunOutcome::Failed(e)
            }
        }
    }

    /// Atomically moves any non-running state to `Running`.
    fn try_begin(&self) -> bool {
        self.state.send_if_modified(|state| {
            if *state == ActionState::Running {
                false
            } else {
                *state = ActionState::Running;
                true
            }
        })
    }

    fn settle(&self, state: ActionState, error: Option<ActionError>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = error;
        self.state.send_replace(state);
    }
}

impl std::fmt::Debug for ActionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionSlot")
            .field("name", &self.name)
            .field("state", &self.state())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settles the slot as abandoned if the running future never reaches `disarm`.
struct RunningGuard<'a> {
    slot: &'a ActionSlot,
    armed: bool,
}

impl<'a> RunningGuard<'a> {
    fn new(slot: &'a ActionSlot) -> Self {
        Self { slot, armed: true }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!(slot = self.slot.name, "Abandoned while running");
            self.slot
                .settle(ActionState::Failed, Some(ActionError::Abandoned));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("boom")]
    struct Boom;

    #[tokio::test]
    async fn test_success_records_no_error() {
        let slot = ActionSlot::new("test");
        assert_eq!(slot.state(), ActionState::Idle);

        let outcome = slot.run(|| async { Ok::<_, Boom>("done") }).await;

        assert_eq!(outcome, RunOutcome::Succeeded("done"));
        assert_eq!(slot.state(), ActionState::Succeeded);
        assert_eq!(slot.last_error(), None);
    }

    #[tokio::test]
    async fn test_failure_is_contained_and_recorded() {
        let slot = ActionSlot::new("test");

        let outcome = slot.run(|| async { Err::<(), _>(Boom) }).await;

        assert_eq!(
            outcome,
            RunOutcome::Failed(ActionError::Operation("boom".into()))
        );
        assert_eq!(slot.state(), ActionState::Failed);
        assert_eq!(
            slot.last_error(),
            Some(ActionError::Operation("boom".into()))
        );
    }

    #[tokio::test]
    async fn test_observer_sees_running_during_operation() {
        let slot = ActionSlot::new("test");
        let rx = slot.watch();

        let outcome = slot
            .run(|| {
                let seen = *rx.borrow();
                async move { Ok::<_, Boom>(seen) }
            })
            .await;

        assert_eq!(outcome, RunOutcome::Succeeded(ActionState::Running));
        assert_eq!(*rx.borrow(), ActionState::Succeeded);
    }

    #[tokio::test]
    async fn test_concurrent_trigger_is_rejected() {
        let slot = ActionSlot::new("test");
        let calls = Arc::new(AtomicUsize::new(0));

        let op = || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
                Ok::<_, Boom>(())
            }
        };

        let (first, second) = tokio::join!(slot.run(op), slot.run(op));

        assert!(first.is_succeeded());
        assert!(second.is_rejected());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_slot_can_run_again() {
        let slot = ActionSlot::new("test");
        slot.run(|| async { Err::<(), _>(Boom) }).await;

        let outcome = slot.run(|| async { Ok::<_, Boom>(()) }).await;

        assert!(outcome.is_succeeded());
        assert_eq!(slot.last_error(), None);
    }

    #[tokio::test]
    async fn test_reset_only_touches_settled_states() {
        let slot = ActionSlot::new("test");
        assert!(!slot.reset());

        slot.run(|| async { Ok::<_, Boom>(()) }).await;
        assert!(slot.reset());
        assert_eq!(slot.state(), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_reset_succeeded_leaves_failure_alone() {
        let slot = ActionSlot::new("test");
        slot.run(|| async { Err::<(), _>(Boom) }).await;

        assert!(!slot.reset_succeeded());
        assert_eq!(slot.state(), ActionState::Failed);

        slot.run(|| async { Ok::<_, Boom>(()) }).await;
        assert!(slot.reset_succeeded());
        assert_eq!(slot.state(), ActionState::Idle);
    }

    #[tokio::test]
    async fn test_dropped_run_does_not_stick_running() {
        let slot = ActionSlot::new("test");
        {
            let pending = slot.run(|| std::future::pending::<Result<(), Boom>>());
            tokio::pin!(pending);
            let polled = tokio::time::timeout(Duration::from_millis(5), &mut pending).await;
            assert!(polled.is_err());
            assert_eq!(slot.state(), ActionState::Running);
        }
        assert_eq!(slot.state(), ActionState::Failed);
        assert_eq!(slot.last_error(), Some(ActionError::Abandoned));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_guard_fails_hung_operation() {
        let slot = ActionSlot::new("test").with_timeout(Some(Duration::from_secs(3)));

        let outcome = slot
            .run(|| std::future::pending::<Result<(), Boom>>())
            .await;

        assert_eq!(
            outcome,
            RunOutcome::Failed(ActionError::TimedOut(Duration::from_secs(3)))
        );
        assert!(!slot.is_running());
    }
}
