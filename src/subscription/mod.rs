//! # Newsletter Subscription
//!
//! The footer's opt-in form.
//!
//! ```text
//! submit ─▶ email valid? ──no──▶ nothing happens, slot stays Idle
//!                │
//!               yes
//!                ▼
//!      slot.run(subscribe(email))
//!        ├─ Succeeded ─▶ clear draft, show success notification (4 s)
//!        └─ Failed ────▶ log only, no notification
//! ```
//!
//! The notification disappears when its lifetime elapses or when the user
//! dismisses it, whichever comes first. Either way a `Succeeded` slot
//! returns to `Idle`; a later failure stays visible.

pub mod notification;

pub use notification::*;

use crate::collaborators::SubscriptionService;
use crate::config::ShellConfig;
use crate::framework::{ActionSlot, ActionState, RunOutcome, SubmitOutcome};
use crate::validation::check_email;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{debug, info, instrument, warn};

pub struct SubscriptionController {
    service: Arc<dyn SubscriptionService>,
    email: Mutex<String>,
    slot: Arc<ActionSlot>,
    notifications: Arc<NotificationCenter>,
    lifetime: Duration,
    success_message: String,
}

impl SubscriptionController {
    pub fn new(service: Arc<dyn SubscriptionService>, config: &ShellConfig) -> Self {
        Self {
            service,
            email: Mutex::new(String::new()),
            slot: Arc::new(ActionSlot::new("subscribe").with_timeout(config.action_timeout())),
            notifications: Arc::new(NotificationCenter::new()),
            lifetime: config.notification_lifetime(),
            success_message: config.subscription_success_message.clone(),
        }
    }

    pub fn on_email_change(&self, text: impl Into<String>) {
        *self.email.lock().unwrap_or_else(PoisonError::into_inner) = text.into();
    }

    pub fn email(&self) -> String {
        self.email
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

    /// The slot, for observing `last_error` after a silent failure.
    pub fn slot(&self) -> &ActionSlot {
        &self.slot
    }

    pub fn notification(&self) -> Option<NotificationState> {
        self.notifications.current()
    }

    pub fn notifications(&self) -> watch::Receiver<Option<NotificationState>> {
        self.notifications.watch()
    }

    /// Whether the Subscribe button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.slot.is_running() && !self.email().is_empty()
    }

    /// Submit event.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let email = self.email();
        if let Err(e) = check_email(&email) {
            debug!(error = %e, "Subscription blocked");
            return SubmitOutcome::Invalid(e);
        }

        let service = &self.service;
        let outcome = self.slot.run(|| service.subscribe(&email)).await;

        match &outcome {
            RunOutcome::Succeeded(()) => {
                self.on_email_change(String::new());
                let shown = self.notifications.publish(
                    self.success_message.as_str(),
                    NotificationKind::Success,
                    self.lifetime,
                );
                self.arm_expiry(shown.id);
                info!(notification_id = shown.id, "Subscribed to newsletter");
            }
            RunOutcome::Failed(e) => {
                warn!(error = %e, "Newsletter subscription failed");
            }
            RunOutcome::Rejected => {}
        }
        outcome.into()
    }

    /// Explicit close of the notification.
    pub fn dismiss_notification(&self) -> bool {
        if let Some(timer) = self.notifications.take_timer() {
            timer.abort();
        }
        let dismissed = self.notifications.dismiss();
        if dismissed {
            debug!("Notification dismissed");
            self.slot.reset_succeeded();
        }
        dismissed
    }

    /// Cancels a pending expiry timer and waits for it to stop.
    pub async fn shutdown(&self) -> Result<(), JoinError> {
        let Some(timer) = self.notifications.take_timer() else {
            return Ok(());
        };
        timer.abort();
        match timer.await {
            Err(e) if !e.is_cancelled() => Err(e),
            _ => Ok(()),
        }
    }

    fn arm_expiry(&self, id: u64) {
        let notifications = Arc::clone(&self.notifications);
        let slot = Arc::clone(&self.slot);
        let lifetime = self.lifetime;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            if notifications.clear_if(id) {
                debug!(notification_id = id, "Notification expired");
                slot.reset_succeeded();
            }
        });
        self.notifications.replace_timer(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::mock::MockSubscriptionService;
    use crate::collaborators::SubscriptionError;
    use crate::framework::ActionError;
    use crate::validation::ValidationError;

    fn controller(mock: &Arc<MockSubscriptionService>) -> SubscriptionController {
        SubscriptionController::new(mock.clone(), &ShellConfig::default())
    }

    #[tokio::test]
    async fn test_invalid_email_never_runs() {
        let mock = Arc::new(MockSubscriptionService::new());
        let subscription = controller(&mock);
        subscription.on_email_change("not-an-email");

        let outcome = subscription.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid(ValidationError::MalformedEmail));
        assert_eq!(subscription.state(), ActionState::Idle);
        assert_eq!(mock.call_count(), 0);
        assert_eq!(subscription.email(), "not-an-email");
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_clears_draft_and_notifies() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe().with_email("a@b.co").return_ok();
        let subscription = controller(&mock);
        subscription.on_email_change("a@b.co");

        let outcome = subscription.submit().await;

        assert_eq!(outcome, SubmitOutcome::Completed);
        assert_eq!(subscription.email(), "");
        let shown = subscription.notification().expect("notification shown");
        assert!(shown.visible);
        assert_eq!(shown.kind, NotificationKind::Success);
        assert_eq!(shown.expires_after_ms, 4000);
        assert_eq!(shown.message, "Successfully subscribed to our newsletter!");
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_expires_and_slot_resets() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe().return_ok();
        let subscription = controller(&mock);
        subscription.on_email_change("a@b");

        subscription.submit().await;
        assert_eq!(subscription.state(), ActionState::Succeeded);

        tokio::time::sleep(Duration::from_millis(3999)).await;
        assert!(subscription.notification().is_some());

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(subscription.notification(), None);
        assert_eq!(subscription.state(), ActionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_silent() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe()
            .return_err(SubscriptionError::Unavailable("503".into()));
        let subscription = controller(&mock);
        subscription.on_email_change("a@b");

        let outcome = subscription.submit().await;

        let expected = ActionError::Operation("Subscription service unavailable: 503".into());
        assert_eq!(outcome, SubmitOutcome::Failed(expected.clone()));
        assert_eq!(subscription.notification(), None);
        assert_eq!(subscription.email(), "a@b");
        assert_eq!(subscription.state(), ActionState::Failed);
        assert_eq!(subscription.slot().last_error(), Some(expected));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_then_resubscribe_starts_fresh() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe().return_ok();
        mock.expect_subscribe().return_ok();
        let subscription = controller(&mock);

        subscription.on_email_change("a@b");
        subscription.submit().await;
        let first = subscription.notification().unwrap();

        assert!(subscription.dismiss_notification());
        assert_eq!(subscription.notification(), None);
        assert_eq!(subscription.state(), ActionState::Idle);

        subscription.on_email_change("c@d");
        subscription.submit().await;
        let second = subscription.notification().unwrap();
        assert_ne!(first.id, second.id);

        // The second notification lives its full lifetime from its own start.
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(subscription.notification().map(|n| n.id), Some(second.id));
        tokio::time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(subscription.notification(), None);
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_success_survives_old_notification_expiry() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe().return_ok();
        mock.expect_subscribe()
            .return_err(SubscriptionError::Unavailable("503".into()));
        let subscription = controller(&mock);

        subscription.on_email_change("a@b");
        subscription.submit().await;
        tokio::time::sleep(Duration::from_millis(1000)).await;

        subscription.on_email_change("c@d");
        assert!(matches!(subscription.submit().await, SubmitOutcome::Failed(_)));

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(subscription.notification(), None);
        assert_eq!(subscription.state(), ActionState::Failed);
        assert!(subscription.slot().last_error().is_some());
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_after_success_survives_dismiss() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe().return_ok();
        mock.expect_subscribe()
            .return_err(SubscriptionError::Unavailable("503".into()));
        let subscription = controller(&mock);

        subscription.on_email_change("a@b");
        subscription.submit().await;
        subscription.on_email_change("c@d");
        subscription.submit().await;

        assert!(subscription.dismiss_notification());
        assert_eq!(subscription.state(), ActionState::Failed);
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_can_submit_tracks_draft_and_running() {
        let mock = Arc::new(MockSubscriptionService::new());
        mock.expect_subscribe()
            .after(Duration::from_millis(1000))
            .return_ok();
        let subscription = controller(&mock);
        assert!(!subscription.can_submit());

        subscription.on_email_change("a@b");
        assert!(subscription.can_submit());

        let mut states = subscription.watch();
        let (outcome, disabled_while_running) = tokio::join!(subscription.submit(), async {
            states.changed().await.unwrap();
            !subscription.can_submit()
        });

        assert!(outcome.is_completed());
        assert!(disabled_while_running);
    }
}
