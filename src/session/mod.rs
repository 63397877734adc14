//! # Session Actions
//!
//! The "Sign Out" entry of the account menu.
//!
//! A successful logout navigates to the landing route and *replaces* the
//! current history entry, so Back cannot return to the authenticated view.
//! A failed logout is logged and nothing else happens: the user stays on
//! the current route, because the session may still be alive.

pub mod account;

pub use account::*;

use crate::collaborators::{AuthStore, NavigationRequest, Navigator};
use crate::config::ShellConfig;
use crate::framework::{ActionSlot, ActionState, RunOutcome, SubmitOutcome};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

pub struct SessionActionController {
    auth: Arc<dyn AuthStore>,
    navigator: Arc<dyn Navigator>,
    slot: ActionSlot,
    landing_route: String,
}

impl SessionActionController {
    pub fn new(
        auth: Arc<dyn AuthStore>,
        navigator: Arc<dyn Navigator>,
        config: &ShellConfig,
    ) -> Self {
        Self {
            auth,
            navigator,
            slot: ActionSlot::new("logout").with_timeout(config.action_timeout()),
            landing_route: config.landing_route.clone(),
        }
    }

    pub fn state(&self) -> ActionState {
        self.slot.state()
    }

    pub fn watch(&self) -> watch::Receiver<ActionState> {
        self.slot.watch()
    }

    pub fn slot(&self) -> &ActionSlot {
        &self.slot
    }

    pub fn account_controls(&self) -> AccountControls {
        account_controls(self.auth.as_ref())
    }

    /// Sign-out click.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> SubmitOutcome {
        let auth = &self.auth;
        let outcome = self.slot.run(|| auth.logout()).await;

        match &outcome {
            RunOutcome::Succeeded(()) => {
                self.navigator
                    .go_to(NavigationRequest::to(self.landing_route.as_str()).replacing_history());
                self.slot.reset();
                info!(route = %self.landing_route, "Logged out");
            }
            RunOutcome::Failed(e) => {
                warn!(error = %e, "Logout failed, staying on current route");
            }
            RunOutcome::Rejected => {}
        }
        outcome.into()
    }
}
