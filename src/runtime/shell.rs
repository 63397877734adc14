use super::ShellError;
use crate::cart_badge::DerivedBadgeCount;
use crate::collaborators::{AuthStore, CartStore, Navigator, SubscriptionService};
use crate::config::ShellConfig;
use crate::search::SearchController;
use crate::session::SessionActionController;
use crate::subscription::SubscriptionController;
use std::sync::Arc;
use tracing::{error, info};

/// The data layer the shell is wired to.
///
/// Each collaborator is shared: the host app keeps its own handles and the
/// controllers only ever read from them or call their commands.
#[derive(Clone)]
pub struct Collaborators {
    pub auth: Arc<dyn AuthStore>,
    pub cart: Arc<dyn CartStore>,
    pub navigator: Arc<dyn Navigator>,
    pub subscriptions: Arc<dyn SubscriptionService>,
}

/// The header/footer interaction layer, fully wired.
///
/// `StorefrontShell` is responsible for:
/// - **Wiring**: handing each controller the collaborators it needs
/// - **Lifecycle**: one shell per app session, created at start and shut down at exit
///
/// # Example
///
/// ```ignore
/// let shell = StorefrontShell::new(ShellConfig::default(), collaborators);
///
/// shell.search.on_query_change("boots");
/// shell.search.submit().await;
///
/// shell.shutdown().await?;
/// ```
pub struct StorefrontShell {
    /// Header search box
    pub search: SearchController,

    /// Footer newsletter form
    pub subscription: SubscriptionController,

    /// Account menu and sign-out
    pub session: SessionActionController,

    /// Cart icon count
    pub cart_badge: DerivedBadgeCount,

    config: ShellConfig,
}

impl StorefrontShell {
    pub fn new(config: ShellConfig, collaborators: Collaborators) -> Self {
        let Collaborators {
            auth,
            cart,
            navigator,
            subscriptions,
        } = collaborators;

        let search = SearchController::new(navigator.clone(), &config);
        let subscription = SubscriptionController::new(subscriptions, &config);
        let session = SessionActionController::new(auth, navigator, &config);
        let cart_badge = DerivedBadgeCount::new(cart);

        info!(
            products_route = %config.products_route,
            landing_route = %config.landing_route,
            timeout_ms = ?config.action_timeout_ms,
            "Storefront shell started"
        );

        Self {
            search,
            subscription,
            session,
            cart_badge,
            config,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Tears the shell down.
    ///
    /// Cancels a pending notification timer and waits for it to stop.
    /// In-flight actions are not cancelled; callers await their own triggers.
    pub async fn shutdown(self) -> Result<(), ShellError> {
        info!("Shutting down storefront shell...");

        if let Err(e) = self.subscription.shutdown().await {
            error!(error = %e, "Notification timer failed");
            return Err(ShellError::TaskFailed(e.to_string()));
        }

        info!("Storefront shell shutdown complete.");
        Ok(())
    }
}
