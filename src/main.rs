use std::sync::Arc;
use storefront_shell::cart_badge::badge_label;
use storefront_shell::collaborators::memory::{
    HistoryNavigator, InMemoryAuthStore, InMemoryCartStore, SimulatedSubscriptionService,
};
use storefront_shell::collaborators::UserProfile;
use storefront_shell::config::ShellConfig;
use storefront_shell::runtime::{setup_tracing, Collaborators, StorefrontShell};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting storefront shell demo");

    let auth = Arc::new(
        InMemoryAuthStore::signed_in(UserProfile::new("alice", "alice@example.com"))
            .with_admin(true),
    );
    let cart = Arc::new(InMemoryCartStore::new());
    let navigator = Arc::new(HistoryNavigator::starting_at("/"));
    let subscriptions = Arc::new(SimulatedSubscriptionService::default());

    let shell = StorefrontShell::new(
        ShellConfig::default(),
        Collaborators {
            auth: auth.clone(),
            cart: cart.clone(),
            navigator: navigator.clone(),
            subscriptions: subscriptions.clone(),
        },
    );

    info!(controls = ?shell.session.account_controls(), "Account menu");

    // Cart badge follows the cart
    cart.add_item("sku-1", 2);
    cart.add_item("sku-2", 120);
    let count = shell.cart_badge.value();
    info!(count, label = ?badge_label(count), "Cart badge");

    // Search: the first submit is too short, the second navigates
    let span = tracing::info_span!("search");
    async {
        shell.search.on_query_change("a");
        let blocked = shell.search.submit().await;
        info!(?blocked, "Short search");

        shell.search.on_query_change("  trail shoes ");
        let outcome = shell.search.submit().await;
        info!(?outcome, location = ?navigator.current(), "Search");
    }
    .instrument(span)
    .await;

    // Newsletter: a double submit only reaches the service once
    let span = tracing::info_span!("newsletter");
    async {
        shell.subscription.on_email_change("alice@example.com");
        let (first, second) = tokio::join!(shell.subscription.submit(), shell.subscription.submit());
        info!(?first, ?second, subscribers = ?subscriptions.subscribers(), "Subscribe");
        info!(notification = ?shell.subscription.notification(), "Notification");
    }
    .instrument(span)
    .await;

    // Logout: fails once, then succeeds
    let span = tracing::info_span!("logout");
    async {
        auth.set_logout_failure(Some("session service timed out".to_string()));
        let failed = shell.session.logout().await;
        info!(?failed, location = ?navigator.current(), "Logout attempt");

        auth.set_logout_failure(None);
        let outcome = shell.session.logout().await;
        info!(?outcome, history = ?navigator.entries(), "Logout");
        info!(controls = ?shell.session.account_controls(), "Account menu");
    }
    .instrument(span)
    .await;

    shell.shutdown().await.map_err(|e| e.to_string())?;

    info!("Demo completed successfully");
    Ok(())
}
