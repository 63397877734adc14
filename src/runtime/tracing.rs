//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter
//! filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Slot transitions**: `Running` at debug, `Succeeded` at info,
//!   `Failed` and `Rejected` at warn. Every event carries `slot=<name>`.
//! - **Controller triggers**: `submit` / `logout` spans wrap the slot events.
//! - **Contained failures**: subscription and logout failures are only ever
//!   visible here, as `warn` events with the error rendered.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=storefront_shell=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a search followed by a failed logout reads:
//!
//! ```text
//! INFO submit: Succeeded slot="search"
//! INFO submit: Search submitted term=boots
//! WARN logout: Failed slot="logout" error=Operation failed: Logout failed: timeout
//! WARN logout: Logout failed, staying on current route error=...
//! ```

/// Initializes the tracing subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
