#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront Shell
//!
//! > **The interaction layer behind a storefront's header and footer.**
//!
//! Search box, newsletter form, sign-out, cart badge: each is a small state
//! machine that reacts to UI events, calls into the app's data layer, and
//! publishes state for the rendering layer to draw. This crate holds those
//! state machines and nothing else. Layout, styling, and routing tables stay
//! with the UI.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Slots, not flags
//!
//! Every async action (search, subscribe, logout) runs inside an
//! [`ActionSlot`](framework::ActionSlot). The slot is the only place that
//! knows whether the action is running, so:
//! - **No double submits**: a second trigger while running is dropped.
//! - **No stuck spinners**: `Running` is cleared on every exit path.
//! - **No escaping errors**: failures are recorded on the slot and logged.
//!
//! ### Injected collaborators
//!
//! Auth, cart, router, and newsletter backend are traits in
//! [`collaborators`], handed to the controllers when the
//! [`StorefrontShell`](runtime::StorefrontShell) is built. There are no
//! global stores.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`], [`validation`])
//! - **Role**: Single-flight action lifecycle and the input predicates.
//! - **Key items**: [`ActionSlot`](framework::ActionSlot), [`is_valid_email`](validation::is_valid_email).
//!
//! ### 2. The Controllers ([`search`], [`subscription`], [`session`], [`cart_badge`])
//! - **Role**: One controller per widget. Each owns its draft text and slot.
//! - **Key items**: [`SearchController`](search::SearchController),
//!   [`SubscriptionController`](subscription::SubscriptionController),
//!   [`SessionActionController`](session::SessionActionController),
//!   [`DerivedBadgeCount`](cart_badge::DerivedBadgeCount).
//!
//! ### 3. The Interface ([`collaborators`])
//! - **Role**: What the controllers need from the rest of the app.
//! - **Key items**: [`AuthStore`](collaborators::AuthStore), [`CartStore`](collaborators::CartStore),
//!   [`Navigator`](collaborators::Navigator), [`SubscriptionService`](collaborators::SubscriptionService).
//!
//! ### 4. The Orchestrator ([`runtime`], [`config`])
//! - **Role**: Wiring, lifecycle, tracing setup, and settings.
//! - **Key items**: [`StorefrontShell`](runtime::StorefrontShell), [`ShellConfig`](config::ShellConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod cart_badge;
pub mod collaborators;
pub mod config;
pub mod framework;
pub mod runtime;
pub mod search;
pub mod session;
pub mod subscription;
pub mod validation;
