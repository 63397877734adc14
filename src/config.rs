//! # Shell Configuration
//!
//! Routes, limits, and timings the controllers depend on. Every field has a
//! default, so a host only needs to override what it changes:
//!
//! ```rust
//! use storefront_shell::config::ShellConfig;
//!
//! let config = ShellConfig {
//!     notification_ms: 2500,
//!     ..ShellConfig::default()
//! };
//! assert_eq!(config.products_route, "/products");
//! ```
//!
//! `ShellConfig` also implements `serde::Deserialize`, so it can be read
//! from whatever format the host app already uses for settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Route the search form navigates to.
    pub products_route: String,
    /// Query-string parameter carrying the search term.
    pub search_param: String,
    /// Route shown after a successful logout.
    pub landing_route: String,
    /// Minimum trimmed length of a search term.
    pub min_search_len: usize,
    /// Lifetime of the subscription notification.
    pub notification_ms: u64,
    pub subscription_success_message: String,
    /// Upper bound for every async action. `None` waits indefinitely.
    pub action_timeout_ms: Option<u64>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            products_route: "/products".to_string(),
            search_param: "search".to_string(),
            landing_route: "/".to_string(),
            min_search_len: crate::validation::MIN_SEARCH_LEN,
            notification_ms: 4000,
            subscription_success_message: "Successfully subscribed to our newsletter!".to_string(),
            action_timeout_ms: None,
        }
    }
}

impl ShellConfig {
    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn action_timeout(&self) -> Option<Duration> {
        self.action_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        assert_eq!(config.search_param, "search");
        assert_eq!(config.landing_route, "/");
        assert_eq!(config.min_search_len, 2);
        assert_eq!(config.notification_lifetime(), Duration::from_millis(4000));
        assert_eq!(config.action_timeout(), None);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config: ShellConfig =
            serde_json::from_str(r#"{ "notification_ms": 1500, "action_timeout_ms": 10000 }"#)
                .unwrap();
        assert_eq!(config.notification_lifetime(), Duration::from_millis(1500));
        assert_eq!(config.action_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.products_route, "/products");
    }
}
