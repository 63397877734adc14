//! What the account corner of the header shows, derived from the [`AuthStore`].
//!
//! Nothing here is stored; call [`account_controls`] whenever the store changes.

use crate::collaborators::AuthStore;
use serde::Serialize;

const FALLBACK_NAME: &str = "User";
const FALLBACK_INITIAL: char = 'U';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccountControls {
    /// The session is still being resolved.
    Loading,
    /// Login and sign-up entry points.
    Guest,
    SignedIn(AccountSummary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountSummary {
    /// Avatar letter.
    pub initial: char,
    pub display_name: String,
    pub email: Option<String>,
    pub show_admin_entry: bool,
}

pub fn account_controls(auth: &dyn AuthStore) -> AccountControls {
    if auth.is_loading() {
        return AccountControls::Loading;
    }
    if !auth.is_authenticated() {
        return AccountControls::Guest;
    }

    let user = auth.current_user();
    let name = user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .filter(|name| !name.is_empty());
    let initial = name
        .and_then(|name| name.chars().next())
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or(FALLBACK_INITIAL);

    AccountControls::SignedIn(AccountSummary {
        initial,
        display_name: name.unwrap_or(FALLBACK_NAME).to_string(),
        email: user.as_ref().and_then(|u| u.email.clone()),
        show_admin_entry: auth.is_admin(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::mock::MockAuthStore;
    use crate::collaborators::UserProfile;

    #[test]
    fn test_loading_wins() {
        let auth = MockAuthStore::signed_in(UserProfile::new("alice", "a@b")).with_loading(true);
        assert_eq!(account_controls(&auth), AccountControls::Loading);
    }

    #[test]
    fn test_guest() {
        assert_eq!(account_controls(&MockAuthStore::guest()), AccountControls::Guest);
    }

    #[test]
    fn test_signed_in_summary() {
        let auth = MockAuthStore::signed_in(UserProfile::new("alice", "alice@example.com"))
            .with_admin(true);

        let AccountControls::SignedIn(summary) = account_controls(&auth) else {
            panic!("expected signed-in controls");
        };
        assert_eq!(summary.initial, 'A');
        assert_eq!(summary.display_name, "alice");
        assert_eq!(summary.email.as_deref(), Some("alice@example.com"));
        assert!(summary.show_admin_entry);
    }

    #[test]
    fn test_nameless_user_falls_back() {
        let auth = MockAuthStore::signed_in(UserProfile {
            name: Some(String::new()),
            email: None,
        });

        let AccountControls::SignedIn(summary) = account_controls(&auth) else {
            panic!("expected signed-in controls");
        };
        assert_eq!(summary.initial, 'U');
        assert_eq!(summary.display_name, "User");
        assert_eq!(summary.email, None);
        assert!(!summary.show_admin_entry);
    }
}
