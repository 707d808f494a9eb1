//! Authentication context and hooks for the UI.

use dioxus::prelude::*;
use store::{Access, Protection, SessionUser};

use crate::backend::{AppStore, ServerBackend};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }

    /// What a view with the given protection may do right now.
    pub fn access(&self, protection: Protection) -> Access {
        store::access::resolve(self.loading, self.user.as_ref(), protection)
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user signs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the shared store.
pub fn use_store() -> AppStore {
    use_context::<AppStore>()
}

/// Provider component that owns the store and the authentication state.
/// Wrap your app with this component.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let store = use_context_provider(|| AppStore::new(ServerBackend));
    let mut auth_state = use_signal(AuthState::default);

    // Resolve the session once on mount
    let _ = use_resource(move || {
        let store = store.clone();
        async move {
            let user = match store.current_user().await {
                Ok(user) => user,
                Err(e) => {
                    tracing::error!("Error fetching session: {}", e);
                    None
                }
            };
            auth_state.set(AuthState {
                user,
                loading: false,
            });
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button that ends the session and clears everything cached for it.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign Out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let store = use_store();

    let onclick = move |_| {
        let store = store.clone();
        async move {
            store.sign_out().await;
            auth_state.set(AuthState::signed_out());
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: "user-1".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    #[test]
    fn test_initial_state_is_pending_everywhere() {
        let state = AuthState::default();
        assert_eq!(state.access(Protection::Protected), Access::Pending);
        assert_eq!(state.access(Protection::Public), Access::Pending);
    }

    #[test]
    fn test_signed_out_state_redirects_protected_views() {
        let state = AuthState::signed_out();
        assert_eq!(state.access(Protection::Protected), Access::RedirectToSignIn);
        assert_eq!(state.access(Protection::Public), Access::Anonymous);
    }

    #[test]
    fn test_signed_in_state_grants() {
        let state = AuthState::signed_in(user());
        assert_eq!(state.access(Protection::Protected), Access::Granted(user()));
    }
}
