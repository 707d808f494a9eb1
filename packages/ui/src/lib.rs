//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub mod components;

mod alert;
pub use alert::alert;

mod backend;
pub use backend::{AppStore, ServerBackend};

mod auth;
pub use auth::{use_auth, use_store, AuthProvider, AuthState, SignOutButton};

mod navbar;
pub use navbar::Navbar;
