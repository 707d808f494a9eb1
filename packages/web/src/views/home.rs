//! Landing page: who is signed in, and where to go next.

use dioxus::prelude::*;
use store::{Access, Protection};
use ui::{use_auth, SignOutButton};

use super::LoadingMessage;
use crate::Route;

#[component]
pub fn Home() -> Element {
    let auth = use_auth();

    let session = match auth().access(Protection::Public) {
        Access::Pending => return rsx! { LoadingMessage {} },
        Access::Granted(user) => rsx! {
            p { class: "lead", "You are signed in as {user.display_name()}" }
            div {
                class: "actions",
                Link { class: "button button-primary", to: Route::Dashboard {}, "Go to Dashboard" }
                SignOutButton { class: "button button-danger" }
            }
        },
        Access::Anonymous | Access::RedirectToSignIn => rsx! {
            p { class: "lead", "You are not signed in." }
            div {
                class: "actions",
                Link { class: "button button-primary", to: Route::SignIn {}, "Sign In" }
                Link { class: "button button-secondary", to: Route::SignUp {}, "Sign Up" }
            }
        },
    };

    rsx! {
        div {
            class: "hero",
            h1 { "Welcome to Workbench" }
            {session}
        }
    }
}
