//! Sign-up page with email/password form.

use dioxus::prelude::*;
use store::SignUpOutcome;
use ui::components::{Button, Input};
use ui::{use_auth, use_store, AuthState};

use crate::Route;

#[component]
pub fn SignUp() -> Element {
    let mut auth = use_auth();
    let store = use_store();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut awaiting_confirmation = use_signal(|| false);
    let mut loading = use_signal(|| false);

    // Already signed in
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_sign_up = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);

            match store.sign_up(email().trim(), &password()).await {
                Ok(SignUpOutcome::SignedIn(user)) => {
                    auth.set(AuthState::signed_in(user));
                    nav.push(Route::Dashboard {});
                }
                Ok(SignUpOutcome::ConfirmationRequired) => {
                    awaiting_confirmation.set(true);
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    if awaiting_confirmation() {
        return rsx! {
            div {
                class: "auth-card",
                h1 { "Check your email" }
                p { "We sent a confirmation link to {email().trim()}. Follow it, then sign in." }
                Link { to: Route::SignIn {}, "Go to Sign In" }
            }
        };
    }

    rsx! {
        div {
            class: "auth-card",
            h1 { "Sign Up" }

            form {
                class: "stack",
                onsubmit: handle_sign_up,

                if let Some(err) = error() {
                    div { class: "form-error", "{err}" }
                }

                Input {
                    r#type: "email",
                    placeholder: "Email",
                    required: true,
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }

                Input {
                    r#type: "password",
                    placeholder: "Password",
                    required: true,
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                Button {
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign Up" }
                }
            }

            p {
                class: "muted",
                "Already have an account? "
                Link { to: Route::SignIn {}, "Sign in" }
            }
        }
    }
}
