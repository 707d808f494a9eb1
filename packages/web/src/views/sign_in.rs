//! Sign-in page with email/password form.

use dioxus::prelude::*;
use ui::components::{Button, Input};
use ui::{use_auth, use_store, AuthState};

use crate::Route;

#[component]
pub fn SignIn() -> Element {
    let mut auth = use_auth();
    let store = use_store();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already signed in
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_sign_in = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            error.set(None);
            loading.set(true);

            match store.sign_in(email().trim(), &password()).await {
                Ok(user) => {
                    auth.set(AuthState::signed_in(user));
                    nav.push(Route::Dashboard {});
                }
                Err(e) => {
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "auth-card",
            h1 { "Sign In" }

            form {
                class: "stack",
                onsubmit: handle_sign_in,

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
                    if loading() { "Signing in..." } else { "Sign In" }
                }
            }

            p {
                class: "muted",
                "Don't have an account? "
                Link { to: Route::SignUp {}, "Sign up" }
            }
        }
    }
}
