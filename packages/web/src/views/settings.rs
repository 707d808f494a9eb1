use dioxus::prelude::*;
use store::{Access, LoadState, Profile, ProfileField};
use ui::components::{Button, Input};
use ui::{alert, use_auth, use_store};

use super::{use_protected_access, LoadingMessage};

#[component]
pub fn Settings() -> Element {
    let auth = use_auth();
    let store = use_store();
    let mut profile = use_signal(LoadState::<Profile>::default);
    let access = use_protected_access();

    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                let Some(user) = auth().user else {
                    return;
                };
                if !profile.write().begin() {
                    return;
                }
                let result = store.profile(&user.id).await;
                profile.set(LoadState::from_item(result, "profile"));
            }
        }
    });

    // The whole record goes out, edited or not; local edits survive a failure
    let handle_update = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            let Some(user) = auth().user else {
                return;
            };
            let Some(current) = profile.read().get().cloned() else {
                return;
            };
            match store.update_profile(&user.id, &current).await {
                Ok(()) => alert("Profile updated successfully!"),
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    match access {
        Access::Granted(_) => {}
        Access::Pending => return rsx! { LoadingMessage {} },
        Access::Anonymous | Access::RedirectToSignIn => return rsx! {},
    }
    if profile.read().is_pending() {
        return rsx! { LoadingMessage {} };
    }
    let current = profile.read().get().cloned();

    rsx! {
        div {
            class: "container",
            h1 { "Your Settings" }

            if let Some(current) = current {
                form {
                    class: "stack",
                    onsubmit: handle_update,

                    for field in ProfileField::ALL {
                        div {
                            key: "{field.name()}",
                            class: "field",
                            label { r#for: "{field.name()}", "{field.label()}" }
                            Input {
                                id: field.name().to_string(),
                                value: current.field(field).to_string(),
                                oninput: move |evt: FormEvent| {
                                    if let Some(editing) = profile.write().get_mut() {
                                        editing.set_field(field, evt.value());
                                    }
                                },
                            }
                        }
                    }

                    Button { r#type: "submit", "Update Profile" }
                }
            }
        }
    }
}
