//! The signed-in user's workspaces, with a form to add one.

use dioxus::prelude::*;
use store::{Access, LoadState, Workspace, WorkspaceForm};
use ui::components::{Button, Input};
use ui::{alert, use_auth, use_store};

use super::{use_protected_access, LoadingMessage};
use crate::Route;

#[component]
pub fn Dashboard() -> Element {
    let auth = use_auth();
    let store = use_store();
    let mut workspaces = use_signal(LoadState::<Vec<Workspace>>::default);
    let mut form = use_signal(WorkspaceForm::default);
    let access = use_protected_access();

    // Load once the session is known
    let _loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            async move {
                let Some(user) = auth().user else {
                    return;
                };
                if !workspaces.write().begin() {
                    return;
                }
                let result = store.workspaces(&user.id).await;
                workspaces.set(LoadState::from_list(result, "workspaces"));
            }
        }
    });

    let handle_create = move |evt: FormEvent| {
        evt.prevent_default();
        let store = store.clone();
        spawn(async move {
            let Some(user) = auth().user else {
                return;
            };
            let Some(new_workspace) = form.read().submission(&user) else {
                return;
            };
            match store.create_workspace(new_workspace).await {
                Ok(created) => {
                    workspaces.write().push(created);
                    form.write().clear();
                }
                Err(e) => alert(&e.to_string()),
            }
        });
    };

    match access {
        Access::Granted(_) => {}
        Access::Pending => return rsx! { LoadingMessage {} },
        Access::Anonymous | Access::RedirectToSignIn => return rsx! {},
    }

    let items = workspaces.read().items().to_vec();

    rsx! {
        div {
            class: "container",
            h1 { "Your Workspaces" }

            form {
                class: "inline-form",
                onsubmit: handle_create,
                Input {
                    placeholder: "New Workspace Name",
                    value: form.read().name.clone(),
                    oninput: move |evt: FormEvent| form.write().name = evt.value(),
                }
                Button { r#type: "submit", "Create" }
            }

            if items.is_empty() {
                p { class: "muted", "You don't have any workspaces yet." }
            } else {
                ul {
                    class: "card-list",
                    for ws in items {
                        li {
                            key: "{ws.id}",
                            class: "card",
                            Link { to: Route::WorkspaceDetail { ws_id: ws.id.clone() }, "{ws.name}" }
                        }
                    }
                }
            }
        }
    }
}
