//! One workspace: its projects and a form to add one.

use dioxus::prelude::*;
use store::{Access, LoadState, Project, ProjectForm, Visibility, Workspace};
use ui::components::{Button, Input, Select};
use ui::{alert, use_auth, use_store};

use super::{use_protected_access, LoadingMessage};

#[component]
pub fn WorkspaceDetail(ws_id: String) -> Element {
    let auth = use_auth();
    let store = use_store();
    let mut workspace = use_signal(LoadState::<Workspace>::default);
    let mut projects = use_signal(LoadState::<Vec<Project>>::default);
    let mut form = use_signal(ProjectForm::default);
    let access = use_protected_access();

    // Track the route param in a signal so the loaders re-run when it changes
    let mut ws_signal = use_signal(|| ws_id.clone());
    if *ws_signal.peek() != ws_id {
        ws_signal.set(ws_id.clone());
        workspace.set(LoadState::Unloaded);
        projects.set(LoadState::Unloaded);
        form.set(ProjectForm::default());
    }

    // The workspace and its projects load independently
    let _workspace_loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            let id = ws_signal();
            async move {
                if auth().user.is_none() || !workspace.write().begin() {
                    return;
                }
                let result = store.workspace(&id).await;
                workspace.set(LoadState::from_item(result, "workspace"));
            }
        }
    });

    let _projects_loader = use_resource({
        let store = store.clone();
        move || {
            let store = store.clone();
            let id = ws_signal();
            async move {
                if auth().user.is_none() || !projects.write().begin() {
                    return;
                }
                let result = store.projects(&id).await;
                projects.set(LoadState::from_list(result, "projects"));
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
            let Some(new_project) = form.read().submission(&ws_signal.peek(), &user) else {
                return;
            };
            match store.create_project(new_project).await {
                Ok(created) => {
                    projects.write().push(created);
                    form.write().reset();
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

    // Nothing renders until the workspace itself is known
    let Some(current) = workspace.read().get().cloned() else {
        return rsx! { LoadingMessage {} };
    };
    let items = projects.read().items().to_vec();
    let visibility_options: Vec<(String, String)> = Visibility::ALL
        .iter()
        .map(|v| (v.as_str().to_string(), v.label().to_string()))
        .collect();

    rsx! {
        div {
            class: "container",
            h1 { "{current.name}" }

            section {
                h2 { "Create New Project" }
                form {
                    class: "stack",
                    onsubmit: handle_create,

                    label { r#for: "project-name", "Name" }
                    Input {
                        id: "project-name",
                        placeholder: "Project Name",
                        value: form.read().name.clone(),
                        oninput: move |evt: FormEvent| form.write().name = evt.value(),
                    }

                    label { r#for: "project-description", "Description" }
                    textarea {
                        id: "project-description",
                        class: "input",
                        placeholder: "Project Description",
                        value: "{form.read().description}",
                        oninput: move |evt: FormEvent| form.write().description = evt.value(),
                    }

                    label { r#for: "project-visibility", "Visibility" }
                    Select {
                        id: "project-visibility",
                        options: visibility_options,
                        value: form.read().visibility.as_str().to_string(),
                        onchange: move |evt: FormEvent| {
                            match evt.value().parse::<Visibility>() {
                                Ok(visibility) => form.write().visibility = visibility,
                                Err(e) => tracing::warn!("{}", e),
                            }
                        },
                    }

                    Button { r#type: "submit", "Create Project" }
                }
            }

            section {
                h2 { "Projects" }
                if items.is_empty() {
                    p { class: "muted", "This workspace doesn't have any projects yet." }
                } else {
                    ul {
                        class: "card-list",
                        for project in items {
                            li {
                                key: "{project.id}",
                                class: "card",
                                h3 { "{project.name}" }
                                p { {project.description.clone().unwrap_or_default()} }
                                p { class: "muted small", "Visibility: {project.visibility}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
