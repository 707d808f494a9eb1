//! Every public project, signed in or not.

use dioxus::prelude::*;
use store::{LoadState, PublicProject};
use ui::use_store;

use super::LoadingMessage;

#[component]
pub fn Explore() -> Element {
    let store = use_store();
    let mut projects = use_signal(LoadState::<Vec<PublicProject>>::default);

    let _loader = use_resource(move || {
        let store = store.clone();
        async move {
            if !projects.write().begin() {
                return;
            }
            let result = store.public_projects().await;
            projects.set(LoadState::from_list(result, "public projects"));
        }
    });

    if projects.read().is_pending() {
        return rsx! { LoadingMessage {} };
    }
    let items = projects.read().items().to_vec();

    rsx! {
        div {
            class: "container",
            h1 { "Explore Public Projects" }

            if items.is_empty() {
                p { class: "muted", "There are no public projects to display yet." }
            } else {
                div {
                    class: "card-grid",
                    for project in items {
                        div {
                            key: "{project.id}",
                            class: "card",
                            h3 { "{project.name}" }
                            p { class: "muted small", "by {project.author_label()}" }
                            p { {project.description.clone().unwrap_or_default()} }
                        }
                    }
                }
            }
        }
    }
}
