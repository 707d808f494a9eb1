use dioxus::prelude::*;

/// Top bar; the app supplies the links.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            {children}
        }
    }
}
