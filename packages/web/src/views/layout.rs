use dioxus::prelude::*;
use ui::icons::{FaCompass, FaGear, FaTableColumns};
use ui::{Icon, Navbar};

use crate::Route;

/// Navigation bar above every page.
#[component]
pub fn AppLayout() -> Element {
    rsx! {
        Navbar {
            div {
                class: "navbar-inner",
                Link { class: "navbar-brand", to: Route::Home {}, "Workbench" }
                div {
                    class: "navbar-links",
                    Link {
                        to: Route::Dashboard {},
                        Icon { icon: FaTableColumns, width: 14, height: 14 }
                        span { "Dashboard" }
                    }
                    Link {
                        to: Route::Explore {},
                        Icon { icon: FaCompass, width: 14, height: 14 }
                        span { "Explore" }
                    }
                    Link {
                        to: Route::Settings {},
                        Icon { icon: FaGear, width: 14, height: 14 }
                        span { "Settings" }
                    }
                }
            }
        }
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
