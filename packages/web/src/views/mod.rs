use dioxus::prelude::*;
use store::{Access, Protection};
use ui::use_auth;

use crate::Route;

mod layout;
pub use layout::AppLayout;

mod home;
pub use home::Home;

mod sign_in;
pub use sign_in::SignIn;

mod sign_up;
pub use sign_up::SignUp;

mod dashboard;
pub use dashboard::Dashboard;

mod workspace;
pub use workspace::WorkspaceDetail;

mod explore;
pub use explore::Explore;

mod settings;
pub use settings::Settings;

/// Resolve access for a view that needs a signed-in user, sending everyone else
/// to the sign-in page before anything is requested.
pub(crate) fn use_protected_access() -> Access {
    let auth = use_auth();
    let nav = use_navigator();

    let access = auth().access(Protection::Protected);
    if access == Access::RedirectToSignIn {
        nav.replace(Route::SignIn {});
    }
    access
}

#[component]
pub(crate) fn LoadingMessage() -> Element {
    rsx! {
        div { class: "status", "Loading..." }
    }
}
