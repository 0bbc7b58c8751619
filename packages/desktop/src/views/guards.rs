use dioxus::prelude::*;
use ui::views::{GuestOnlyView, RequireSessionView};

use crate::Route;

/// Layout for pages that need a logged-in user.
#[component]
pub fn RequireSession() -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();

    rsx! {
        RequireSessionView {
            requested: route.to_string(),
            on_login: move |from: String| {
                nav.replace(Route::Login { redirect: from });
            },
            Outlet::<Route> {}
        }
    }
}

/// Layout for the login and register pages.
#[component]
pub fn GuestOnly() -> Element {
    let nav = use_navigator();

    rsx! {
        GuestOnlyView {
            on_home: move |_| {
                nav.replace(Route::Home {});
            },
            Outlet::<Route> {}
        }
    }
}
