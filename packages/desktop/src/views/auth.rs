use dioxus::prelude::*;
use domain::guard::post_login_target;
use ui::views::{LoginView, RegisterView};

use crate::Route;

#[component]
pub fn Login(redirect: String) -> Element {
    let nav = use_navigator();

    let on_success = move |_| {
        let target = post_login_target(&redirect)
            .parse::<Route>()
            .unwrap_or(Route::Home {});
        tracing::info!("Logged in, continuing to {target}");
        nav.replace(target);
    };

    rsx! {
        LoginView {
            on_success: on_success,
            on_register: move |_| {
                nav.push(Route::Register {});
            },
        }
    }
}

#[component]
pub fn Register() -> Element {
    let nav = use_navigator();

    rsx! {
        RegisterView {
            on_registered: move |_| {
                nav.replace(Route::Login { redirect: String::new() });
            },
            on_login: move |_| {
                nav.push(Route::Login { redirect: String::new() });
            },
        }
    }
}
