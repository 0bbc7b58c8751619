use dioxus::prelude::*;

use crate::{use_api, use_session};

/// Top bar. Platforms pass their router links as children.
#[component]
pub fn Navbar(children: Element) -> Element {
    rsx! {
        nav {
            class: "navbar",
            div { class: "navbar-brand", "🏛️ 고용노동 정책 어시스턴트" }
            div { class: "navbar-links", {children} }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "로그아웃".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logout: EventHandler<()>,
) -> Element {
    let mut session = use_session();
    let api = use_api();

    let onclick = move |_| {
        domain::session::logout(&api, &mut session.write());
        tracing::info!("Logged out");
        on_logout.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
