use dioxus::prelude::*;
use domain::guard::{guest_access, protected_access};
use domain::GuardDecision;

use crate::use_session;

#[component]
pub fn LoadingView() -> Element {
    rsx! {
        div { class: "loading", "로딩 중..." }
    }
}

/// Renders `children` only for an authenticated user.
///
/// `requested` is the current path; it is handed to `on_login` so the login
/// view can come back to it.
#[component]
pub fn RequireSessionView(
    requested: String,
    on_login: EventHandler<String>,
    children: Element,
) -> Element {
    let session = use_session();
    let decision = protected_access(&session.read(), &requested);

    match decision {
        GuardDecision::Allow => rsx! { {children} },
        GuardDecision::ToLogin { from } => {
            tracing::debug!("Anonymous visit to {from}, redirecting to login");
            on_login.call(from);
            rsx! {}
        }
        GuardDecision::Wait | GuardDecision::ToHome => rsx! { LoadingView {} },
    }
}

/// Renders `children` only when nobody is logged in.
#[component]
pub fn GuestOnlyView(on_home: EventHandler<()>, children: Element) -> Element {
    let session = use_session();
    let decision = guest_access(&session.read());

    match decision {
        GuardDecision::Allow => rsx! { {children} },
        GuardDecision::ToHome => {
            on_home.call(());
            rsx! {}
        }
        GuardDecision::Wait | GuardDecision::ToLogin { .. } => rsx! { LoadingView {} },
    }
}
