use dioxus::prelude::*;
use ui::{use_session, LogoutButton, Navbar};

use crate::Route;

/// Navbar plus the routed page.
#[component]
pub fn AppLayout() -> Element {
    let session = use_session();
    let nav = use_navigator();
    let signed_in = session.read().is_authenticated();

    rsx! {
        Navbar {
            Link { to: Route::Home {}, "홈" }
            Link { to: Route::PolicySearch {}, "정책 검색" }
            Link { to: Route::ChatIndex {}, "AI 상담" }
            if signed_in {
                Link { to: Route::Profile {}, "내 프로필" }
                LogoutButton {
                    class: "link-button",
                    on_logout: move |_| {
                        nav.replace(Route::Home {});
                    },
                }
            } else {
                Link { to: Route::Login { redirect: String::new() }, "로그인" }
                Link { to: Route::Register {}, "회원가입" }
            }
        }
        main {
            class: "main-content",
            Outlet::<Route> {}
        }
    }
}
