use dioxus::prelude::*;
use ui::views::{HomeView, NotFoundView, ProfileView, SearchView};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    rsx! {
        HomeView {
            on_search: move |_| {
                nav.push(Route::PolicySearch {});
            },
            on_chat: move |_| {
                nav.push(Route::ChatIndex {});
            },
        }
    }
}

#[component]
pub fn PolicySearch() -> Element {
    rsx! { SearchView {} }
}

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();

    rsx! {
        ProfileView {
            on_search: move |_| {
                nav.push(Route::PolicySearch {});
            },
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    let path = format!("/{}", segments.join("/"));

    rsx! {
        NotFoundView {
            path,
            on_home: move |_| {
                nav.replace(Route::Home {});
            },
        }
    }
}
