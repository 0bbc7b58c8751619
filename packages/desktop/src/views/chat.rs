use dioxus::prelude::*;
use ui::views::{ChatIndexView, ChatView};

use crate::Route;

/// `/chat`: forwards to the latest thread, or to a new temporary chat.
#[component]
pub fn ChatIndex() -> Element {
    let nav = use_navigator();

    rsx! {
        ChatIndexView {
            on_open: move |chat_id: String| {
                nav.replace(Route::ChatRoom { chat_id });
            },
        }
    }
}

#[component]
pub fn ChatRoom(chat_id: String) -> Element {
    let nav = use_navigator();

    rsx! {
        ChatView {
            chat_id,
            on_open: move |chat_id: String| {
                nav.push(Route::ChatRoom { chat_id });
            },
        }
    }
}
