//! Chat assistant: thread list, transcript and message input.
//!
//! The [`ChatSession`] lives in a signal owned by [`ChatView`]; every backend
//! call runs in a spawned task and folds its result back with one write, so
//! the signal is never borrowed across an await.

use api::{ChatBackend, Sender, Source};
use dioxus::prelude::*;
use domain::chat::{self, Delivery, Entry, TranscriptEntry};
use domain::time::{calendar_date, clock_time};
use domain::{ChatSession, ThreadMode, TEMPORARY_MARKER};

use crate::{use_api, LoadingDots};

use super::LoadingView;

/// `/chat` without a thread: pick one and hand its id to `on_open`.
#[component]
pub fn ChatIndexView(on_open: EventHandler<String>) -> Element {
    let api = use_api();

    let _pick = use_resource(move || {
        let api = api.clone();
        async move {
            let threads = api.list_threads().await;
            on_open.call(chat::index_target(&threads));
        }
    });

    rsx! { LoadingView {} }
}

fn thread_class(active: bool) -> &'static str {
    if active {
        "thread-item active"
    } else {
        "thread-item"
    }
}

#[component]
fn SourceList(sources: Vec<Source>) -> Element {
    let rows = sources.into_iter().map(|s| {
        let score = s.similarity.map(|v| format!(" ({:.0}%)", v * 100.0));
        (s.page, score, s.text)
    });

    rsx! {
        div {
            class: "message-sources",
            h4 { "참고 자료" }
            ul {
                for (page, score, text) in rows {
                    li {
                        span { class: "source-page", "{page}페이지" }
                        if let Some(score) = score {
                            span { class: "source-score", "{score}" }
                        }
                        p { class: "source-text", "{text}" }
                    }
                }
            }
        }
    }
}

#[component]
fn MessageBubble(entry: TranscriptEntry) -> Element {
    let mut class = if entry.is_user() {
        "message user-message".to_string()
    } else {
        "message assistant-message".to_string()
    };
    match entry.delivery {
        Delivery::Pending => class.push_str(" pending"),
        Delivery::Failed => class.push_str(" failed"),
        Delivery::Committed => {}
    }
    if entry.is_error {
        class.push_str(" error");
    }
    let time = clock_time(&entry.message.timestamp);
    let sources = entry.message.sources.clone();
    let show_sources = entry.message.sender == Sender::Assistant && !sources.is_empty();

    rsx! {
        div {
            class: "{class}",
            div { class: "message-content", "{entry.message.text}" }
            if show_sources {
                SourceList { sources }
            }
            div {
                class: "message-footer",
                if entry.delivery == Delivery::Failed {
                    span { class: "message-status", "전송 실패" }
                }
                span { class: "message-time", "{time}" }
            }
        }
    }
}

/// `/chat/{chat_id}`, where `chat_id` may be the temporary marker.
///
/// `on_open` is called with a thread id (or the marker) whenever the view
/// wants a different URL: after the first send persisted the chat, after
/// picking a thread, after deleting the active one.
#[component]
pub fn ChatView(chat_id: String, on_open: EventHandler<String>) -> Element {
    let api = use_api();
    let mut chat = use_signal(ChatSession::new);
    let mut input = use_signal(String::new);

    // Track the route param in a signal so the effect re-runs when it changes
    let mut route_id = use_signal(|| chat_id.clone());
    if *route_id.peek() != chat_id {
        route_id.set(chat_id.clone());
    }

    let list_api = api.clone();
    let _threads = use_resource(move || {
        let api = list_api.clone();
        async move {
            match api.list_threads().await {
                Ok(threads) => chat.write().set_threads(threads),
                Err(e) => tracing::warn!("Could not list chat threads: {e}"),
            }
        }
    });

    let load_api = api.clone();
    use_effect(move || {
        let id = route_id();
        let entry = chat.peek().entry(&id);
        match entry {
            Entry::Stay => {}
            Entry::StartTemporary => chat.write().start_temporary(),
            Entry::Load(id) => {
                let api = load_api.clone();
                spawn(async move {
                    let result = api.thread_messages(&id).await;
                    let fell_back = {
                        let mut session = chat.write();
                        session.finish_load(&id, result);
                        session.mode() == &ThreadMode::Temporary
                    };
                    if fell_back {
                        on_open.call(TEMPORARY_MARKER.to_string());
                    }
                });
            }
        }
    });

    let send_api = api.clone();
    let mut send = move || {
        let text = input();
        let Some(plan) = chat.write().begin_send(&text) else {
            return;
        };
        input.set(String::new());
        let api = send_api.clone();
        spawn(async move {
            let outcome = chat::dispatch(&api, plan).await;
            let created = chat.write().apply(outcome);
            if let Some(id) = created {
                on_open.call(id);
            }
        });
    };

    let delete_api = api.clone();
    let delete_thread = move |id: String| {
        let api = delete_api.clone();
        spawn(async move {
            match api.delete_thread(&id).await {
                Ok(()) => {
                    tracing::info!("Deleted chat thread {id}");
                    if chat.write().remove_thread(&id) {
                        on_open.call(TEMPORARY_MARKER.to_string());
                    }
                }
                Err(e) => tracing::warn!("Deleting chat thread {id} failed: {e}"),
            }
        });
    };

    let session = chat.read();
    let active = session.active_thread().map(str::to_string);
    let threads: Vec<_> = session
        .threads()
        .iter()
        .map(|t| (t.clone(), calendar_date(&t.created_at)))
        .collect();
    let transcript = session.transcript().to_vec();
    let sending = session.is_sending();
    let notice = session.notice().map(str::to_string);
    drop(session);

    rsx! {
        div {
            class: "chat-layout",
            aside {
                class: "chat-sidebar",
                button {
                    class: "new-chat-button",
                    onclick: move |_| on_open.call(TEMPORARY_MARKER.to_string()),
                    "+ 새 대화"
                }
                if threads.is_empty() {
                    p { class: "no-threads", "대화 기록이 없습니다." }
                }
                ul {
                    class: "thread-list",
                    for (thread, date) in threads {
                        li {
                            key: "{thread.id}",
                            class: thread_class(active.as_deref() == Some(thread.id.as_str())),
                            div {
                                class: "thread-link",
                                onclick: {
                                    let id = thread.id.clone();
                                    move |_| on_open.call(id.clone())
                                },
                                span { class: "thread-title", "{thread.title}" }
                                span { class: "thread-date", "{date}" }
                            }
                            button {
                                class: "thread-delete",
                                title: "대화 삭제",
                                onclick: {
                                    let id = thread.id.clone();
                                    let delete_thread = delete_thread.clone();
                                    move |evt: MouseEvent| {
                                        evt.stop_propagation();
                                        delete_thread(id.clone());
                                    }
                                },
                                "🗑"
                            }
                        }
                    }
                }
            }
            div {
                class: "chat-container",
                div {
                    class: "chat-header",
                    h1 { "고용노동 정책 어시스턴트" }
                    p { "고용노동 정책에 대해 무엇이든 물어보세요!" }
                }
                if let Some(message) = notice {
                    div { class: "chat-notice", "{message}" }
                }
                div {
                    class: "chat-messages",
                    for entry in transcript {
                        MessageBubble { key: "{entry.key}", entry: entry.clone() }
                    }
                    if sending {
                        div {
                            class: "message assistant-message",
                            div {
                                class: "message-content typing-indicator",
                                LoadingDots { label: "답변을 작성하고 있습니다" }
                            }
                        }
                    }
                }
                form {
                    class: "chat-input",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        send();
                    },
                    input {
                        r#type: "text",
                        placeholder: "메시지를 입력하세요...",
                        value: input(),
                        disabled: sending,
                        oninput: move |e| input.set(e.value()),
                    }
                    button {
                        r#type: "submit",
                        disabled: sending || input().trim().is_empty(),
                        "전송"
                    }
                }
            }
        }
    }
}
