//! Policy card: formatted summary, bookmark toggle and on-demand details.
//!
//! Details prefer the backend's enhanced info. While it loads the card shows
//! [`LoadingDots`]; when it is unavailable the heuristic key-info extraction
//! is shown instead.

use std::time::Duration;

use api::{EnhancedPolicy, Policy};
use dioxus::prelude::*;
use domain::enhance::{self, ellipsis_frame};
use domain::extract::{Extraction, SEE_SOURCE};
use domain::{Bookmarks, EnhanceState, PolicyDisplay};

use crate::timer::sleep;
use crate::{use_api, use_enhancements, use_ui_config};

/// Animated "loading..." text, one frame per configured tick.
#[component]
pub fn LoadingDots(label: String) -> Element {
    let tick_ms = use_ui_config().enhancement_tick_ms;
    let mut tick = use_signal(|| 0usize);

    use_effect(move || {
        spawn(async move {
            loop {
                sleep(Duration::from_millis(u64::from(tick_ms))).await;
                *tick.write() += 1;
            }
        });
    });

    let dots = ellipsis_frame(tick());
    rsx! {
        span { class: "loading-dots", "{label}{dots}" }
    }
}

#[component]
fn EnhancedDetails(info: EnhancedPolicy) -> Element {
    rsx! {
        div {
            class: "policy-details enhanced",
            if !info.summary.is_empty() {
                p { class: "detail-summary", "{info.summary}" }
            }
            if !info.eligibility.is_empty() {
                div { class: "detail-label", "지원대상" }
                ul {
                    for item in info.eligibility.iter() {
                        li { "{item}" }
                    }
                }
            }
            if !info.benefits.is_empty() {
                div { class: "detail-label", "지원내용" }
                ul {
                    for item in info.benefits.iter() {
                        li { "{item}" }
                    }
                }
            }
            if !info.application_process.is_empty() {
                div { class: "detail-label", "신청방법" }
                p { "{info.application_process}" }
            }
        }
    }
}

#[component]
fn HeuristicDetails(extraction: Extraction) -> Element {
    match extraction {
        Extraction::Fields(info) => rsx! {
            div {
                class: "policy-details",
                for (label, value) in info.entries().into_iter().map(|(f, v)| (f.label(), v.to_string())) {
                    div {
                        class: "policy-detail",
                        span { class: "detail-label", "{label}:" }
                        span { class: "detail-value", " {value}" }
                    }
                }
            }
        },
        Extraction::Purpose(purpose) => rsx! {
            div {
                class: "policy-details",
                span { class: "detail-label", "사업목적:" }
                span { class: "detail-value", " {purpose}" }
            }
        },
        Extraction::SeeSource => rsx! {
            div { class: "policy-details muted", "{SEE_SOURCE}" }
        },
        Extraction::Abstain => rsx! {},
    }
}

#[component]
pub fn PolicyCard(policy: Policy) -> Element {
    let api = use_api();
    let mut enhancements = use_enhancements();
    let mut bookmarks = use_context::<Signal<Bookmarks>>();
    let mut expanded = use_signal(|| false);

    let display = PolicyDisplay::from_policy(&policy);
    let id = policy.id.clone();
    let saved = bookmarks.read().is_saved(&id, policy.is_saved);
    let saving = bookmarks.read().is_pending(&id);
    let details = enhancements.read().get(&id).cloned();

    // `retry` selects `EnhancementCache::retry` over `begin`.
    let request_details = {
        let api = api.clone();
        let policy = policy.clone();
        move |retry: bool| {
            let start = if retry {
                enhancements.write().retry(&policy.id)
            } else {
                enhancements.write().begin(&policy.id)
            };
            if !start {
                return;
            }
            let api = api.clone();
            let policy = policy.clone();
            spawn(async move {
                let result = enhance::fetch(&api, &policy).await;
                enhancements.write().finish(&policy.id, result);
            });
        }
    };

    let mut request = request_details.clone();
    let toggle_details = move |_| {
        let open = !expanded();
        expanded.set(open);
        if open {
            request(false);
        }
    };
    let mut retry = request_details;

    let toggle_saved = {
        let id = id.clone();
        let fallback = policy.is_saved;
        move |_| {
            let Some(save) = bookmarks.write().begin_toggle(&id, fallback) else {
                return;
            };
            let api = api.clone();
            let id = id.clone();
            spawn(async move {
                let result = domain::bookmarks::persist(&api, &id, save).await;
                bookmarks.write().settle(&id, &result);
            });
        }
    };

    let details_view = if !expanded() {
        rsx! {}
    } else {
        match details {
            Some(EnhanceState::Pending) => rsx! {
                div {
                    class: "policy-details",
                    LoadingDots { label: "AI가 정책 정보를 정리하고 있습니다" }
                }
            },
            Some(EnhanceState::Ready(info)) => rsx! {
                EnhancedDetails { info }
            },
            Some(EnhanceState::Failed) => rsx! {
                HeuristicDetails { extraction: display.key_info.clone() }
                button {
                    class: "link-button",
                    onclick: move |_| retry(true),
                    "AI 요약 다시 시도"
                }
            },
            None => rsx! {
                HeuristicDetails { extraction: display.key_info.clone() }
            },
        }
    };
    let bookmark_class = if saved { "bookmark saved" } else { "bookmark" };
    let bookmark_title = if saved { "저장 취소" } else { "저장" };
    let bookmark_icon = if saved { "★" } else { "☆" };
    let toggle_label = if expanded() { "접기" } else { "자세히 보기" };

    rsx! {
        div {
            class: "policy-card",
            div {
                class: "policy-card-header",
                span { class: "policy-icon", "{display.icon}" }
                div {
                    h3 { class: "policy-title", "{display.title}" }
                    span { class: "policy-category", "{display.category}" }
                }
                button {
                    class: bookmark_class,
                    disabled: saving,
                    title: bookmark_title,
                    onclick: toggle_saved,
                    "{bookmark_icon}"
                }
            }
            p { class: "policy-summary", "{display.summary}" }
            div {
                class: "policy-meta",
                if let Some(page) = policy.page.as_ref() {
                    span { class: "policy-page", "출처: {page}페이지" }
                }
                if let Some(deadline) = policy.deadline.as_ref() {
                    span { class: "policy-deadline", "마감일: {deadline}" }
                }
            }
            {details_view}
            button {
                class: "details-toggle",
                onclick: toggle_details,
                "{toggle_label}"
            }
        }
    }
}
