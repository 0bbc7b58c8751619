//! Profile page: basic info, saved policies and notification preferences.

use api::{
    AgeBracket, EmploymentStatus, Gender, Notification, NotificationSettings, Policy,
    PolicyBackend, ProfileBackend, UserProfile,
};
use dioxus::prelude::*;
use domain::profile::{region_label, NotificationToggle, ProfileDraft, REGIONS, UNSET};
use domain::time::calendar_date;
use domain::{Optimistic, PolicyDisplay};

use super::register::{options, CodeSelect};
use super::Load;
use crate::use_api;
use crate::use_session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Info,
    Saved,
    Notifications,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Info, Tab::Saved, Tab::Notifications];

    fn label(self) -> &'static str {
        match self {
            Tab::Info => "기본 정보",
            Tab::Saved => "관심 정책",
            Tab::Notifications => "알림 설정",
        }
    }
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab-button active"
    } else {
        "tab-button"
    }
}

fn toggle_class(on: bool) -> &'static str {
    if on {
        "toggle on"
    } else {
        "toggle"
    }
}

fn label_or_unset<T: Copy>(value: Option<T>, label: fn(T) -> &'static str) -> &'static str {
    value.map_or(UNSET, label)
}

#[component]
fn InfoItem(label: String, value: String) -> Element {
    rsx! {
        div {
            class: "info-item",
            span { class: "info-label", "{label}" }
            span { class: "info-value", "{value}" }
        }
    }
}

/// Read-only profile, switching to an edit form on demand.
#[component]
fn BasicInfo(profile: UserProfile, on_saved: EventHandler<UserProfile>) -> Element {
    let api = use_api();
    let session = use_session();
    let mut draft = use_signal(|| Option::<ProfileDraft>::None);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let base = profile.clone();
    let toggle_edit = move |_| {
        let next = match draft() {
            Some(_) => None,
            None => Some(ProfileDraft::from_profile(&base)),
        };
        draft.set(next);
        error.set(None);
    };

    let base = profile.clone();
    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if saving() {
            return;
        }
        let Some(current) = draft() else {
            return;
        };
        let updated = current.apply_to(&base);
        saving.set(true);
        let api = api.clone();
        spawn(async move {
            match api.update_profile(&updated).await {
                Ok(()) => {
                    tracing::info!("Profile updated");
                    draft.set(None);
                    on_saved.call(updated);
                }
                Err(e) => {
                    tracing::warn!("Profile update failed: {e}");
                    error.set(Some(e.user_message("프로필 업데이트에 실패했습니다.")));
                }
            }
            saving.set(false);
        });
    };

    let email = session
        .read()
        .user
        .as_ref()
        .map(|u| u.email.clone())
        .unwrap_or_default();
    let editing = draft();
    let edit_label = if editing.is_some() { "취소" } else { "정보 수정" };

    rsx! {
        div {
            class: "profile-section",
            div {
                class: "profile-actions",
                button { class: "edit-button", onclick: toggle_edit, "{edit_label}" }
            }
            if let Some(message) = error() {
                div { class: "error", "{message}" }
            }
            if let Some(current) = editing {
                form {
                    onsubmit: onsubmit,
                    div {
                        class: "profile-form",
                        div {
                            class: "form-group",
                            label { r#for: "profile-name", "이름" }
                            input {
                                r#type: "text",
                                id: "profile-name",
                                value: "{current.name}",
                                oninput: move |e| {
                                    if let Some(d) = draft.write().as_mut() {
                                        d.name = e.value();
                                    }
                                },
                            }
                        }
                        CodeSelect {
                            id: "profile-age",
                            label: "연령대",
                            value: current.age.clone(),
                            options: options(AgeBracket::ALL, AgeBracket::code, AgeBracket::label),
                            onchange: move |v| {
                                if let Some(d) = draft.write().as_mut() {
                                    d.age = v;
                                }
                            },
                        }
                        CodeSelect {
                            id: "profile-gender",
                            label: "성별",
                            value: current.gender.clone(),
                            options: options(Gender::ALL, Gender::code, Gender::label),
                            onchange: move |v| {
                                if let Some(d) = draft.write().as_mut() {
                                    d.gender = v;
                                }
                            },
                        }
                        CodeSelect {
                            id: "profile-employment",
                            label: "고용상태",
                            value: current.employment_status.clone(),
                            options: options(EmploymentStatus::ALL, EmploymentStatus::code, EmploymentStatus::label),
                            onchange: move |v| {
                                if let Some(d) = draft.write().as_mut() {
                                    d.employment_status = v;
                                }
                            },
                        }
                        CodeSelect {
                            id: "profile-region",
                            label: "지역",
                            value: current.region.clone(),
                            options: REGIONS.to_vec(),
                            onchange: move |v| {
                                if let Some(d) = draft.write().as_mut() {
                                    d.region = v;
                                }
                            },
                        }
                    }
                    div {
                        class: "form-actions",
                        button {
                            r#type: "submit",
                            class: "save-button",
                            disabled: saving(),
                            if saving() { "저장 중..." } else { "저장" }
                        }
                    }
                }
            } else {
                div {
                    class: "profile-info",
                    InfoItem { label: "이메일", value: email }
                    InfoItem { label: "이름", value: profile.name.clone().unwrap_or_else(|| UNSET.to_string()) }
                    InfoItem { label: "연령대", value: label_or_unset(profile.age, AgeBracket::label).to_string() }
                    InfoItem { label: "성별", value: label_or_unset(profile.gender, Gender::label).to_string() }
                    InfoItem { label: "고용상태", value: label_or_unset(profile.employment_status, EmploymentStatus::label).to_string() }
                    InfoItem { label: "지역", value: region_label(profile.region.as_deref().unwrap_or_default()).to_string() }
                }
            }
        }
    }
}

#[component]
fn SavedPolicies(on_search: EventHandler<()>) -> Element {
    let api = use_api();
    let mut saved = use_signal(|| Load::<Vec<Policy>>::Loading);

    let list_api = api.clone();
    let _load = use_resource(move || {
        let api = list_api.clone();
        async move {
            match api.saved_policies().await {
                Ok(policies) => saved.set(Load::Ready(policies)),
                Err(e) => {
                    tracing::warn!("Saved policies failed: {e}");
                    saved.set(Load::Failed(e.user_message("정책을 불러오는데 실패했습니다.")));
                }
            }
        }
    });

    let remove = move |id: String| {
        let api = api.clone();
        spawn(async move {
            match api.unsave_policy(&id).await {
                Ok(()) => {
                    if let Load::Ready(list) = &mut *saved.write() {
                        list.retain(|p| p.id != id);
                    }
                }
                Err(e) => tracing::warn!("Removing saved policy {id} failed: {e}"),
            }
        });
    };

    let body = match saved() {
        Load::Loading => rsx! {
            div { class: "loading", "관심 정책을 불러오는 중..." }
        },
        Load::Failed(message) => rsx! {
            div { class: "error", "{message}" }
        },
        Load::Ready(list) if list.is_empty() => rsx! {
            div {
                class: "no-policies",
                p { "저장된 정책이 없습니다." }
                button {
                    class: "search-link",
                    onclick: move |_| on_search.call(()),
                    "정책 검색하러 가기"
                }
            }
        },
        Load::Ready(list) => rsx! {
            div {
                class: "saved-policies-list",
                for policy in list {
                    SavedPolicyCard { key: "{policy.id}", policy: policy.clone(), on_remove: remove.clone() }
                }
            }
        },
    };

    rsx! {
        div {
            class: "policies-section",
            h3 { "내 관심 정책" }
            {body}
        }
    }
}

#[component]
fn SavedPolicyCard(policy: Policy, on_remove: EventHandler<String>) -> Element {
    let display = PolicyDisplay::from_policy(&policy);
    let id = policy.id.clone();

    rsx! {
        div {
            class: "saved-policy-card",
            h4 { class: "policy-title", "{display.icon} {display.title}" }
            div {
                class: "policy-meta",
                span { class: "policy-category", "{display.category}" }
                if let Some(deadline) = policy.deadline.as_ref() {
                    span { class: "policy-deadline", "마감일: {deadline}" }
                }
            }
            div {
                class: "policy-actions",
                button {
                    class: "remove-button",
                    onclick: move |_| on_remove.call(id.clone()),
                    "삭제"
                }
            }
        }
    }
}

/// The three toggles plus the recent notification list.
#[component]
fn NotificationPanel(initial: NotificationSettings, on_saved: EventHandler<NotificationSettings>) -> Element {
    let api = use_api();
    let mut settings = use_signal(|| Optimistic::new(initial));
    let mut recent = use_signal(|| Load::<Vec<Notification>>::Loading);
    let mut error = use_signal(|| Option::<String>::None);

    let list_api = api.clone();
    let _load = use_resource(move || {
        let api = list_api.clone();
        async move {
            match api.notifications().await {
                Ok(list) => recent.set(Load::Ready(list)),
                Err(e) => {
                    tracing::warn!("Notifications failed: {e}");
                    recent.set(Load::Failed(e.user_message("알림을 불러오지 못했습니다.")));
                }
            }
        }
    });

    let flip = move |toggle: NotificationToggle| {
        let next = toggle.flip(*settings.peek().value());
        if !settings.write().propose(next) {
            return;
        }
        error.set(None);
        let api = api.clone();
        spawn(async move {
            let result = api.update_notification_settings(&next).await;
            match &result {
                Ok(()) => on_saved.call(next),
                Err(e) => {
                    tracing::warn!("Notification settings update failed: {e}");
                    error.set(Some(e.user_message("알림 설정을 저장하지 못했습니다.")));
                }
            }
            settings.write().settle(&result);
        });
    };

    let current = settings.read();
    let values = *current.value();
    let pending = current.is_pending();
    drop(current);

    let recent_view = match recent() {
        Load::Loading => rsx! {
            div { class: "loading", "알림을 불러오는 중..." }
        },
        Load::Failed(message) => rsx! {
            div { class: "error", "{message}" }
        },
        Load::Ready(list) if list.is_empty() => rsx! {
            p { class: "no-notifications", "최근 알림이 없습니다." }
        },
        Load::Ready(list) => {
            let rows = list
                .into_iter()
                .map(|n| (n.id, n.kind.icon(), n.message, calendar_date(&n.created_at)));
            rsx! {
                ul {
                    class: "notifications-list",
                    for (id, icon, message, date) in rows {
                        li {
                            key: "{id}",
                            class: "notification-item",
                            span { class: "notification-icon", "{icon}" }
                            span { class: "notification-message", "{message}" }
                            span { class: "notification-date", "{date}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "notifications-section",
            h3 { "알림 설정" }
            if let Some(message) = error() {
                div { class: "error", "{message}" }
            }
            div {
                class: "notification-settings",
                for toggle in NotificationToggle::ALL {
                    div {
                        class: "setting-item",
                        div {
                            class: "setting-info",
                            h4 { "{toggle.label()}" }
                            p { "{toggle.description()}" }
                        }
                        button {
                            class: toggle_class(toggle.is_on(&values)),
                            disabled: pending,
                            onclick: {
                                let mut flip = flip.clone();
                                move |_| flip(toggle)
                            },
                            if toggle.is_on(&values) { "켜짐" } else { "꺼짐" }
                        }
                    }
                }
            }
            h3 { "최근 알림" }
            {recent_view}
        }
    }
}

#[component]
pub fn ProfileView(on_search: EventHandler<()>) -> Element {
    let api = use_api();
    let mut tab = use_signal(|| Tab::Info);
    let mut profile = use_signal(|| Load::<UserProfile>::Loading);

    let _load = use_resource(move || {
        let api = api.clone();
        async move {
            match api.my_profile().await {
                Ok(p) => profile.set(Load::Ready(p)),
                Err(e) => {
                    tracing::warn!("Profile load failed: {e}");
                    profile.set(Load::Failed(e.user_message("프로필 정보를 불러오는데 실패했습니다.")));
                }
            }
        }
    });

    let content = match (profile(), tab()) {
        (Load::Loading, _) => rsx! {
            div { class: "loading", "프로필 로딩 중..." }
        },
        (Load::Failed(message), _) => rsx! {
            div { class: "error", "{message}" }
        },
        (Load::Ready(p), Tab::Info) => rsx! {
            BasicInfo {
                profile: p,
                on_saved: move |updated: UserProfile| profile.set(Load::Ready(updated)),
            }
        },
        (Load::Ready(_), Tab::Saved) => rsx! {
            SavedPolicies { on_search }
        },
        (Load::Ready(p), Tab::Notifications) => rsx! {
            NotificationPanel {
                initial: NotificationSettings::from_profile(&p),
                on_saved: move |saved: NotificationSettings| {
                    if let Load::Ready(current) = &mut *profile.write() {
                        saved.write_to(current);
                    }
                },
            }
        },
    };

    rsx! {
        div {
            class: "profile-container",
            div {
                class: "profile-header",
                h1 { "내 프로필" }
                div {
                    class: "profile-tabs",
                    for t in Tab::ALL {
                        button {
                            class: tab_class(tab() == t),
                            onclick: move |_| tab.set(t),
                            "{t.label()}"
                        }
                    }
                }
            }
            div { class: "profile-content", {content} }
        }
    }
}
