//! Policy search with filters, plus the recommendation tab.

use api::{AgeBracket, ApiError, EmploymentStatus, Gender, Policy, PolicyBackend, ProfileBackend, SearchQuery};
use dioxus::prelude::*;
use domain::profile::REGIONS;
use domain::{Bookmarks, EnhancementCache};

use super::register::{options, CodeSelect};
use super::Load;
use crate::{use_api, use_enhancements, LoadingDots, PolicyCard};

const LOAD_FAILED: &str = "정책을 불러오는데 실패했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Search,
    Recommended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    /// Precomputed by the backend for this user.
    Saved,
    /// Vector similarity against the user's profile.
    Similar,
    /// Rule-based matching on profile fields.
    Rules,
}

impl Source {
    const ALL: [Source; 3] = [Source::Saved, Source::Similar, Source::Rules];

    fn label(self) -> &'static str {
        match self {
            Source::Saved => "맞춤 추천",
            Source::Similar => "프로필 유사도",
            Source::Rules => "조건 일치",
        }
    }
}

fn chip_class(active: bool) -> &'static str {
    if active {
        "chip active"
    } else {
        "chip"
    }
}

fn settle(
    result: Result<Vec<Policy>, ApiError>,
    mut bookmarks: Signal<Bookmarks>,
    mut enhancements: Signal<EnhancementCache>,
) -> Load<Vec<Policy>> {
    match result {
        Ok(policies) => {
            bookmarks.write().observe(&policies);
            enhancements.write().seed_all(&policies);
            Load::Ready(policies)
        }
        Err(e) => {
            tracing::warn!("Policy list failed: {e}");
            Load::Failed(e.user_message(LOAD_FAILED))
        }
    }
}

#[component]
fn PolicyList(state: Load<Vec<Policy>>, empty: String) -> Element {
    match state {
        Load::Loading => rsx! {
            div { class: "loading", LoadingDots { label: "정책을 불러오는 중" } }
        },
        Load::Failed(message) => rsx! {
            div { class: "error", "{message}" }
        },
        Load::Ready(policies) if policies.is_empty() => rsx! {
            div { class: "no-results", "{empty}" }
        },
        Load::Ready(policies) => rsx! {
            div {
                class: "policies-list",
                for policy in policies {
                    PolicyCard { key: "{policy.id}", policy: policy.clone() }
                }
            }
        },
    }
}

#[component]
pub fn SearchView() -> Element {
    let api = use_api();
    let bookmarks = use_context_provider(|| Signal::new(Bookmarks::new()));
    let enhancements = use_enhancements();
    let mut tab = use_signal(|| Tab::Search);
    let mut term = use_signal(String::new);
    let mut query = use_signal(SearchQuery::default);
    let mut results = use_signal(|| Load::<Vec<Policy>>::Loading);
    let mut source = use_signal(|| Source::Saved);
    let mut recommendations = use_signal(|| Load::<Vec<Policy>>::Loading);
    let mut refreshing = use_signal(|| false);
    let mut notice = use_signal(|| Option::<String>::None);

    // Re-run the search whenever the submitted query changes
    let search_api = api.clone();
    let _search = use_resource(move || {
        let api = search_api.clone();
        let query = query();
        async move {
            results.set(Load::Loading);
            results.set(settle(api.search(&query).await, bookmarks, enhancements));
        }
    });

    // Recommendations load lazily, on first visit of the tab
    let rec_api = api.clone();
    let mut recommended = use_resource(move || {
        let api = rec_api.clone();
        let active = tab() == Tab::Recommended;
        let source = source();
        async move {
            if !active {
                return;
            }
            recommendations.set(Load::Loading);
            let result = match source {
                Source::Saved => api.recommended().await,
                Source::Rules => api.recommend().await,
                Source::Similar => match api.my_profile().await {
                    Ok(profile) => api.recommend_vector(&profile).await,
                    Err(e) => Err(e),
                },
            };
            recommendations.set(settle(result, bookmarks, enhancements));
        }
    });

    let refresh = move |_| {
        if refreshing() {
            return;
        }
        refreshing.set(true);
        notice.set(None);
        let api = api.clone();
        spawn(async move {
            match api.refresh_recommendations().await {
                Ok(()) => {
                    tracing::info!("Recommendations refreshed");
                    recommended.restart();
                }
                Err(e) => {
                    tracing::warn!("Refreshing recommendations failed: {e}");
                    notice.set(Some(e.user_message("추천 정책을 갱신하지 못했습니다.")));
                }
            }
            refreshing.set(false);
        });
    };

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        let q = term().trim().to_string();
        query.write().q = q;
    };

    let filters = query();
    let search_class = if tab() == Tab::Search { "tab-button active" } else { "tab-button" };
    let rec_class = if tab() == Tab::Recommended { "tab-button active" } else { "tab-button" };

    rsx! {
        div {
            class: "policy-search-container",
            h1 { "정책 검색" }
            div {
                class: "search-tabs",
                button { class: search_class, onclick: move |_| tab.set(Tab::Search), "정책 검색" }
                button { class: rec_class, onclick: move |_| tab.set(Tab::Recommended), "추천 정책" }
            }
            if tab() == Tab::Search {
                form {
                    class: "search-bar",
                    onsubmit: submit,
                    input {
                        r#type: "text",
                        placeholder: "정책명, 키워드로 검색...",
                        value: term(),
                        oninput: move |e| term.set(e.value()),
                    }
                    button { r#type: "submit", "검색" }
                }
                div {
                    class: "filters-section",
                    h3 { "상세 필터" }
                    div {
                        class: "filter-controls",
                        CodeSelect {
                            id: "filter-age",
                            label: "연령대",
                            placeholder: "전체",
                            value: filters.age.clone(),
                            options: options(AgeBracket::ALL, AgeBracket::code, AgeBracket::label),
                            onchange: move |v| query.write().age = v,
                        }
                        CodeSelect {
                            id: "filter-gender",
                            label: "성별",
                            placeholder: "전체",
                            value: filters.gender.clone(),
                            options: options(Gender::ALL, Gender::code, Gender::label),
                            onchange: move |v| query.write().gender = v,
                        }
                        CodeSelect {
                            id: "filter-employment",
                            label: "고용상태",
                            placeholder: "전체",
                            value: filters.employment.clone(),
                            options: options(EmploymentStatus::ALL, EmploymentStatus::code, EmploymentStatus::label),
                            onchange: move |v| query.write().employment = v,
                        }
                        CodeSelect {
                            id: "filter-region",
                            label: "지역",
                            placeholder: "전국",
                            value: filters.region.clone(),
                            options: REGIONS.to_vec(),
                            onchange: move |v| query.write().region = v,
                        }
                    }
                }
                PolicyList { state: results(), empty: "검색 결과가 없습니다." }
            } else {
                div {
                    class: "recommend-controls",
                    for s in Source::ALL {
                        button {
                            class: chip_class(source() == s),
                            onclick: move |_| source.set(s),
                            "{s.label()}"
                        }
                    }
                    button {
                        class: "refresh-button",
                        disabled: refreshing(),
                        onclick: refresh,
                        if refreshing() { "갱신 중..." } else { "추천 새로고침" }
                    }
                }
                if let Some(message) = notice() {
                    div { class: "error", "{message}" }
                }
                PolicyList { state: recommendations(), empty: "추천 정책이 없습니다. 프로필을 입력하면 더 정확한 추천을 받을 수 있습니다." }
            }
        }
    }
}
