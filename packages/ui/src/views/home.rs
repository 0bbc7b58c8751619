use dioxus::prelude::*;

/// Employment policy guidebook published by the Ministry of Employment and Labor.
pub const GUIDEBOOK_URL: &str =
    "https://www.moel.go.kr/info/publicdata/majorpublish/majorPublishView.do?bbs_seq=20250200573";

#[component]
pub fn HomeView(on_search: EventHandler<()>, on_chat: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "home-container",
            div {
                class: "hero-section",
                h1 { "고용노동 정책 어시스턴트" }
                p { "나에게 맞는 고용노동 정책을 쉽고 빠르게 찾아보세요!" }
                div {
                    class: "hero-buttons",
                    button { class: "btn primary-btn", onclick: move |_| on_search.call(()), "정책 찾기" }
                    button { class: "btn secondary-btn", onclick: move |_| on_chat.call(()), "AI 상담사와 대화하기" }
                }
            }
            div {
                class: "features-section",
                div {
                    class: "feature-card",
                    div { class: "feature-icon", "🔍" }
                    h3 { "맞춤형 정책 매칭" }
                    p { "나이, 성별, 직업 상태 등 개인 정보를 바탕으로 맞춤형 정책을 추천해드립니다." }
                }
                div {
                    class: "feature-card",
                    div { class: "feature-icon", "💬" }
                    h3 { "AI 챗봇 상담" }
                    p { "고용노동 정책 전문 AI와 대화하며 궁금한 점을 바로 해결하세요." }
                }
                div {
                    class: "feature-card",
                    div { class: "feature-icon", "📄" }
                    h3 { "정책 자료 다운로드" }
                    p { "고용노동 정책 종합 안내서를 PDF로 다운받아 상세 내용을 확인하세요." }
                    a {
                        class: "pdf-btn",
                        href: GUIDEBOOK_URL,
                        target: "_blank",
                        rel: "noopener noreferrer",
                        "PDF 다운로드"
                    }
                }
            }
        }
    }
}
