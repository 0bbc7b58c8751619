use dioxus::prelude::*;

#[component]
pub fn NotFoundView(path: String, on_home: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "not-found",
            h1 { "404" }
            p { "요청하신 페이지 {path} 를 찾을 수 없습니다." }
            button { class: "btn primary-btn", onclick: move |_| on_home.call(()), "홈으로" }
        }
    }
}
