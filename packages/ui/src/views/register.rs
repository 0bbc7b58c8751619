//! Registration page view.

use api::{AgeBracket, EmploymentStatus, Gender};
use dioxus::prelude::*;
use domain::forms::{FieldErrors, FormField, RegisterForm};
use domain::profile::REGIONS;

use crate::{use_api, use_session};

/// `(code, label)` pairs for a coded select.
pub(crate) fn options<T: Copy>(all: &[T], code: fn(T) -> &'static str, label: fn(T) -> &'static str) -> Vec<(&'static str, &'static str)> {
    all.iter().map(|v| (code(*v), label(*v))).collect()
}

/// A `<select>` over wire codes with an "unset" first option.
#[component]
pub(crate) fn CodeSelect(
    id: String,
    label: String,
    value: String,
    options: Vec<(&'static str, &'static str)>,
    #[props(default = "선택하세요".to_string())] placeholder: String,
    onchange: EventHandler<String>,
) -> Element {
    rsx! {
        div {
            class: "form-group",
            label { r#for: "{id}", "{label}" }
            select {
                id: "{id}",
                value: "{value}",
                onchange: move |e| onchange.call(e.value()),
                option { value: "", selected: value.is_empty(), "{placeholder}" }
                for (code, text) in options {
                    option { value: code, selected: value == code, "{text}" }
                }
            }
        }
    }
}

#[component]
pub fn RegisterView(on_registered: EventHandler<()>, on_login: EventHandler<()>) -> Element {
    let api = use_api();
    let mut session = use_session();
    let mut form = use_signal(RegisterForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let account = match form().validate() {
            Ok(account) => account,
            Err(e) => {
                errors.set(e);
                return;
            }
        };
        errors.set(FieldErrors::default());
        session.write().clear_error();
        submitting.set(true);
        let api = api.clone();
        spawn(async move {
            let outcome = domain::session::register(&api, &account).await;
            let ok = session.write().apply_register(&outcome);
            submitting.set(false);
            if ok {
                on_registered.call(());
            }
        });
    };

    let server_error = session.read().error.clone();
    let field_error = move |field| errors.read().get(field);
    let current = form();

    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-card register-card",
                h2 { "회원가입" }
                if let Some(message) = server_error {
                    div { class: "auth-error", "{message}" }
                }
                form {
                    onsubmit: onsubmit,
                    div {
                        class: "form-group",
                        label { r#for: "email", "이메일" }
                        input {
                            r#type: "email",
                            id: "email",
                            value: "{current.email}",
                            oninput: move |e| form.write().email = e.value(),
                        }
                        if let Some(message) = field_error(FormField::Email) {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    div {
                        class: "form-group",
                        label { r#for: "password", "비밀번호" }
                        input {
                            r#type: "password",
                            id: "password",
                            value: "{current.password}",
                            oninput: move |e| form.write().password = e.value(),
                        }
                        if let Some(message) = field_error(FormField::Password) {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    div {
                        class: "form-group",
                        label { r#for: "confirm-password", "비밀번호 확인" }
                        input {
                            r#type: "password",
                            id: "confirm-password",
                            value: "{current.confirm_password}",
                            oninput: move |e| form.write().confirm_password = e.value(),
                        }
                        if let Some(message) = field_error(FormField::ConfirmPassword) {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    div {
                        class: "form-group",
                        label { r#for: "name", "이름" }
                        input {
                            r#type: "text",
                            id: "name",
                            value: "{current.name}",
                            oninput: move |e| form.write().name = e.value(),
                        }
                        if let Some(message) = field_error(FormField::Name) {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    h3 { class: "form-section-title", "맞춤 정책 추천을 위한 정보 (선택)" }
                    CodeSelect {
                        id: "age",
                        label: "연령대",
                        value: current.age.clone(),
                        options: options(AgeBracket::ALL, AgeBracket::code, AgeBracket::label),
                        onchange: move |v| form.write().age = v,
                    }
                    CodeSelect {
                        id: "gender",
                        label: "성별",
                        value: current.gender.clone(),
                        options: options(Gender::ALL, Gender::code, Gender::label),
                        onchange: move |v| form.write().gender = v,
                    }
                    CodeSelect {
                        id: "employment-status",
                        label: "고용상태",
                        value: current.employment_status.clone(),
                        options: options(EmploymentStatus::ALL, EmploymentStatus::code, EmploymentStatus::label),
                        onchange: move |v| form.write().employment_status = v,
                    }
                    CodeSelect {
                        id: "region",
                        label: "지역",
                        value: current.region.clone(),
                        options: REGIONS.to_vec(),
                        onchange: move |v| form.write().region = v,
                    }
                    button {
                        r#type: "submit",
                        class: "auth-button",
                        disabled: submitting(),
                        if submitting() { "처리 중..." } else { "회원가입" }
                    }
                }
                div {
                    class: "auth-links",
                    p {
                        "이미 계정이 있으신가요? "
                        a { onclick: move |_| on_login.call(()), "로그인" }
                    }
                }
            }
        }
    }
}
