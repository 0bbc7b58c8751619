//! Login page view.

use dioxus::prelude::*;
use domain::forms::{FieldErrors, FormField, LoginForm};

use crate::{use_api, use_session};

#[component]
pub fn LoginView(on_success: EventHandler<()>, on_register: EventHandler<()>) -> Element {
    let api = use_api();
    let mut session = use_session();
    let mut form = use_signal(LoginForm::default);
    let mut errors = use_signal(FieldErrors::default);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let current = form();
        if let Err(e) = current.validate() {
            errors.set(e);
            return;
        }
        errors.set(FieldErrors::default());
        session.write().clear_error();
        submitting.set(true);
        let api = api.clone();
        spawn(async move {
            let outcome = domain::session::login(&api, &current.email, &current.password).await;
            let ok = session.write().apply_login(outcome);
            submitting.set(false);
            if ok {
                on_success.call(());
            }
        });
    };

    let server_error = session.read().error.clone();
    let email_error = errors.read().get(FormField::Email);
    let password_error = errors.read().get(FormField::Password);

    rsx! {
        div {
            class: "auth-container",
            div {
                class: "auth-card",
                h2 { "로그인" }
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
                            value: "{form.read().email}",
                            oninput: move |e| form.write().email = e.value(),
                        }
                        if let Some(message) = email_error {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    div {
                        class: "form-group",
                        label { r#for: "password", "비밀번호" }
                        input {
                            r#type: "password",
                            id: "password",
                            value: "{form.read().password}",
                            oninput: move |e| form.write().password = e.value(),
                        }
                        if let Some(message) = password_error {
                            span { class: "error-message", "{message}" }
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "auth-button",
                        disabled: submitting(),
                        if submitting() { "로그인 중..." } else { "로그인" }
                    }
                }
                div {
                    class: "auth-links",
                    p {
                        "계정이 없으신가요? "
                        a { onclick: move |_| on_register.call(()), "회원가입" }
                    }
                }
            }
        }
    }
}
