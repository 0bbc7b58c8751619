//! Login and registration form validation.
//!
//! Validation is client-side only and produces one Korean message per
//! field. The backend still has the final say; its errors come back through
//! [`crate::session::SessionState::error`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use api::{AgeBracket, EmploymentStatus, Gender, NewAccount, UserProfile};
use regex::Regex;

use crate::format::compile;

pub const MIN_PASSWORD_CHARS: usize = 8;

static EMAIL_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"^\S+@\S+\.\S+$"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Email,
    Password,
    ConfirmPassword,
    Name,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn set(&mut self, field: FormField, message: &'static str) {
        self.0.entry(field).or_insert(message);
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

fn check_email(email: &str, errors: &mut FieldErrors) {
    let email = email.trim();
    if email.is_empty() {
        errors.set(FormField::Email, "이메일을 입력해주세요");
    } else if !EMAIL_SHAPE.as_ref().is_some_and(|re| re.is_match(email)) {
        errors.set(FormField::Email, "유효한 이메일 주소를 입력해주세요");
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.set(FormField::Password, "비밀번호를 입력해주세요");
        }
        errors.into_result()
    }
}

/// Registration form. Select fields hold wire codes, empty for "not chosen".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub employment_status: String,
    pub region: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<NewAccount, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.set(FormField::Password, "비밀번호를 입력해주세요");
        } else if self.password.chars().count() < MIN_PASSWORD_CHARS {
            errors.set(FormField::Password, "비밀번호는 8자 이상이어야 합니다");
        }
        if self.password != self.confirm_password {
            errors.set(FormField::ConfirmPassword, "비밀번호가 일치하지 않습니다");
        }
        if self.name.trim().is_empty() {
            errors.set(FormField::Name, "이름을 입력해주세요");
        }
        errors.into_result()?;

        let name = self.name.trim().to_string();
        Ok(NewAccount {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            full_name: name.clone(),
            profile: UserProfile {
                name: Some(name),
                age: AgeBracket::from_code(&self.age),
                gender: Gender::from_code(&self.gender),
                employment_status: EmploymentStatus::from_code(&self.employment_status),
                region: Some(self.region.trim().to_string()).filter(|r| !r.is_empty()),
                ..UserProfile::default()
            },
        })
    }
}
