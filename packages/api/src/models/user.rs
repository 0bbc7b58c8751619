//! # Users and profiles
//!
//! [`User`] is what `GET /auth/me` returns. [`UserProfile`] carries the
//! demographic fields used for recommendations plus the notification flags;
//! every field is optional because a freshly registered account may have none.
//!
//! The categorical fields are enums whose serde codes match the backend
//! (`"youth"`, `"employed"`, ...). Unknown codes deserialize to `Unknown`
//! rather than failing the whole profile.

use serde::{Deserialize, Serialize};

use super::{de_id, de_opt_id};

/// The authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    pub email: String,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

impl User {
    /// Get display name, falling back to email if no name is set.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

macro_rules! coded_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => ($code:literal, $label:literal)),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
            #[serde(other)]
            Unknown,
        }

        impl $name {
            /// Every selectable value, in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Wire code, e.g. for `<option value=...>`.
            pub fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                    $name::Unknown => "",
                }
            }

            /// Korean display label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::Unknown => "-",
                }
            }

            /// Parse a wire code; the empty string means "not selected".
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum! {
    /// Age bracket.
    AgeBracket {
        Youth => ("youth", "청년 (만 19-34세)"),
        Middle => ("middle", "중장년 (만 35-64세)"),
        Senior => ("senior", "노년 (만 65세 이상)"),
    }
}

coded_enum! {
    Gender {
        Male => ("male", "남성"),
        Female => ("female", "여성"),
        Other => ("other", "기타"),
    }
}

coded_enum! {
    /// Current employment situation.
    EmploymentStatus {
        Employed => ("employed", "재직자"),
        Unemployed => ("unemployed", "구직자"),
        Business => ("business", "자영업자"),
        Student => ("student", "학생"),
    }
}

/// Recommendation profile and notification preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<AgeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(
        default,
        alias = "employmentStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub employment_status: Option<EmploymentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, alias = "isDisabled")]
    pub is_disabled: bool,
    #[serde(default, alias = "isForeign")]
    pub is_foreign: bool,
    #[serde(
        default,
        alias = "familyStatus",
        skip_serializing_if = "Option::is_none"
    )]
    pub family_status: Option<String>,
    #[serde(default, alias = "notifyPolicyUpdates")]
    pub notify_policy_updates: bool,
    #[serde(default, alias = "notifyDeadlines")]
    pub notify_deadlines: bool,
    #[serde(default, alias = "notifyNewPolicies")]
    pub notify_new_policies: bool,
}

/// Payload of `POST /auth/register`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub profile: UserProfile,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

/// Response of `POST /auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegisterReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_auth_me() {
        let user: User =
            serde_json::from_str(r#"{"id": 7, "email": "a@b.kr", "full_name": "홍길동"}"#).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.display_name(), "홍길동");
        assert!(user.profile.is_none());

        let anon: User = serde_json::from_str(r#"{"id": 8, "email": "c@d.kr", "full_name": null}"#).unwrap();
        assert_eq!(anon.display_name(), "c@d.kr");
    }

    #[test]
    fn test_profile_accepts_both_casings_and_unknown_codes() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"age": "youth", "gender": "robot", "employmentStatus": "student", "notifyDeadlines": true}"#,
        )
        .unwrap();
        assert_eq!(profile.age, Some(AgeBracket::Youth));
        assert_eq!(profile.gender, Some(Gender::Unknown));
        assert_eq!(profile.employment_status, Some(EmploymentStatus::Student));
        assert!(profile.notify_deadlines);
        assert!(!profile.notify_new_policies);
    }

    #[test]
    fn test_register_payload_shape() {
        let account = NewAccount {
            email: "a@b.kr".to_string(),
            password: "secret123".to_string(),
            full_name: "홍길동".to_string(),
            profile: UserProfile {
                age: Some(AgeBracket::Middle),
                region: Some("busan".to_string()),
                ..UserProfile::default()
            },
        };
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["full_name"], "홍길동");
        assert_eq!(json["profile"]["age"], "middle");
        assert_eq!(json["profile"]["region"], "busan");
        assert_eq!(json["profile"]["is_disabled"], false);
        assert!(json["profile"].get("gender").is_none());
    }

    #[test]
    fn test_enum_codes() {
        assert_eq!(EmploymentStatus::from_code("business"), Some(EmploymentStatus::Business));
        assert_eq!(EmploymentStatus::from_code(""), None);
        assert_eq!(AgeBracket::Senior.code(), "senior");
        assert_eq!(Gender::Female.label(), "여성");
        assert_eq!(AgeBracket::ALL.len(), 3);
    }
}
