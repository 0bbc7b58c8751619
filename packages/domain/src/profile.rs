//! Profile editing and notification preferences.

use api::{AgeBracket, EmploymentStatus, Gender, NotificationSettings, UserProfile};

/// Region codes offered by the profile and search forms.
pub const REGIONS: &[(&str, &str)] = &[("seoul", "서울"), ("busan", "부산"), ("incheon", "인천")];

/// Shown for any profile field that is not set.
pub const UNSET: &str = "-";

pub fn region_label(code: &str) -> &str {
    let code = code.trim();
    if code.is_empty() {
        return UNSET;
    }
    REGIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, label)| *label)
}

/// Editable copy of the basic-info fields. Select fields hold wire codes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub employment_status: String,
    pub region: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            name: profile.name.clone().unwrap_or_default(),
            age: profile.age.map(AgeBracket::code).unwrap_or_default().to_string(),
            gender: profile.gender.map(Gender::code).unwrap_or_default().to_string(),
            employment_status: profile
                .employment_status
                .map(EmploymentStatus::code)
                .unwrap_or_default()
                .to_string(),
            region: profile.region.clone().unwrap_or_default(),
        }
    }

    /// `base` with the draft's fields written over it. Notification flags and
    /// the other fields are kept, and so is a coded value this client does not
    /// recognise unless the user picked a replacement.
    pub fn apply_to(&self, base: &UserProfile) -> UserProfile {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        fn coded<T: Copy + PartialEq>(
            code: &str,
            parse: fn(&str) -> Option<T>,
            base: Option<T>,
            unknown: T,
        ) -> Option<T> {
            if code.trim().is_empty() && base == Some(unknown) {
                return base;
            }
            parse(code)
        }
        UserProfile {
            name: non_empty(&self.name),
            age: coded(&self.age, AgeBracket::from_code, base.age, AgeBracket::Unknown),
            gender: coded(&self.gender, Gender::from_code, base.gender, Gender::Unknown),
            employment_status: coded(
                &self.employment_status,
                EmploymentStatus::from_code,
                base.employment_status,
                EmploymentStatus::Unknown,
            ),
            region: non_empty(&self.region),
            ..base.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationToggle {
    PolicyUpdates,
    Deadlines,
    NewPolicies,
}

impl NotificationToggle {
    pub const ALL: [NotificationToggle; 3] = [
        NotificationToggle::PolicyUpdates,
        NotificationToggle::Deadlines,
        NotificationToggle::NewPolicies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NotificationToggle::PolicyUpdates => "정책 업데이트 알림",
            NotificationToggle::Deadlines => "마감일 알림",
            NotificationToggle::NewPolicies => "새 정책 알림",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NotificationToggle::PolicyUpdates => "저장한 정책의 내용이 업데이트되면 알림을 받습니다.",
            NotificationToggle::Deadlines => "저장한 정책의 신청 마감일이 다가오면 알림을 받습니다.",
            NotificationToggle::NewPolicies => "내 프로필에 맞는 새로운 정책이 추가되면 알림을 받습니다.",
        }
    }

    pub fn is_on(self, settings: &NotificationSettings) -> bool {
        match self {
            NotificationToggle::PolicyUpdates => settings.policy_updates,
            NotificationToggle::Deadlines => settings.deadlines,
            NotificationToggle::NewPolicies => settings.new_policies,
        }
    }

    /// `settings` with this toggle flipped.
    pub fn flip(self, mut settings: NotificationSettings) -> NotificationSettings {
        match self {
            NotificationToggle::PolicyUpdates => settings.policy_updates = !settings.policy_updates,
            NotificationToggle::Deadlines => settings.deadlines = !settings.deadlines,
            NotificationToggle::NewPolicies => settings.new_policies = !settings.new_policies,
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimistic::Optimistic;

    #[test]
    fn test_region_label() {
        assert_eq!(region_label("busan"), "부산");
        assert_eq!(region_label(""), UNSET);
        assert_eq!(region_label("jeju"), "jeju");
    }

    #[test]
    fn test_draft_round_trip_keeps_flags() {
        let profile = UserProfile {
            name: Some("홍길동".into()),
            age: Some(AgeBracket::Middle),
            region: Some("incheon".into()),
            notify_deadlines: true,
            ..UserProfile::default()
        };
        let mut draft = ProfileDraft::from_profile(&profile);
        assert_eq!(draft.age, "middle");
        assert_eq!(draft.gender, "");

        draft.gender = "female".into();
        draft.region = String::new();
        let updated = draft.apply_to(&profile);
        assert_eq!(updated.gender, Some(Gender::Female));
        assert_eq!(updated.region, None);
        assert_eq!(updated.age, Some(AgeBracket::Middle));
        assert!(updated.notify_deadlines);
    }

    #[test]
    fn test_unrecognised_code_survives_unrelated_edit() {
        let profile = UserProfile {
            gender: Some(Gender::Unknown),
            employment_status: Some(EmploymentStatus::Unknown),
            ..UserProfile::default()
        };
        let mut draft = ProfileDraft::from_profile(&profile);
        assert_eq!(draft.gender, "");

        draft.name = "김철수".into();
        draft.employment_status = "student".into();
        let updated = draft.apply_to(&profile);
        assert_eq!(updated.name.as_deref(), Some("김철수"));
        assert_eq!(updated.gender, Some(Gender::Unknown));
        assert_eq!(updated.employment_status, Some(EmploymentStatus::Student));
        assert_eq!(updated.age, None);
    }

    #[test]
    fn test_committed_toggle_reaches_profile_save() {
        let mut profile = UserProfile {
            name: Some("홍길동".into()),
            ..UserProfile::default()
        };
        let mut settings = Optimistic::new(NotificationSettings::from_profile(&profile));
        let next = NotificationToggle::Deadlines.flip(*settings.value());
        assert!(settings.propose(next));
        settings.settle::<&str>(&Ok(()));
        settings.value().write_to(&mut profile);

        // Reopening the panel and saving basic info both see the new flag
        assert!(NotificationToggle::Deadlines.is_on(&NotificationSettings::from_profile(&profile)));
        let mut draft = ProfileDraft::from_profile(&profile);
        draft.name = "김철수".into();
        assert!(draft.apply_to(&profile).notify_deadlines);
    }

    #[test]
    fn test_toggle_flip_with_rollback() {
        let mut settings = Optimistic::new(NotificationSettings::default());
        let next = NotificationToggle::Deadlines.flip(*settings.value());
        assert!(settings.propose(next));
        assert!(NotificationToggle::Deadlines.is_on(settings.value()));
        assert!(!NotificationToggle::NewPolicies.is_on(settings.value()));

        settings.settle(&Err("offline"));
        assert!(!NotificationToggle::Deadlines.is_on(settings.value()));
    }
}
