//! Notifications and the three notification preference toggles.

use serde::{Deserialize, Serialize};

use super::{de_id, UserProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[serde(alias = "policy_update")]
    Update,
    Deadline,
    #[serde(alias = "new_policy")]
    New,
    #[default]
    #[serde(other)]
    Other,
}

impl NotificationKind {
    pub fn icon(self) -> &'static str {
        match self {
            NotificationKind::Update => "🔄",
            NotificationKind::Deadline => "⏰",
            NotificationKind::New => "🆕",
            NotificationKind::Other => "🔔",
        }
    }
}

/// An entry of `GET /profiles/me/notifications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: NotificationKind,
    #[serde(default, alias = "content")]
    pub message: String,
    #[serde(default, alias = "createdAt")]
    pub created_at: String,
}

/// Body of `PUT /profiles/me/notifications/settings`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub policy_updates: bool,
    pub deadlines: bool,
    pub new_policies: bool,
}

impl NotificationSettings {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            policy_updates: profile.notify_policy_updates,
            deadlines: profile.notify_deadlines,
            new_policies: profile.notify_new_policies,
        }
    }

    /// Copy these flags back onto a profile once the backend accepted them.
    pub fn write_to(&self, profile: &mut UserProfile) {
        profile.notify_policy_updates = self.policy_updates;
        profile.notify_deadlines = self.deadlines;
        profile.notify_new_policies = self.new_policies;
    }
}
