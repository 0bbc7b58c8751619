//! Wire models exchanged with the backend.
//!
//! The backend is not strict about identifier types (SQL integer keys for
//! users and threads, string keys for vector-indexed policies), so every id is
//! normalised to a `String` on the way in.

mod chat;
mod notification;
mod policy;
mod user;

pub use chat::{ChatMessage, ChatReply, ChatThread, Sender, Source};
pub use notification::{Notification, NotificationKind, NotificationSettings};
pub use policy::{EnhancedPolicy, Policy, SearchQuery};
pub use user::{
    AccessToken, AgeBracket, EmploymentStatus, Gender, NewAccount, RegisterReceipt, User,
    UserProfile,
};

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accept a string or a number as an identifier. `null` becomes empty.
pub(crate) fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Optional variant of [`de_id`]; empty strings and `null` become `None`.
pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let id = de_id(d)?;
    Ok(if id.is_empty() { None } else { Some(id) })
}
