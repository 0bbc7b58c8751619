//! # Bearer-token persistence
//!
//! The backend issues an opaque bearer token on login. It is the one piece of
//! client state kept across reloads, so every platform needs somewhere to put
//! it:
//!
//! | Store | Platform | Backing |
//! |-------|----------|---------|
//! | [`crate::MemoryTokenStore`] | tests, fallback | process memory |
//! | [`crate::FileTokenStore`] | desktop | `<data_dir>/policy-assistant/token` |
//! | [`crate::LocalTokenStore`] | web (`web` feature) | browser `localStorage["token"]` |
//!
//! ## Error handling
//!
//! Implementations never fail. An unreadable or unwritable backing store
//! degrades to "no token", which simply means the user has to log in again.

/// Synchronous storage for the current bearer token.
///
/// The HTTP client reads the token at request time and the session flows
/// write it on login, logout and 401, so all methods take `&self`.
pub trait TokenStore {
    /// The stored token, if any. Blank values are treated as absent.
    fn load(&self) -> Option<String>;

    /// Replace the stored token.
    fn save(&self, token: &str);

    /// Forget the stored token.
    fn clear(&self);

    fn has_token(&self) -> bool {
        self.load().is_some()
    }
}

/// Normalise a raw stored value: trims and drops empty strings.
pub(crate) fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_drops_blank_values() {
        assert_eq!(normalize("  "), None);
        assert_eq!(normalize(""), None);
        assert_eq!(normalize(" abc\n"), Some("abc".to_string()));
    }
}
