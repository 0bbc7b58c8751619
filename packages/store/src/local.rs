//! # Browser `localStorage` token store
//!
//! [`LocalTokenStore`] is the [`TokenStore`] used on the web platform. The token
//! lives under a single key (default `"token"`) so it survives page reloads
//! but not a cleared browser profile.
//!
//! Every call re-resolves `window.localStorage`; when storage is unavailable
//! (private mode, sandboxed iframe) reads return `None` and writes are dropped.

use web_sys::Storage;

use crate::token::{normalize, TokenStore};

const DEFAULT_KEY: &str = "token";

/// `localStorage`-backed TokenStore for the web platform.
#[derive(Clone, Debug)]
pub struct LocalTokenStore {
    key: String,
}

impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalTokenStore {
    pub fn new() -> Self {
        Self::with_key(DEFAULT_KEY)
    }

    pub fn with_key(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    fn storage() -> Option<Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Option<String> {
        let storage = Self::storage()?;
        let raw = storage.get_item(&self.key).ok().flatten()?;
        normalize(&raw)
    }

    fn save(&self, token: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable; token not persisted");
            return;
        };
        let _ = storage.set_item(&self.key, token);
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}
