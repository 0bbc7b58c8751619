//! # Filesystem-backed token store
//!
//! [`FileTokenStore`] keeps the bearer token in a single file so the desktop
//! build stays logged in across restarts.
//!
//! ## Platform data directories
//!
//! [`FileTokenStore::in_data_dir`] resolves the location with [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/policy-assistant/token` |
//! | Linux | `~/.local/share/policy-assistant/token` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\policy-assistant\token` |

use std::path::PathBuf;

use crate::token::{normalize, TokenStore};

const APP_DIR: &str = "policy-assistant";
const TOKEN_FILE: &str = "token";

/// Filesystem-backed TokenStore for desktop persistence.
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store the token under the platform data directory, falling back to the
    /// working directory when none is known.
    pub fn in_data_dir() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join(APP_DIR).join(TOKEN_FILE))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        normalize(&content)
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!("Failed to persist token to {}: {}", self.path.display(), e);
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove token file {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("policy_assistant_test_{}_{}", std::process::id(), name))
            .join(TOKEN_FILE)
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let store = FileTokenStore::new(path.clone());
        assert!(store.load().is_none());
        store.save("bearer-123");

        // Re-open from the same path
        let store2 = FileTokenStore::new(path.clone());
        assert_eq!(store2.load().as_deref(), Some("bearer-123"));

        store2.clear();
        assert!(store.load().is_none());

        // Clearing twice is harmless
        store.clear();

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_file_with_whitespace_only_is_empty() {
        let path = temp_path("blank");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "\n  \n").unwrap();

        let store = FileTokenStore::new(path.clone());
        assert!(!store.has_token());

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
