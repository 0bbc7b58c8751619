//! # Client configuration: `policy-assistant.toml`
//!
//! Where the backend lives and a few UI timings. The desktop launcher reads the
//! file from the platform config directory; the web build only uses the
//! defaults plus a compile-time override.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8000"   # backend origin
//! prefix = "/api/v1"                   # path prefix of every endpoint
//!
//! [ui]
//! enhancement_tick_ms = 400            # ellipsis animation step while a summary loads
//! ```
//!
//! All structs derive `Default` so that a missing or empty file is equivalent
//! to the default configuration. The `POLICY_API_URL` environment variable
//! (see [`ClientConfig::with_env_override`]) replaces `api.base_url`.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "POLICY_API_URL";

/// Top-level configuration stored in `policy-assistant.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
        }
    }
}

/// UI timings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Milliseconds between frames of the "loading..." ellipsis.
    #[serde(default = "default_enhancement_tick")]
    pub enhancement_tick_ms: u32,
}

fn default_enhancement_tick() -> u32 {
    400
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            enhancement_tick_ms: default_enhancement_tick(),
        }
    }
}

impl ClientConfig {
    /// Create a config pointing at `base_url` with default prefix and timings.
    pub fn new(base_url: String) -> Self {
        Self {
            api: ApiConfig {
                base_url,
                ..ApiConfig::default()
            },
            ui: UiConfig::default(),
        }
    }

    /// Builder method to replace the base URL when an override is present.
    /// Blank overrides are ignored.
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "policy-assistant.toml"
    }

    /// Base URL joined with the prefix, without a trailing slash:
    /// `http://localhost:8000/api/v1`.
    pub fn api_root(&self) -> String {
        let base = self.api.base_url.trim_end_matches('/');
        let prefix = self.api.prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Default location of the config file on native platforms.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("policy-assistant").join(Self::filename()))
    }

    /// Read the config file at `path`. A missing file yields the defaults; an
    /// unparsable one is logged and also yields the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_root(), "http://localhost:8000/api/v1");
        assert_eq!(config.ui.enhancement_tick_ms, 400);
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://policy.example.kr/"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.prefix, "/api/v1");
        assert_eq!(config.api_root(), "https://policy.example.kr/api/v1");
    }

    #[test]
    fn test_empty_prefix() {
        let mut config = ClientConfig::new("http://127.0.0.1:9000".to_string());
        config.api.prefix = String::new();
        assert_eq!(config.api_root(), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_env_override() {
        let config = ClientConfig::default()
            .with_env_override(Some("http://backend:8000".to_string()));
        assert_eq!(config.api.base_url, "http://backend:8000");

        let untouched = ClientConfig::default().with_env_override(Some("  ".to_string()));
        assert_eq!(untouched.api.base_url, "http://localhost:8000");

        let none = ClientConfig::default().with_env_override(None);
        assert_eq!(none, ClientConfig::default());
    }

    #[test]
    fn test_toml_roundtrip_keeps_values() {
        let mut config = ClientConfig::new("http://10.0.0.2:8000".to_string());
        config.ui.enhancement_tick_ms = 250;
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_or_invalid_file() {
        let dir = std::env::temp_dir().join(format!("policy_assistant_cfg_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let missing = dir.join("missing.toml");
        assert_eq!(ClientConfig::load(&missing), ClientConfig::default());

        let invalid = dir.join("invalid.toml");
        std::fs::write(&invalid, "[api\nbase_url = 3").unwrap();
        assert_eq!(ClientConfig::load(&invalid), ClientConfig::default());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
