//! Session context and hooks for the UI.

use api::ApiClient;
use dioxus::prelude::*;
use domain::{EnhancementCache, SessionState};
use store::{ClientConfig, UiConfig};

use crate::make_token_store;

/// Get the current session state.
/// Returns a signal that updates on login, logout and session expiry.
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// The backend client shared by every view.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Enhanced policy info fetched so far, kept for the whole app lifetime.
pub fn use_enhancements() -> Signal<EnhancementCache> {
    use_context::<Signal<EnhancementCache>>()
}

pub fn use_ui_config() -> UiConfig {
    use_context::<UiConfig>()
}

/// Provider component that owns the session.
/// Wrap your app with this component; it restores a stored token on mount.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Element) -> Element {
    let session = use_signal(SessionState::default);

    let client = use_hook(|| {
        tracing::info!("Backend at {}", config.api_root());
        ApiClient::new(&config, make_token_store()).with_unauthorized_hook(move || {
            let mut session = session;
            session.write().expire();
        })
    });

    // Resolve the stored token (if any) on mount
    let restore_client = client.clone();
    let _ = use_resource(move || {
        let client = restore_client.clone();
        let mut session = session;
        async move {
            let user = domain::session::restore(&client).await;
            session.set(SessionState::resolved(user));
        }
    });

    use_context_provider(|| session);
    use_context_provider(|| client);
    use_context_provider(|| config.ui.clone());
    use_context_provider(|| Signal::new(EnhancementCache::new()));

    rsx! {
        {children}
    }
}
