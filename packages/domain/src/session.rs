//! # Session lifecycle
//!
//! [`SessionState`] is the single source of truth for "who is logged in". The
//! UI keeps one in a signal; the async flows below talk to an
//! [`AuthBackend`] and return results that the caller folds back into the
//! state, so no state borrow is held across an await.
//!
//! ```text
//!   loading ──restore──▶ anonymous ──login──▶ authenticated
//!                          ▲                      │
//!                          └──── logout / 401 ────┘
//! ```
//!
//! Invariant: the stored token and `user` agree once loading is over. A token
//! the backend rejects is cleared, and a login whose user fetch fails leaves
//! no token behind.

use api::{ApiError, AuthBackend, NewAccount, RegisterReceipt, User};

const LOGIN_FAILED: &str = "로그인에 실패했습니다.";
const BAD_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
const REGISTER_FAILED: &str = "회원가입에 실패했습니다.";

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    /// True until the stored token has been checked.
    pub loading: bool,
    /// Last login / registration failure, shown inline on the form.
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl SessionState {
    /// State after the initial token check.
    pub fn resolved(user: Option<User>) -> Self {
        Self {
            user,
            loading: false,
            error: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Fold a [`login`] result in. Returns whether the user is now logged in.
    pub fn apply_login(&mut self, outcome: Result<User, ApiError>) -> bool {
        match outcome {
            Ok(user) => {
                *self = Self::resolved(Some(user));
                true
            }
            Err(e) => {
                self.error = Some(match e {
                    ApiError::Unauthorized => BAD_CREDENTIALS.to_string(),
                    other => other.user_message(LOGIN_FAILED),
                });
                false
            }
        }
    }

    /// Fold a [`register`] result in. Registration never logs the user in.
    pub fn apply_register(&mut self, outcome: &Result<RegisterReceipt, ApiError>) -> bool {
        match outcome {
            Ok(_) => {
                self.error = None;
                true
            }
            Err(e) => {
                self.error = Some(e.user_message(REGISTER_FAILED));
                false
            }
        }
    }

    /// The backend rejected our token mid-session.
    pub fn expire(&mut self) {
        if self.user.is_some() {
            tracing::info!("Session expired");
        }
        *self = Self::resolved(None);
    }
}

/// Resolve the stored token (if any) to a user. A rejected token is cleared.
pub async fn restore<B: AuthBackend>(backend: &B) -> Option<User> {
    if !backend.tokens().has_token() {
        return None;
    }
    match backend.current_user().await {
        Ok(user) => {
            tracing::debug!("Restored session for {}", user.email);
            Some(user)
        }
        Err(e) => {
            tracing::info!("Stored token not accepted ({e}), clearing it");
            backend.tokens().clear();
            None
        }
    }
}

/// Exchange credentials for a token, persist it, then fetch the user.
pub async fn login<B: AuthBackend>(backend: &B, email: &str, password: &str) -> Result<User, ApiError> {
    let token = backend.login(email.trim(), password).await?;
    backend.tokens().save(&token.access_token);
    match backend.current_user().await {
        Ok(user) => {
            tracing::info!("Logged in as {}", user.email);
            Ok(user)
        }
        Err(e) => {
            tracing::warn!("Login succeeded but user fetch failed: {e}");
            backend.tokens().clear();
            Err(e)
        }
    }
}

pub async fn register<B: AuthBackend>(
    backend: &B,
    account: &NewAccount,
) -> Result<RegisterReceipt, ApiError> {
    let receipt = backend.register(account).await?;
    tracing::info!("Registered {}", account.email);
    Ok(receipt)
}

/// Forget the token and the user. Purely local; there is no logout endpoint.
pub fn logout<B: AuthBackend>(backend: &B, state: &mut SessionState) {
    backend.tokens().clear();
    *state = SessionState::resolved(None);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, GOOD_TOKEN};
    use api::UserProfile;
    use store::TokenStore;

    #[test]
    fn test_default_is_loading() {
        let state = SessionState::default();
        assert!(state.loading);
        assert!(!state.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_without_token_skips_backend() {
        let backend = FakeBackend {
            fail_me: true,
            ..FakeBackend::with_user("a@b.kr", "password1")
        };
        assert!(restore(&backend).await.is_none());
    }

    #[tokio::test]
    async fn test_restore_valid_token() {
        let backend = FakeBackend::with_user("a@b.kr", "password1");
        backend.tokens.save(GOOD_TOKEN);
        let user = restore(&backend).await.unwrap();
        assert_eq!(user.email, "a@b.kr");
        assert!(backend.tokens.has_token());
    }

    #[tokio::test]
    async fn test_restore_rejected_token_is_cleared() {
        let backend = FakeBackend::with_user("a@b.kr", "password1");
        backend.tokens.save("stale");
        assert!(restore(&backend).await.is_none());
        assert!(!backend.tokens.has_token());
    }

    #[tokio::test]
    async fn test_login_persists_token() {
        let backend = FakeBackend::with_user("a@b.kr", "password1");
        let mut state = SessionState::resolved(None);

        let outcome = login(&backend, " a@b.kr ", "password1").await;
        assert!(state.apply_login(outcome));
        assert!(state.is_authenticated());
        assert_eq!(backend.tokens.load().as_deref(), Some(GOOD_TOKEN));
    }

    #[tokio::test]
    async fn test_login_bad_credentials() {
        let backend = FakeBackend::with_user("a@b.kr", "password1");
        let mut state = SessionState::resolved(None);

        let outcome = login(&backend, "a@b.kr", "wrong").await;
        assert!(!state.apply_login(outcome));
        assert!(!state.is_authenticated());
        assert_eq!(state.error.as_deref(), Some(BAD_CREDENTIALS));
        assert!(!backend.tokens.has_token());
    }

    #[tokio::test]
    async fn test_login_user_fetch_failure_leaves_no_token() {
        let backend = FakeBackend {
            fail_me: true,
            ..FakeBackend::with_user("a@b.kr", "password1")
        };
        let mut state = SessionState::resolved(None);

        let outcome = login(&backend, "a@b.kr", "password1").await;
        assert!(!state.apply_login(outcome));
        assert!(!backend.tokens.has_token());
        assert!(state.error.is_some());
    }

    #[tokio::test]
    async fn test_register_does_not_log_in() {
        let backend = FakeBackend::default();
        let mut state = SessionState::resolved(None);
        let account = NewAccount {
            email: "new@b.kr".into(),
            password: "password1".into(),
            full_name: "새 사용자".into(),
            profile: UserProfile::default(),
        };

        let outcome = register(&backend, &account).await;
        assert!(state.apply_register(&outcome));
        assert!(!state.is_authenticated());
        assert!(!backend.tokens.has_token());
    }

    #[tokio::test]
    async fn test_register_error_uses_backend_detail() {
        let backend = FakeBackend {
            register_error: Some(ApiError::Status {
                status: 400,
                detail: "이미 등록된 이메일입니다.".into(),
            }),
            ..FakeBackend::default()
        };
        let mut state = SessionState::resolved(None);
        let account = NewAccount {
            email: "dup@b.kr".into(),
            password: "password1".into(),
            full_name: "중복".into(),
            profile: UserProfile::default(),
        };

        let outcome = register(&backend, &account).await;
        assert!(!state.apply_register(&outcome));
        assert_eq!(state.error.as_deref(), Some("이미 등록된 이메일입니다."));
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let backend = FakeBackend::with_user("a@b.kr", "password1");
        let mut state = SessionState::resolved(None);
        let outcome = login(&backend, "a@b.kr", "password1").await;
        state.apply_login(outcome);

        logout(&backend, &mut state);
        assert!(!state.is_authenticated());
        assert!(!state.loading);
        assert!(!backend.tokens.has_token());
    }

    #[test]
    fn test_expire_drops_user() {
        let mut state = SessionState::resolved(Some(User::default()));
        state.expire();
        assert!(!state.is_authenticated());
        assert!(!state.loading);
    }
}
