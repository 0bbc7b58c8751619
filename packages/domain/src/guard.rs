//! Route access decisions.
//!
//! Guards never decide while the session is still loading; they wait, so a
//! reload on a protected page does not bounce through the login screen.

use crate::session::SessionState;

pub const HOME_PATH: &str = "/";
const GUEST_PATHS: &[&str] = &["/login", "/register"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session check still running; render a placeholder.
    Wait,
    Allow,
    /// Send the visitor to the login page, remembering where they wanted to go.
    ToLogin { from: String },
    ToHome,
}

/// Pages that need an authenticated user.
pub fn protected_access(state: &SessionState, requested: &str) -> GuardDecision {
    if state.loading {
        GuardDecision::Wait
    } else if state.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::ToLogin {
            from: requested.to_string(),
        }
    }
}

/// Login and registration pages.
pub fn guest_access(state: &SessionState) -> GuardDecision {
    if state.loading {
        GuardDecision::Wait
    } else if state.is_authenticated() {
        GuardDecision::ToHome
    } else {
        GuardDecision::Allow
    }
}

/// Where to go after a successful login. Only local, non-guest paths are
/// honoured; anything else lands on the home page.
pub fn post_login_target(redirect: &str) -> &str {
    let redirect = redirect.trim();
    let path = redirect.split(['?', '#']).next().unwrap_or_default();
    let local = redirect.starts_with('/') && !redirect.starts_with("//") && !redirect.contains('\\');
    if !local || GUEST_PATHS.contains(&path.trim_end_matches('/')) {
        HOME_PATH
    } else {
        redirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::User;

    fn logged_in() -> SessionState {
        SessionState::resolved(Some(User::default()))
    }

    #[test]
    fn test_loading_waits() {
        let state = SessionState::default();
        assert_eq!(protected_access(&state, "/chat"), GuardDecision::Wait);
        assert_eq!(guest_access(&state), GuardDecision::Wait);
    }

    #[test]
    fn test_anonymous_redirected_with_origin() {
        let state = SessionState::resolved(None);
        assert_eq!(
            protected_access(&state, "/chat/42"),
            GuardDecision::ToLogin {
                from: "/chat/42".into()
            }
        );
        assert_eq!(guest_access(&state), GuardDecision::Allow);
    }

    #[test]
    fn test_authenticated() {
        let state = logged_in();
        assert_eq!(protected_access(&state, "/profile"), GuardDecision::Allow);
        assert_eq!(guest_access(&state), GuardDecision::ToHome);
    }

    #[test]
    fn test_post_login_target() {
        assert_eq!(post_login_target("/chat/42"), "/chat/42");
        assert_eq!(post_login_target("/policies?q=청년"), "/policies?q=청년");
        assert_eq!(post_login_target(""), HOME_PATH);
        assert_eq!(post_login_target("https://evil.example"), HOME_PATH);
        assert_eq!(post_login_target("//evil.example"), HOME_PATH);
        assert_eq!(post_login_target("/login"), HOME_PATH);
        assert_eq!(post_login_target("/register/"), HOME_PATH);
    }
}
