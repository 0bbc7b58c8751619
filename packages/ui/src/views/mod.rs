//! Shared page views. Platform crates wrap these with their router.

mod guard;
pub use guard::{GuestOnlyView, LoadingView, RequireSessionView};

mod home;
pub use home::HomeView;

mod login;
pub use login::LoginView;

mod register;
pub use register::RegisterView;

mod search;
pub use search::SearchView;

mod chat;
pub use chat::{ChatIndexView, ChatView};

mod profile;
pub use profile::ProfileView;

mod not_found;
pub use not_found::NotFoundView;

/// State of a list fetched for display.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Load<T> {
    Loading,
    Ready(T),
    Failed(String),
}
