//! # Backend capabilities
//!
//! The session, chat and policy logic in the `domain` crate is written against
//! these traits rather than against [`crate::ApiClient`] directly, so it can be
//! driven by in-memory fakes in tests. [`crate::ApiClient`] implements all four.
//!
//! | Trait | Endpoints |
//! |-------|-----------|
//! | [`AuthBackend`] | `/auth/login`, `/auth/register`, `/auth/me` + token persistence |
//! | [`PolicyBackend`] | `/policies/*` |
//! | [`ChatBackend`] | `/chat/*` |
//! | [`ProfileBackend`] | `/profiles/me*` |

use std::future::Future;

use store::TokenStore;

use crate::error::ApiError;
use crate::models::*;

/// Authentication endpoints and the bearer token they produce.
pub trait AuthBackend {
    /// Exchange credentials for a bearer token. Does not persist it.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AccessToken, ApiError>>;
    fn register(
        &self,
        account: &NewAccount,
    ) -> impl Future<Output = Result<RegisterReceipt, ApiError>>;
    /// Resolve the user owning the current token.
    fn current_user(&self) -> impl Future<Output = Result<User, ApiError>>;
    /// Where the bearer token is kept.
    fn tokens(&self) -> &dyn TokenStore;
}

pub trait PolicyBackend {
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<Vec<Policy>, ApiError>>;
    /// Rule-based recommendations for the current profile.
    fn recommend(&self) -> impl Future<Output = Result<Vec<Policy>, ApiError>>;
    /// Vector-similarity recommendations for an explicit profile.
    fn recommend_vector(
        &self,
        profile: &UserProfile,
    ) -> impl Future<Output = Result<Vec<Policy>, ApiError>>;
    /// Recommendations precomputed by the backend.
    fn recommended(&self) -> impl Future<Output = Result<Vec<Policy>, ApiError>>;
    fn refresh_recommendations(&self) -> impl Future<Output = Result<(), ApiError>>;
    fn save_policy(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn unsave_policy(&self, id: &str) -> impl Future<Output = Result<(), ApiError>>;
    fn saved_policies(&self) -> impl Future<Output = Result<Vec<Policy>, ApiError>>;
    fn enhance(
        &self,
        id: &str,
        content: &str,
    ) -> impl Future<Output = Result<EnhancedPolicy, ApiError>>;
}

pub trait ChatBackend {
    /// Threads, most recent first.
    fn list_threads(&self) -> impl Future<Output = Result<Vec<ChatThread>, ApiError>>;
    fn create_thread(&self, title: &str) -> impl Future<Output = Result<ChatThread, ApiError>>;
    fn thread_messages(
        &self,
        thread_id: &str,
    ) -> impl Future<Output = Result<Vec<ChatMessage>, ApiError>>;
    fn send_message(
        &self,
        thread_id: &str,
        query: &str,
    ) -> impl Future<Output = Result<ChatReply, ApiError>>;
    fn delete_thread(&self, thread_id: &str) -> impl Future<Output = Result<(), ApiError>>;
}

pub trait ProfileBackend {
    fn my_profile(&self) -> impl Future<Output = Result<UserProfile, ApiError>>;
    fn update_profile(&self, profile: &UserProfile) -> impl Future<Output = Result<(), ApiError>>;
    fn notifications(&self) -> impl Future<Output = Result<Vec<Notification>, ApiError>>;
    fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> impl Future<Output = Result<(), ApiError>>;
}
