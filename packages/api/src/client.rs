//! # HTTP client for the policy backend
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] and implements every trait in
//! [`crate::backend`]. It is cheap to clone (shared handles only) so the UI
//! can hand a copy to each spawned task.
//!
//! ## Bearer token
//!
//! The token is read from the [`TokenStore`] when each request is built, so a
//! login or logout is visible to the very next call without rebuilding the
//! client.
//!
//! ## 401 handling
//!
//! Any 401 (except from the login endpoint itself, where it just means "wrong
//! password") clears the stored token and fires the unauthorized hook. The UI
//! installs a hook that expires the session; the route guards then send the
//! user to the login view.

use std::rc::Rc;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{ClientConfig, TokenStore};

use crate::backend::{AuthBackend, ChatBackend, PolicyBackend, ProfileBackend};
use crate::error::{detail_from_body, ApiError};
use crate::models::*;

/// Whether a 401 from this request should end the session.
#[derive(Clone, Copy, PartialEq)]
enum OnUnauthorized {
    ExpireSession,
    Ignore,
}

/// Backend client shared by all views.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    root: String,
    tokens: Rc<dyn TokenStore>,
    on_unauthorized: Option<Rc<dyn Fn()>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("root", &self.root)
            .field("has_token", &self.tokens.has_token())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            root: config.api_root(),
            tokens,
            on_unauthorized: None,
        }
    }

    /// Install the callback run after a 401 has cleared the token.
    pub fn with_unauthorized_hook(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    /// Absolute URL of an endpoint path such as `"chat/list"`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.tokens.load() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn expire_session(&self) {
        self.tokens.clear();
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        on_unauthorized: OnUnauthorized,
    ) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request failed before a response: {}", e);
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(self.on_failure(status.as_u16(), &path, &body, on_unauthorized))
    }

    /// Turn a non-success response into an error, expiring the session on a
    /// 401 unless the request opted out.
    fn on_failure(
        &self,
        status: u16,
        path: &str,
        body: &str,
        on_unauthorized: OnUnauthorized,
    ) -> ApiError {
        let error = ApiError::from_status(status, detail_from_body(body));
        if error.is_unauthorized() && on_unauthorized == OnUnauthorized::ExpireSession {
            tracing::warn!("401 from {}; clearing session", path);
            self.expire_session();
        } else {
            tracing::warn!("{} {} -> {}", status, path, error);
        }
        error
    }

    async fn fetch_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(builder, OnUnauthorized::ExpireSession).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn fetch_empty(&self, builder: RequestBuilder) -> Result<(), ApiError> {
        self.send(builder, OnUnauthorized::ExpireSession)
            .await
            .map(|_| ())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.fetch_json(self.request(Method::GET, path)).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.fetch_json(self.request(Method::POST, path).json(body))
            .await
    }
}

impl AuthBackend for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        // OAuth2 password form; the backend names the email field `username`.
        let builder = self
            .http
            .post(self.url("auth/login"))
            .form(&[("username", email), ("password", password)]);
        let response = self.send(builder, OnUnauthorized::Ignore).await?;
        response
            .json::<AccessToken>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn register(&self, account: &NewAccount) -> Result<RegisterReceipt, ApiError> {
        self.post_json("auth/register", account).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("auth/me").await
    }

    fn tokens(&self) -> &dyn TokenStore {
        self.tokens.as_ref()
    }
}

impl PolicyBackend for ApiClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Policy>, ApiError> {
        let builder = self
            .request(Method::GET, "policies/search")
            .query(&query.to_params());
        self.fetch_json(builder).await
    }

    async fn recommend(&self) -> Result<Vec<Policy>, ApiError> {
        self.get_json("policies/recommend").await
    }

    async fn recommend_vector(&self, profile: &UserProfile) -> Result<Vec<Policy>, ApiError> {
        self.post_json("policies/recommend-vector", profile).await
    }

    async fn recommended(&self) -> Result<Vec<Policy>, ApiError> {
        self.get_json("policies/recommended").await
    }

    async fn refresh_recommendations(&self) -> Result<(), ApiError> {
        self.fetch_empty(self.request(Method::POST, "policies/refresh-recommendations"))
            .await
    }

    async fn save_policy(&self, id: &str) -> Result<(), ApiError> {
        self.fetch_empty(self.request(Method::POST, &format!("policies/save/{id}")))
            .await
    }

    async fn unsave_policy(&self, id: &str) -> Result<(), ApiError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("policies/save/{id}")))
            .await
    }

    async fn saved_policies(&self) -> Result<Vec<Policy>, ApiError> {
        self.get_json("policies/saved").await
    }

    async fn enhance(&self, id: &str, content: &str) -> Result<EnhancedPolicy, ApiError> {
        #[derive(Serialize)]
        struct EnhanceRequest<'a> {
            policy_id: &'a str,
            policy_content: &'a str,
        }
        self.post_json(
            "policies/enhance",
            &EnhanceRequest {
                policy_id: id,
                policy_content: content,
            },
        )
        .await
    }
}

impl ChatBackend for ApiClient {
    async fn list_threads(&self) -> Result<Vec<ChatThread>, ApiError> {
        self.get_json("chat/list").await
    }

    async fn create_thread(&self, title: &str) -> Result<ChatThread, ApiError> {
        #[derive(Serialize)]
        struct CreateThread<'a> {
            title: &'a str,
        }
        self.post_json("chat/create", &CreateThread { title }).await
    }

    async fn thread_messages(&self, thread_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.get_json(&format!("chat/{thread_id}/messages")).await
    }

    async fn send_message(&self, thread_id: &str, query: &str) -> Result<ChatReply, ApiError> {
        #[derive(Serialize)]
        struct Ask<'a> {
            query: &'a str,
        }
        self.post_json(&format!("chat/{thread_id}/message"), &Ask { query })
            .await
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<(), ApiError> {
        self.fetch_empty(self.request(Method::DELETE, &format!("chat/{thread_id}")))
            .await
    }
}

impl ProfileBackend for ApiClient {
    async fn my_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("profiles/me").await
    }

    async fn update_profile(&self, profile: &UserProfile) -> Result<(), ApiError> {
        self.fetch_empty(self.request(Method::PUT, "profiles/me").json(profile))
            .await
    }

    async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get_json("profiles/me/notifications").await
    }

    async fn update_notification_settings(
        &self,
        settings: &NotificationSettings,
    ) -> Result<(), ApiError> {
        self.fetch_empty(
            self.request(Method::PUT, "profiles/me/notifications/settings")
                .json(settings),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use reqwest::header::AUTHORIZATION;
    use store::MemoryTokenStore;

    use super::*;

    fn client_with(tokens: MemoryTokenStore) -> ApiClient {
        let config = ClientConfig::new("http://backend.test:8000/".to_string());
        ApiClient::new(&config, Rc::new(tokens))
    }

    #[test]
    fn test_url_joins_root_and_path() {
        let client = client_with(MemoryTokenStore::new());
        assert_eq!(client.url("chat/list"), "http://backend.test:8000/api/v1/chat/list");
        assert_eq!(client.url("/auth/me"), "http://backend.test:8000/api/v1/auth/me");
    }

    #[test]
    fn test_bearer_token_read_at_request_time() {
        let tokens = MemoryTokenStore::new();
        let client = client_with(tokens.clone());

        let request = client.request(Method::GET, "auth/me").build().unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());

        tokens.save("abc123");
        let request = client.request(Method::GET, "auth/me").build().unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer abc123"
        );
    }

    #[test]
    fn test_search_query_string() {
        let client = client_with(MemoryTokenStore::new());
        let query = SearchQuery {
            q: "청년".to_string(),
            employment: "unemployed".to_string(),
            ..SearchQuery::default()
        };
        let request = client
            .request(Method::GET, "policies/search")
            .query(&query.to_params())
            .build()
            .unwrap();
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("q".to_string(), "청년".to_string()),
                ("employment".to_string(), "unemployed".to_string())
            ]
        );
    }

    fn counting_client(tokens: MemoryTokenStore) -> (ApiClient, Rc<Cell<u32>>) {
        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        let client = client_with(tokens).with_unauthorized_hook(move || {
            counter.set(counter.get() + 1);
        });
        (client, fired)
    }

    #[test]
    fn test_401_clears_token_and_runs_hook() {
        let tokens = MemoryTokenStore::with_token("stale");
        let (client, fired) = counting_client(tokens.clone());

        let error = client.on_failure(
            401,
            "/api/v1/auth/me",
            r#"{"detail":"Could not validate credentials"}"#,
            OnUnauthorized::ExpireSession,
        );

        assert_eq!(error, ApiError::Unauthorized);
        assert!(!tokens.has_token());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_401_from_login_keeps_session() {
        let tokens = MemoryTokenStore::with_token("kept");
        let (client, fired) = counting_client(tokens.clone());

        let error = client.on_failure(
            401,
            "/api/v1/auth/login",
            r#"{"detail":"Incorrect email or password"}"#,
            OnUnauthorized::Ignore,
        );

        assert_eq!(error, ApiError::Unauthorized);
        assert_eq!(tokens.load().as_deref(), Some("kept"));
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_other_failures_keep_session() {
        let tokens = MemoryTokenStore::with_token("kept");
        let (client, fired) = counting_client(tokens.clone());

        let missing = client.on_failure(404, "/api/v1/chat/9", "", OnUnauthorized::ExpireSession);
        assert_eq!(missing, ApiError::NotFound);

        let broken = client.on_failure(
            500,
            "/api/v1/policies/search",
            r#"{"detail":"검색 실패"}"#,
            OnUnauthorized::ExpireSession,
        );
        assert_eq!(
            broken,
            ApiError::Status {
                status: 500,
                detail: "검색 실패".to_string()
            }
        );

        assert!(tokens.has_token());
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_clones_share_token_store() {
        let tokens = MemoryTokenStore::new();
        let client = client_with(tokens.clone());
        let copy = client.clone();

        client.tokens().save("shared");
        assert_eq!(copy.tokens().load().as_deref(), Some("shared"));
        assert!(format!("{copy:?}").contains("has_token: true"));
    }
}
