//! In-memory backend used by the unit tests of this crate.

use std::cell::{Cell, RefCell};

use api::*;
use store::{MemoryTokenStore, TokenStore};

pub const GOOD_TOKEN: &str = "good-token";

#[derive(Default)]
pub struct FakeBackend {
    pub tokens: MemoryTokenStore,
    pub user: Option<User>,
    pub password: String,
    /// Fail `current_user` even for a valid token.
    pub fail_me: bool,
    pub register_error: Option<ApiError>,
    pub threads: RefCell<Vec<ChatThread>>,
    pub messages: RefCell<Vec<(String, String)>>,
    pub fail_create: bool,
    pub fail_send: bool,
    pub created: Cell<u32>,
    pub fail_save: bool,
    pub saved: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub fn with_user(email: &str, password: &str) -> Self {
        Self {
            user: Some(User {
                id: "1".into(),
                email: email.into(),
                full_name: Some("홍길동".into()),
                profile: None,
            }),
            password: password.into(),
            ..Self::default()
        }
    }
}

impl AuthBackend for FakeBackend {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken, ApiError> {
        match &self.user {
            Some(user) if user.email == email && self.password == password => Ok(AccessToken {
                access_token: GOOD_TOKEN.into(),
                token_type: "bearer".into(),
            }),
            _ => Err(ApiError::Unauthorized),
        }
    }

    async fn register(&self, account: &NewAccount) -> Result<RegisterReceipt, ApiError> {
        if let Some(e) = &self.register_error {
            return Err(e.clone());
        }
        Ok(RegisterReceipt {
            message: format!("{} registered", account.email),
            user_id: Some("2".into()),
        })
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        if self.fail_me {
            return Err(ApiError::Network("offline".into()));
        }
        match (self.tokens.load().as_deref(), &self.user) {
            (Some(GOOD_TOKEN), Some(user)) => Ok(user.clone()),
            _ => Err(ApiError::Unauthorized),
        }
    }

    fn tokens(&self) -> &dyn TokenStore {
        &self.tokens
    }
}

impl ChatBackend for FakeBackend {
    async fn list_threads(&self) -> Result<Vec<ChatThread>, ApiError> {
        Ok(self.threads.borrow().clone())
    }

    async fn create_thread(&self, title: &str) -> Result<ChatThread, ApiError> {
        if self.fail_create {
            return Err(ApiError::Network("offline".into()));
        }
        self.created.set(self.created.get() + 1);
        let thread = ChatThread {
            id: format!("t{}", self.created.get()),
            title: title.into(),
            created_at: "2025-03-01T10:00:00".into(),
        };
        self.threads.borrow_mut().insert(0, thread.clone());
        Ok(thread)
    }

    async fn thread_messages(&self, thread_id: &str) -> Result<Vec<ChatMessage>, ApiError> {
        if !self.threads.borrow().iter().any(|t| t.id == thread_id) {
            return Err(ApiError::NotFound);
        }
        Ok(self
            .messages
            .borrow()
            .iter()
            .filter(|(t, _)| t == thread_id)
            .map(|(_, text)| ChatMessage {
                sender: Sender::User,
                text: text.clone(),
                ..ChatMessage::default()
            })
            .collect())
    }

    async fn send_message(&self, thread_id: &str, query: &str) -> Result<ChatReply, ApiError> {
        if self.fail_send {
            return Err(ApiError::Status {
                status: 500,
                detail: String::new(),
            });
        }
        self.messages
            .borrow_mut()
            .push((thread_id.to_string(), query.to_string()));
        Ok(ChatReply {
            answer: format!("answer to {query}"),
            sources: vec![Source {
                page: "12".into(),
                text: "근거".into(),
                similarity: Some(0.9),
            }],
        })
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<(), ApiError> {
        self.threads.borrow_mut().retain(|t| t.id != thread_id);
        Ok(())
    }
}

impl PolicyBackend for FakeBackend {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<Policy>, ApiError> {
        Ok(Vec::new())
    }

    async fn recommend(&self) -> Result<Vec<Policy>, ApiError> {
        Ok(Vec::new())
    }

    async fn recommend_vector(&self, _profile: &UserProfile) -> Result<Vec<Policy>, ApiError> {
        Ok(Vec::new())
    }

    async fn recommended(&self) -> Result<Vec<Policy>, ApiError> {
        Ok(Vec::new())
    }

    async fn refresh_recommendations(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn save_policy(&self, id: &str) -> Result<(), ApiError> {
        if self.fail_save {
            return Err(ApiError::Network("offline".into()));
        }
        self.saved.borrow_mut().push(id.to_string());
        Ok(())
    }

    async fn unsave_policy(&self, id: &str) -> Result<(), ApiError> {
        if self.fail_save {
            return Err(ApiError::Network("offline".into()));
        }
        self.saved.borrow_mut().retain(|s| s != id);
        Ok(())
    }

    async fn saved_policies(&self) -> Result<Vec<Policy>, ApiError> {
        Ok(Vec::new())
    }

    async fn enhance(&self, _id: &str, _content: &str) -> Result<EnhancedPolicy, ApiError> {
        Ok(EnhancedPolicy::default())
    }
}
