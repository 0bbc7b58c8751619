//! # API crate: typed access to the policy backend
//!
//! Everything the client knows about the backend lives here: the JSON wire
//! models, the error type, the capability traits the rest of the workspace is
//! written against, and the `reqwest`-based [`ApiClient`] that implements them.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | `User`, `UserProfile`, `Policy`, `EnhancedPolicy`, `ChatThread`, `ChatMessage`, notifications |
//! | [`backend`] | `AuthBackend`, `PolicyBackend`, `ChatBackend`, `ProfileBackend` |
//! | [`error`] | [`ApiError`] and FastAPI error-body parsing |
//! | `client` | [`ApiClient`]: bearer token injection, global 401 handling |
//!
//! All paths are relative to `<base_url>/api/v1` (see [`store::ClientConfig`]).

pub mod backend;
mod client;
pub mod error;
pub mod models;

pub use backend::{AuthBackend, ChatBackend, PolicyBackend, ProfileBackend};
pub use client::ApiClient;
pub use error::ApiError;
pub use models::*;
