//! Client-side persistence for the policy assistant.
//!
//! The only state that survives a reload is the bearer token, so this crate is
//! small: a [`TokenStore`] trait with one implementation per platform, plus the
//! TOML [`ClientConfig`] read by the launchers.

pub mod config;
pub mod token;

mod memory;
pub use memory::MemoryTokenStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store;
#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileTokenStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalTokenStore;

pub use config::{ApiConfig, ClientConfig, UiConfig};
pub use token::TokenStore;
