//! # Client-side domain logic
//!
//! Everything the views need that is not rendering: session flows, route
//! access decisions, the policy display formatter, the chat transcript state
//! machine and optimistic toggles. Nothing here depends on Dioxus, so every
//! rule is testable with plain `#[tokio::test]`s against in-memory backends.
//!
//! | Module | Concern |
//! |--------|---------|
//! | [`session`] | restore / login / register / logout / 401 expiry |
//! | [`guard`] | protected and guest-only route decisions, post-login redirect |
//! | [`format`] | title cleanup, category and icon inference, summaries |
//! | [`extract`] | ordered key-info extraction rules |
//! | [`enhance`] | per-policy enhancement cache and loading ellipsis |
//! | [`chat`] | thread modes, two-phase message sends |
//! | [`optimistic`] / [`bookmarks`] | pending → committed / failed toggles |
//! | [`forms`] | login and registration validation |
//! | [`profile`] | region labels, profile edit draft, notification toggles |
//! | [`time`] | timestamps for local messages and their display |

pub mod bookmarks;
pub mod chat;
pub mod enhance;
pub mod extract;
pub mod format;
pub mod forms;
pub mod guard;
pub mod optimistic;
pub mod profile;
pub mod session;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use bookmarks::Bookmarks;
pub use chat::{ChatSession, ThreadMode, TEMPORARY_MARKER};
pub use enhance::{EnhanceState, EnhancementCache};
pub use format::PolicyDisplay;
pub use guard::GuardDecision;
pub use optimistic::Optimistic;
pub use session::SessionState;
