mod layout;
pub use layout::AppLayout;

mod guards;
pub use guards::{GuestOnly, RequireSession};

mod auth;
pub use auth::{Login, Register};

mod pages;
pub use pages::{Home, NotFound, PolicySearch, Profile};

mod chat;
pub use chat::{ChatIndex, ChatRoom};
