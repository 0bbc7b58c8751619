//! This crate contains all shared UI for the workspace.
//!
//! Platform launchers own the `Route` enum and wrap the views in
//! [`views`], passing navigation callbacks down; everything else lives here.

use dioxus::prelude::*;

pub mod views;

pub const MAIN_CSS: Asset = asset!("/assets/main.css");

mod navbar;
pub use navbar::{LogoutButton, Navbar};

mod session;
pub use session::{use_api, use_enhancements, use_session, use_ui_config, SessionProvider};

mod persistence;
pub use persistence::make_token_store;

mod policy_card;
pub use policy_card::{LoadingDots, PolicyCard};

mod timer;
