use dioxus::prelude::*;

use store::config::API_URL_ENV;
use store::ClientConfig;
use views::{
    AppLayout, ChatIndex, ChatRoom, GuestOnly, Home, Login, NotFound, PolicySearch, Profile,
    Register, RequireSession,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        Home {},
        #[layout(RequireSession)]
            #[route("/policies")]
            PolicySearch {},
            #[route("/chat")]
            ChatIndex {},
            #[route("/chat/:chat_id")]
            ChatRoom { chat_id: String },
            #[route("/profile")]
            Profile {},
        #[end_layout]
        #[layout(GuestOnly)]
            #[route("/login?:redirect")]
            Login { redirect: String },
            #[route("/register")]
            Register {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// `policy-assistant.toml` from the platform config dir, then `.env`, then the
/// environment. Later sources win for the backend URL.
fn load_config() -> ClientConfig {
    dotenvy::dotenv().ok();
    let config = ClientConfig::default_path()
        .map(|path| ClientConfig::load(&path))
        .unwrap_or_default();
    config.with_env_override(std::env::var(API_URL_ENV).ok())
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        ui::SessionProvider {
            config,
            Router::<Route> {}
        }
    }
}
