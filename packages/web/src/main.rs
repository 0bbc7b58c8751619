use dioxus::prelude::*;

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

/// Backend URL baked in at build time, e.g.
/// `POLICY_API_URL=https://policy.example.kr dx build --platform web`.
fn config() -> ClientConfig {
    ClientConfig::default().with_env_override(option_env!("POLICY_API_URL").map(String::from))
}

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: ui::MAIN_CSS }

        ui::SessionProvider {
            config: config(),
            Router::<Route> {}
        }
    }
}
