//! Shared token store constructor for all platforms.
//!
//! Returns a [`store::TokenStore`] backed by the appropriate storage:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalTokenStore`]
//! - **Desktop** (native): a file under the data dir via [`store::FileTokenStore`]
//! - anything else: [`store::MemoryTokenStore`], so the session lasts until reload

use std::rc::Rc;

use store::TokenStore;

pub fn make_token_store() -> Rc<dyn TokenStore> {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        Rc::new(store::LocalTokenStore::new())
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let tokens = store::FileTokenStore::in_data_dir();
        tracing::debug!("Token file: {}", tokens.path().display());
        Rc::new(tokens)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        Rc::new(store::MemoryTokenStore::new())
    }
}
