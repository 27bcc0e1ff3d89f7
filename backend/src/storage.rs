use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

pub use preferences::Preferences;
pub use session::SessionStore;

mod preferences;
mod session;

/// The browser's local storage, or a stand-in for it.
///
/// Reads and writes are uncoordinated: the last writer wins.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Shared in-memory store. Clones see the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use gloo_storage::{LocalStorage, Storage};

    use super::KeyValueStore;

    /// `window.localStorage`. Values are stored as raw strings.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct BrowserStore;

    impl KeyValueStore for BrowserStore {
        fn get(&self, key: &str) -> Option<String> {
            let storage = LocalStorage::raw();
            storage.get_item(key).ok().flatten()
        }

        fn set(&self, key: &str, value: &str) {
            if let Err(error) = LocalStorage::raw().set_item(key, value) {
                tracing::warn!(key, ?error, "failed to write local storage");
            }
        }

        fn remove(&self, key: &str) {
            LocalStorage::delete(key);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserStore;

#[cfg(target_arch = "wasm32")]
pub type PlatformStore = BrowserStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = MemoryStore;

/// The store backing the running app.
pub fn platform_store() -> PlatformStore {
    #[cfg(target_arch = "wasm32")]
    {
        BrowserStore
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        static STORE: std::sync::LazyLock<MemoryStore> = std::sync::LazyLock::new(MemoryStore::default);
        STORE.clone()
    }
}
