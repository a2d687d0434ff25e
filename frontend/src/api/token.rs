use std::{cell::RefCell, fmt, rc::Rc};

use crate::utils::storage as storage_utils;

pub const TOKEN_KEY: &str = "token_key";

/// Backing slot for the bearer token.
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn remove(&self);
}

/// Browser `localStorage`, survives reloads.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageTokenStorage;

impl TokenStorage for LocalStorageTokenStorage {
    fn load(&self) -> Option<String> {
        storage_utils::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten())
    }

    fn store(&self, token: &str) {
        match storage_utils::local_storage() {
            Ok(storage) => {
                if storage.set_item(TOKEN_KEY, token).is_err() {
                    log::error!("Failed to persist access token");
                }
            }
            Err(err) => log::error!("Failed to persist access token: {}", err),
        }
    }

    fn remove(&self) {
        if let Ok(storage) = storage_utils::local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryTokenStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    fn store(&self, token: &str) {
        *self.slot.borrow_mut() = Some(token.to_string());
    }

    fn remove(&self) {
        self.slot.borrow_mut().take();
    }
}

/// Shared handle to the persisted bearer token.
///
/// Clones point at the same slot, so the HTTP client and the session see
/// each other's writes.
#[derive(Clone)]
pub struct TokenStore {
    backend: Rc<dyn TokenStorage>,
}

impl TokenStore {
    pub fn new(backend: impl TokenStorage + 'static) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn browser() -> Self {
        Self::new(LocalStorageTokenStorage)
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryTokenStorage::default())
    }

    pub fn get(&self) -> Option<String> {
        self.backend.load().filter(|token| !token.is_empty())
    }

    pub fn set(&self, token: &str) {
        self.backend.store(token);
    }

    pub fn clear(&self) {
        self.backend.remove();
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::browser()
        } else {
            Self::in_memory()
        }
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenStore")
            .field("present", &self.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let store = TokenStore::in_memory();
        store.set("T1");
        assert_eq!(store.get().as_deref(), Some("T1"));
        store.set("T2");
        assert_eq!(store.get().as_deref(), Some("T2"));
    }

    #[test]
    fn clear_removes_token_and_is_idempotent() {
        let store = TokenStore::in_memory();
        store.set("T1");
        store.clear();
        assert_eq!(store.get(), None);
        store.clear();
        assert_eq!(store.get(), None);
    }

    #[test]
    fn clones_share_the_same_slot() {
        let store = TokenStore::in_memory();
        let other = store.clone();
        store.set("shared");
        assert_eq!(other.get().as_deref(), Some("shared"));
        other.clear();
        assert!(store.get().is_none());
    }

    #[test]
    fn debug_output_hides_token_value() {
        let store = TokenStore::in_memory();
        store.set("secret-token");
        let rendered = format!("{:?}", store);
        assert!(!rendered.contains("secret-token"));
        assert!(rendered.contains("present: true"));
    }
}
