//! Persisted UI state.
//!
//! A string-only key-value store sits at the bottom, wrapped by
//! [`StoreAdapter`] so that no storage failure ever reaches a caller. Values
//! pass through [`codec`] on the way in and out, and each logical piece of
//! state is owned by one repository handed out by [`StateContext`].

pub mod codec;
mod context;
mod repo;

pub use context::{StateContext, StorageKeys};
pub use repo::{
    CardOrderRepository, ProfileRepository, SidebarRepository, StateRepository, ThemeRepository,
};

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable for `{key}`: {reason}")]
    Unavailable { key: String, reason: String },
    #[error("malformed stored data: {0}")]
    Malformed(String),
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn unavailable(key: &str, reason: impl Into<String>) -> Self {
        StoreError::Unavailable {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

/// Synchronous, string-only storage medium (browser `localStorage` and friends).
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Storage that is switched off: nothing is ever present, writes vanish.
#[derive(Debug, Default)]
pub struct NoopStore;

impl KeyValueStore for NoopStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Storage whose every access fails, as in a locked-down privacy mode.
#[derive(Debug, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::unavailable(key, "storage disabled"))
    }

    fn set_item(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::unavailable(key, "storage disabled"))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::default();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        store
    }

    /// Makes every following write fail with a quota error until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::unavailable(key, "quota exceeded"));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Failure-absorbing front for a [`KeyValueStore`].
///
/// `read` reports any failure as absence and `write` drops failed writes.
/// Each failure is terminal for that one call: no retry, no queue.
#[derive(Debug)]
pub struct StoreAdapter<S> {
    store: S,
}

impl<S: KeyValueStore> StoreAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn try_read(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.get_item(key)
    }

    pub fn try_write(&self, key: &str, raw: &str) -> Result<(), StoreError> {
        self.store.set_item(key, raw)
    }

    pub fn read(&self, key: &str) -> Option<String> {
        match self.try_read(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("storage read failed, treating as absent: {}", err);
                None
            }
        }
    }

    pub fn write(&self, key: &str, raw: &str) {
        if let Err(err) = self.try_write(key, raw) {
            warn!("storage write dropped: {}", err);
        }
    }
}
