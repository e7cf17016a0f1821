use std::cell::Cell;

use web_sys::Storage;

use crate::dom::js_error;
use crate::error::StorageError;
use crate::theme::Theme;

/// Where the theme name is persisted.
pub trait ThemeStore {
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&self, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, one key, no expiry.
#[derive(Clone, Debug)]
pub struct BrowserStore {
    key: String,
}

impl BrowserStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, StorageError> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        window
            .local_storage()
            .map_err(|e| StorageError::Access(js_error(&e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl ThemeStore for BrowserStore {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|e| StorageError::Access(js_error(&e)))
    }

    fn save(&self, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(&self.key, value)
            .map_err(|e| StorageError::Access(js_error(&e)))
    }
}

/// Theme preference over a store that may fail. The last value set is kept in
/// memory so a broken store degrades to a per-page preference.
pub struct ThemePreference<S> {
    store: S,
    fallback: Cell<Option<Theme>>,
}

impl<S: ThemeStore> ThemePreference<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fallback: Cell::new(None),
        }
    }

    fn remembered(&self) -> Theme {
        self.fallback.get().unwrap_or_default()
    }

    pub fn get(&self) -> Theme {
        match self.store.load() {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
                log::debug!("{e}, using {}", Theme::default());
                Theme::default()
            }),
            Ok(None) => self.remembered(),
            Err(e) => {
                log::warn!("could not read theme: {e}");
                self.remembered()
            }
        }
    }

    pub fn set(&self, theme: Theme) {
        self.fallback.set(Some(theme));
        if let Err(e) = self.store.save(theme.as_str()) {
            log::warn!("could not save theme: {e}");
        }
    }

    pub fn toggle(&self) -> Theme {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}
