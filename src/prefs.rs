use async_trait::async_trait;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

use crate::i18n::{Locale, DEFAULT_LOCALE};

#[derive(Debug, Error)]
pub enum PrefsStoreError {
    #[error("io: {0}")]
    Io(String),
    #[error("corrupt: {0}")]
    Corrupt(String),
}

/// Persistent client-side preference storage.
#[async_trait]
pub trait PrefsStore: Send + Sync {
    async fn load_locale(&self) -> Result<Option<Locale>, PrefsStoreError>;
    async fn save_locale(&self, locale: Locale) -> Result<(), PrefsStoreError>;
}

#[derive(Serialize, Deserialize, Default)]
struct PrefsFile {
    locale: Option<Locale>,
}

// ---------------- Filesystem implementation ----------------
pub struct FsPrefsStore {
    path: PathBuf,
}

impl FsPrefsStore {
    /// Resolve data dir (env override).
    fn data_dir() -> PathBuf {
        std::env::var("AURORA_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"))
    }

    pub fn new() -> Self {
        let mut path = Self::data_dir();
        path.push("prefs.json");
        Self { path }
    }

    /// Store backed by an explicit file path (tests).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_file(&self) -> Result<Option<PrefsFile>, PrefsStoreError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<PrefsFile>(&bytes)
                .map(Some)
                .map_err(|e| PrefsStoreError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PrefsStoreError::Io(e.to_string())),
        }
    }
}

impl Default for FsPrefsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrefsStore for FsPrefsStore {
    async fn load_locale(&self) -> Result<Option<Locale>, PrefsStoreError> {
        Ok(self.read_file()?.and_then(|f| f.locale))
    }

    async fn save_locale(&self, locale: Locale) -> Result<(), PrefsStoreError> {
        let mut file = self.read_file().unwrap_or_default().unwrap_or_default();
        file.locale = Some(locale);
        let bytes = serde_json::to_vec_pretty(&file).map_err(|e| PrefsStoreError::Io(e.to_string()))?;
        if let Some(dir) = self.path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        std::fs::write(&self.path, bytes).map_err(|e| {
            warn!("[prefs] failed to write '{}': {e}", self.path.display());
            PrefsStoreError::Io(e.to_string())
        })?;
        info!("[prefs] saved locale {} to '{}'", locale, self.path.display());
        Ok(())
    }
}

// ---------------- In-memory implementation (tests, headless) ----------------
#[derive(Default)]
pub struct MemPrefsStore {
    inner: RwLock<Option<Locale>>,
}

impl MemPrefsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrefsStore for MemPrefsStore {
    async fn load_locale(&self) -> Result<Option<Locale>, PrefsStoreError> {
        Ok(*self.inner.read().unwrap())
    }

    async fn save_locale(&self, locale: Locale) -> Result<(), PrefsStoreError> {
        *self.inner.write().unwrap() = Some(locale);
        Ok(())
    }
}

/// Shared handle to the active locale preference.
///
/// Threaded explicitly through the HTTP and content clients instead of each
/// of them reading storage on its own. Single UI writer; the lock only
/// exists because the handle is cloned across call sites.
#[derive(Clone)]
pub struct Prefs {
    locale: Arc<RwLock<Locale>>,
    store: Arc<dyn PrefsStore>,
}

impl Prefs {
    /// Initialise from the store, falling back to the default locale when
    /// nothing is persisted or the snapshot is unreadable.
    pub async fn load(store: Arc<dyn PrefsStore>) -> Self {
        let locale = match store.load_locale().await {
            Ok(Some(l)) => l,
            Ok(None) => DEFAULT_LOCALE,
            Err(e) => {
                warn!("[prefs] failed to load locale: {e}. Using default.");
                DEFAULT_LOCALE
            }
        };
        Self {
            locale: Arc::new(RwLock::new(locale)),
            store,
        }
    }

    /// Handle with a fixed starting locale, bypassing the initial load.
    pub fn with_locale(store: Arc<dyn PrefsStore>, locale: Locale) -> Self {
        Self {
            locale: Arc::new(RwLock::new(locale)),
            store,
        }
    }

    pub fn locale(&self) -> Locale {
        *self.locale.read().unwrap()
    }

    /// Switch the active locale and persist it. The in-memory value changes
    /// even if persistence fails, so the current session stays consistent.
    pub async fn set_locale(&self, locale: Locale) -> Result<(), PrefsStoreError> {
        *self.locale.write().unwrap() = locale;
        self.store.save_locale(locale).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_when_store_is_empty() {
        let prefs = Prefs::load(Arc::new(MemPrefsStore::new())).await;
        assert_eq!(prefs.locale(), DEFAULT_LOCALE);
    }

    #[tokio::test]
    async fn set_locale_persists_and_reflects() {
        let store = Arc::new(MemPrefsStore::new());
        let prefs = Prefs::load(store.clone()).await;
        prefs.set_locale(Locale::EnUs).await.unwrap();
        assert_eq!(prefs.locale(), Locale::EnUs);
        assert_eq!(store.load_locale().await.unwrap(), Some(Locale::EnUs));

        // a fresh handle over the same store picks it up
        let reloaded = Prefs::load(store).await;
        assert_eq!(reloaded.locale(), Locale::EnUs);
    }
}
