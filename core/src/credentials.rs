//! Bearer credential held in memory and mirrored to durable storage.
//!
//! # Design
//! `CredentialStore` is injected into the executor rather than living in a
//! global. Storage is consulted at most once: the first `token()` hydrates
//! from the `TokenStorage` backend unless `set_token` ran before it. From then
//! on the in-memory copy is authoritative, so a failed durable `clear()` never
//! brings a token back. Storage I/O failures never fail a request: they are
//! logged and the store behaves as if nothing was persisted.
//!
//! An empty token string is treated as absent on every path so that an
//! `Authorization` header is never sent with an empty credential.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Durable backing for the bearer token. A single slot: the token or nothing.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> io::Result<Option<String>>;
    fn store(&self, token: &str) -> io::Result<()>;
    fn clear(&self) -> io::Result<()>;
}

/// Token kept only for the life of the process.
///
/// Clones share the same slot, so a test can hand one clone to the store and
/// keep another to observe what was persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    pub fn peek(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.peek())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> io::Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Token persisted as plain text in a single file.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/medcard/access_token`, or `None` on platforms
    /// without a per-user data directory.
    pub fn default_location() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join("medcard").join("access_token")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Holds zero or one bearer token for a client instance.
pub struct CredentialStore {
    storage: Option<Box<dyn TokenStorage>>,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    hydrated: bool,
    token: Option<String>,
}

impl CredentialStore {
    pub fn new(storage: impl TokenStorage + 'static) -> Self {
        Self {
            storage: Some(Box::new(storage)),
            slot: Mutex::new(Slot::default()),
        }
    }

    /// A store with no durable backing; the token is lost on drop.
    pub fn in_memory() -> Self {
        Self {
            storage: None,
            slot: Mutex::new(Slot {
                hydrated: true,
                token: None,
            }),
        }
    }

    /// Store backed by `FileTokenStorage::default_location`, or memory only
    /// when no data directory exists.
    pub fn persistent() -> Self {
        match FileTokenStorage::default_location() {
            Some(storage) => Self::new(storage),
            None => {
                tracing::warn!("no data directory available, token will not persist");
                Self::in_memory()
            }
        }
    }

    /// Replace the current token, or clear it with `None`. Durable storage is
    /// updated before this returns.
    pub fn set_token(&self, token: Option<&str>) {
        let token = token.filter(|t| !t.is_empty());
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.hydrated = true;
        slot.token = token.map(str::to_string);
        if let Some(storage) = &self.storage {
            let result = match token {
                Some(token) => storage.store(token),
                None => storage.clear(),
            };
            if let Err(e) = result {
                tracing::warn!("failed to persist credential: {e}");
            }
        }
    }

    pub fn clear(&self) {
        self.set_token(None);
    }

    /// Current token. The first call on a fresh store reads durable storage.
    pub fn token(&self) -> Option<String> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if !slot.hydrated {
            slot.token = self.hydrate();
            slot.hydrated = true;
        }
        slot.token.clone()
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    fn hydrate(&self) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("failed to read stored credential: {e}");
                None
            }
        }
    }
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("durable", &self.storage.is_some())
            .finish_non_exhaustive()
    }
}
