//! Session management for the operator panel
//!
//! A session holds at most one credential and tracks:
//! - The token currently in use
//! - The backend that keeps it across restarts
//!
//! Every mutation is written through to the backend before the
//! in-memory value changes, so a later process observes the last
//! successful write.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use natsume_types::Credential;

use crate::error::{Error, Result};
use crate::SESSION_NAMESPACE;

/// Durable storage for the session credential
pub trait SessionBackend: Send + Sync + fmt::Debug {
    /// Read the stored credential, if any
    fn load(&self) -> Result<Option<Credential>>;

    /// Replace the stored credential; `None` records the logged-out state
    fn store(&self, credential: Option<&Credential>) -> Result<()>;
}

/// On-disk document
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default)]
    panel_token: Option<Credential>,
}

/// JSON file backend
///
/// Stores `{"panel_token": ...}` in `<dir>/main.json`. Writes go to a
/// sibling temporary file which is then renamed over the target.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Backend at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for the `main` namespace inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", SESSION_NAMESPACE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionBackend for FileBackend {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            debug!("No session file at {}", self.path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let state: PersistedState =
            serde_json::from_str(&content).map_err(|e| Error::CorruptSession {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        Ok(state.panel_token.filter(|token| !token.is_empty() && token.is_header_safe()))
    }

    fn store(&self, credential: Option<&Credential>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let state = PersistedState {
            panel_token: credential.cloned(),
        };
        let content = serde_json::to_vec_pretty(&state).map_err(|e| Error::CorruptSession {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        let temp = self.temp_path();
        if let Err(e) = replace_file(&temp, &self.path, &content) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        debug!("Session written to {}", self.path.display());
        Ok(())
    }
}

fn replace_file(temp: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = open_private(temp)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);

    fs::rename(temp, target)
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}

/// Process-local backend, lost on exit
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that starts out holding `token`
    pub fn with_token(token: impl Into<String>) -> Self {
        let backend = Self::new();
        *backend.slot.lock() = Some(Credential::new(token));
        backend
    }

    /// What a restarted process would load
    pub fn stored(&self) -> Option<Credential> {
        self.slot.lock().clone()
    }
}

impl SessionBackend for MemoryBackend {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.stored())
    }

    fn store(&self, credential: Option<&Credential>) -> Result<()> {
        *self.slot.lock() = credential.cloned();
        Ok(())
    }
}

/// Session store
///
/// Holds the operator credential and persists every change.
/// Thread-safe and can be cloned cheaply (Arc internally); clones share
/// the same credential.
#[derive(Debug, Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Current credential (None when logged out)
    credential: RwLock<Option<Credential>>,

    backend: Box<dyn SessionBackend>,
}

impl Session {
    /// Open a session, loading whatever the backend holds
    pub fn open(backend: impl SessionBackend + 'static) -> Result<Self> {
        let credential = backend.load()?;

        debug!(
            "Session opened ({})",
            if credential.is_some() { "token present" } else { "no token" }
        );

        Ok(Self {
            inner: Arc::new(SessionInner {
                credential: RwLock::new(credential),
                backend: Box::new(backend),
            }),
        })
    }

    /// Session that is never persisted
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(SessionInner {
                credential: RwLock::new(None),
                backend: Box::new(MemoryBackend::new()),
            }),
        }
    }

    /// Get current credential
    pub fn get(&self) -> Option<Credential> {
        self.inner.credential.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.credential.read().is_some()
    }

    /// Replace the credential.
    ///
    /// The write lock is held across the backend write so concurrent
    /// callers persist in the same order they update memory.
    pub fn set(&self, token: impl Into<String>) -> Result<()> {
        let credential = Credential::new(token);
        if credential.is_empty() {
            return Err(Error::EmptyToken);
        }
        if !credential.is_header_safe() {
            return Err(Error::InvalidToken);
        }

        let mut slot = self.inner.credential.write();
        self.inner.backend.store(Some(&credential))?;
        *slot = Some(credential);

        info!("Panel token stored");
        Ok(())
    }

    /// Forget the credential
    pub fn clear(&self) -> Result<()> {
        let mut slot = self.inner.credential.write();
        self.inner.backend.store(None)?;
        *slot = None;

        info!("Panel token cleared");
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}
