//! Durable session persistence

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use log::warn;

use super::Session;

/// Storage seam for the persisted session.
///
/// Reads and writes are synchronous and shared only within one process;
/// no cross-process consistency is attempted. Write failures are logged
/// and swallowed so a broken disk never fails a sign-in.
pub trait SessionStorage: Send + Sync {
    /// Load the persisted session, if any
    fn load(&self) -> Option<Session>;

    /// Persist the session
    fn save(&self, session: &Session);

    /// Remove the persisted session
    fn clear(&self);
}

/// JSON-file-backed session storage
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create storage backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Option<Session> {
        let text = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&text) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(
                    "ignoring unreadable session file {}: {}",
                    self.path.display(),
                    err
                );
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        match serde_json::to_string(session) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    warn!("failed to persist session to {}: {}", self.path.display(), err);
                }
            }
            Err(err) => warn!("failed to serialize session: {}", err),
        }
    }

    fn clear(&self) {
        if let Err(err) = fs::remove_file(&self.path) {
            if err.kind() != ErrorKind::NotFound {
                warn!("failed to clear session file {}: {}", self.path.display(), err);
            }
        }
    }
}

/// In-memory session storage, used in tests and when persistence is disabled
#[derive(Default)]
pub struct MemoryStorage {
    session: Mutex<Option<Session>>,
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    fn save(&self, session: &Session) {
        let mut current = self.session.lock().unwrap();
        *current = Some(session.clone());
    }

    fn clear(&self) {
        let mut current = self.session.lock().unwrap();
        *current = None;
    }
}
