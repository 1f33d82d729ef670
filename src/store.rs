//! Per-user position store
//!
//! A flat JSON map of username to last-known location, rewritten in full
//! after every successful move. Known limitation: two processes writing
//! different usernames race on the whole file and can lose each other's
//! updates. The game assumes a single interactive session at a time, so
//! this stays documented rather than locked.
//!
//! The file is read once at startup (if present) so that earlier users'
//! entries survive the rewrite; nothing ever reads a position back to
//! resume a session from it.

use log::{debug, warn};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "position store I/O error: {e}"),
            StoreError::Serialize(msg) => write!(f, "position store encoding error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        StoreError::Io(e)
    }
}

/// Where the game loop persists "this user was last seen here".
pub trait PositionStore {
    fn record(&mut self, username: &str, location: &str) -> Result<(), StoreError>;
}

/// JSON-file-backed store (the `location.json` of the original game).
pub struct JsonFileStore {
    path: PathBuf,
    users: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store, loading existing entries if the file is already
    /// there. A missing file just means an empty store; an unreadable one
    /// is logged and treated as empty rather than blocking the game.
    pub fn open<P: Into<PathBuf>>(path: P) -> JsonFileStore {
        let path = path.into();
        let users = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(users) => users,
                Err(e) => {
                    warn!("ignoring unreadable position store {}: {}", path.display(), e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("ignoring unreadable position store {}: {}", path.display(), e);
                HashMap::new()
            }
        };
        debug!(
            "position store {} opened with {} existing entries",
            path.display(),
            users.len()
        );
        JsonFileStore { path, users }
    }

    pub fn get(&self, username: &str) -> Option<&str> {
        self.users.get(username).map(String::as_str)
    }
}

impl PositionStore for JsonFileStore {
    fn record(&mut self, username: &str, location: &str) -> Result<(), StoreError> {
        self.users
            .insert(username.to_string(), location.to_string());
        let json =
            serde_json::to_string(&self.users).map_err(|e| StoreError::Serialize(e.to_string()))?;
        // Full rewrite every time; see the module docs for the race this
        // accepts.
        fs::write(&self.path, json)?;
        debug!("recorded {} at '{}'", username, location);
        Ok(())
    }
}

/// In-memory store for tests and for running without persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub users: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl PositionStore for MemoryStore {
    fn record(&mut self, username: &str, location: &str) -> Result<(), StoreError> {
        self.users
            .insert(username.to_string(), location.to_string());
        Ok(())
    }
}
