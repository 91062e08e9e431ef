//! Admin session
//!
//! The bearer token lives in a small JSON file under a fixed key. A
//! [`Session`] is the only way the rest of the crate reaches it: login
//! begins it, logout ends it, and authenticated requests read it.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage key of the admin token
pub const TOKEN_KEY: &str = "admin_token";

/// Persistent storage for the token
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// JSON file storage (`{"admin_token": "..."}`)
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    fn write_map(&self, map: &Map<String, Value>) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, json)
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        self.read_map()
            .get(TOKEN_KEY)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        let mut map = self.read_map();
        map.insert(TOKEN_KEY.to_string(), Value::String(token.to_string()));
        self.write_map(&map)
    }

    fn clear(&self) -> std::io::Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.read_map();
        map.remove(TOKEN_KEY);
        self.write_map(&map)
    }
}

/// In-process storage, for tests and one-shot tools
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        if let Ok(mut guard) = self.token.lock() {
            *guard = None;
        }
        Ok(())
    }
}

/// Admin session context, cheap to clone
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Session persisted in a JSON file
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(FileTokenStore::new(path))
    }

    /// Session kept in memory only
    pub fn memory() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current token, read from storage on every call
    pub fn token(&self) -> Option<String> {
        self.store.load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// `Authorization` header value, if logged in
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    /// Store the token returned by login
    pub fn begin(&self, token: &str) -> std::io::Result<()> {
        tracing::debug!("admin session started");
        self.store.save(token)
    }

    /// Forget the token (logout)
    pub fn end(&self) -> std::io::Result<()> {
        tracing::debug!("admin session ended");
        self.store.clear()
    }
}
