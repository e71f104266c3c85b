//! Key-value persistence capability and the recent-colors list built on it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{PaletteError, Result};

pub const RECENT_COLORS_KEY: &str = "recentColors";
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// String key-value storage injected into the editing session.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
}

/// Volatile store, used by tests and by sessions with no backing file.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store backed by a single JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open `path`, starting empty when the file does not exist yet. A file
    /// that is not a JSON object of strings is logged and read as empty; it is
    /// overwritten on the next `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                PaletteError::store(format!("failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring corrupt store file");
                BTreeMap::new()
            })
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PaletteError::store(format!("failed to create {}: {e}", parent.display()))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| PaletteError::store(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| {
            PaletteError::store(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }
}

/// Most-recent-first, deduplicated list of hex values kept in a store.
#[derive(Debug, Clone, Copy)]
pub struct RecentColors {
    limit: usize,
}

impl Default for RecentColors {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

impl RecentColors {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Read the list. Missing or unreadable entries read as empty.
    pub fn load(&self, store: &dyn KeyValueStore) -> Vec<String> {
        let raw = match store.get(RECENT_COLORS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read recent colors");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(mut colors) => {
                colors.truncate(self.limit);
                colors
            }
            Err(e) => {
                warn!(error = %e, "ignoring malformed recent colors");
                Vec::new()
            }
        }
    }

    /// Move `hex` to the front, dropping an exact duplicate and anything past the limit.
    pub fn push(&self, store: &mut dyn KeyValueStore, hex: &str) -> Result<Vec<String>> {
        let mut colors = self.load(store);
        colors.retain(|c| c != hex);
        colors.insert(0, hex.to_string());
        colors.truncate(self.limit);

        let json = serde_json::to_string(&colors).map_err(|e| PaletteError::store(e.to_string()))?;
        store.set(RECENT_COLORS_KEY, json)?;
        Ok(colors)
    }
}
