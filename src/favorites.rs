use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Key holding the JSON array of saved tutorial slugs.
pub const SAVED_TUTORIALS_KEY: &str = "saved_tutorials";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed store data: {0}")]
    Json(#[from] serde_json::Error),
}

/// String key-value storage, the equivalent of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a single JSON object on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
        }
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.path, content).map_err(|source| self.io_error(source))?;
        log::debug!("wrote {} to {}", key, self.path.display());
        Ok(())
    }
}

/// Tutorials the reader saved for later.
pub struct Favorites<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Favorites<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Saved slugs in the order they were added.
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        match self.store.get(SAVED_TUTORIALS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn is_saved(&self, slug: &str) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|s| s == slug))
    }

    /// Save or unsave `slug`. Returns whether it is saved afterwards.
    pub fn toggle(&mut self, slug: &str) -> Result<bool, StoreError> {
        let mut saved = self.list()?;
        let now_saved = if saved.iter().any(|s| s == slug) {
            saved.retain(|s| s != slug);
            false
        } else {
            saved.push(slug.to_string());
            true
        };
        self.store
            .set(SAVED_TUTORIALS_KEY, &serde_json::to_string(&saved)?)?;
        log::info!(
            "{} {}",
            if now_saved { "saved" } else { "removed" },
            slug
        );
        Ok(now_saved)
    }
}
