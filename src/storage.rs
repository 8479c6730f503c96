//! Durable key-value storage and the JSON snapshot adapter.
//!
//! A [`KeyValueStore`] holds whole text blobs under fixed keys. [`Persistence`]
//! sits on top of one and converts the task collection and project list to
//! and from JSON.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::task::Task;

/// Key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";
/// Key holding the serialized project list.
pub const PROJECTS_KEY: &str = "projects";

/// A local string-keyed text store.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` when nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Readers see either the old file or the complete new one.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let mut f = fs::File::create(&tmp)?;
        f.write_all(value.as_bytes())?;
        f.sync_all()?;
        drop(f);
        fs::rename(tmp, &path)?;
        debug!(key, path = %path.display(), bytes = value.len(), "wrote store key");
        Ok(())
    }
}

/// In-memory store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
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

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Converts tasks and project names to and from their persisted JSON form.
#[derive(Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Persistence { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Serialize the full ordered task sequence, overwriting any prior value.
    pub fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let data = serde_json::to_string(tasks)?;
        self.store.set(TASKS_KEY, &data)
    }

    /// Read the task snapshot.
    ///
    /// Returns `Ok(None)` when nothing is stored and
    /// [`Error::Deserialization`] when the stored text does not parse.
    pub fn load(&self) -> Result<Option<Vec<Task>>> {
        self.read(TASKS_KEY)
    }

    /// Serialize the ordered project list.
    pub fn save_projects(&mut self, names: &[String]) -> Result<()> {
        let data = serde_json::to_string(names)?;
        self.store.set(PROJECTS_KEY, &data)
    }

    /// Read the project list, with the same contract as [`Persistence::load`].
    pub fn load_projects(&self) -> Result<Option<Vec<String>>> {
        self.read(PROJECTS_KEY)
    }

    fn read<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(text) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| Error::Deserialization {
                key: key.to_string(),
                source,
            })
    }
}
