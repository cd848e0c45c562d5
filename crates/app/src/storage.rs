//! JSON file backed durable store.

use std::{
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use salon_booking::storage::{DurableStore, StorageError};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

type Entries = BTreeMap<String, String>;

/// Durable store kept in a single JSON object file, `{ "key": "value" }`.
///
/// The whole file is replaced on every change by writing a sibling temporary
/// file and renaming it into place, so a crash mid-write never leaves
/// a truncated file behind. A missing or empty file reads as an empty store,
/// and the parent directory is created on first write.
///
/// A file that cannot be decoded is reported by [`DurableStore::get`], but
/// [`DurableStore::set`] and [`DurableStore::remove`] start over from an
/// empty store and overwrite it.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    /// Store entries in the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Entries::new()),
            Err(error) => return Err(error.into()),
        };

        if contents.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&contents)?)
    }

    /// Entries to modify, and whether the file must be rewritten even if
    /// nothing changes because it could not be decoded.
    fn entries_for_update(&self) -> Result<(Entries, bool), StorageError> {
        match self.read_entries() {
            Ok(entries) => Ok((entries, false)),
            Err(StorageError::Encoding(error)) => {
                warn!(path = %self.path.display(), "replacing undecodable store file: {error}");

                Ok((Entries::new(), true))
            }
            Err(error) => Err(error),
        }
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), StorageError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;

        serde_json::to_writer_pretty(&mut file, entries)?;
        file.flush()?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|error| error.error)?;

        debug!(path = %self.path.display(), entries = entries.len(), "wrote store file");

        Ok(())
    }
}

impl DurableStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock()?;

        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock()?;
        let (mut entries, _) = self.entries_for_update()?;

        entries.insert(key.to_string(), value.to_string());

        self.write_entries(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock()?;
        let (mut entries, corrupt) = self.entries_for_update()?;

        if entries.remove(key).is_none() && !corrupt {
            return Ok(());
        }

        self.write_entries(&entries)
    }
}
