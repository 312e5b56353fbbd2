use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};

use crate::{KeyValueStore, StorageError};

/// A key-value store persisted as a single JSON object file.
///
/// Every mutation takes an exclusive advisory lock on a sibling `.lock`
/// file, re-reads the object from disk, applies the change and rewrites the
/// object through a temp file and a rename. Several handles (or processes)
/// on the same path therefore never drop each other's writes. Reads go to
/// disk as well, so a handle sees what other handles committed.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; the file
    /// and its parent directories are created on the first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file exists but cannot be read, or
    /// [`StorageError::Serialization`] if it is not a JSON object.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened json store");
        Ok(Self {
            path,
            writer: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("json.lock")
    }

    /// Run `mutate` against the on-disk entries while holding the file lock.
    /// `mutate` returns whether it changed anything; unchanged entries are
    /// not rewritten.
    fn commit(
        &self,
        mutate: impl FnOnce(&mut Map<String, Value>) -> Result<bool, StorageError>,
    ) -> Result<(), StorageError> {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        ensure_parent(&self.path)?;

        let lock_path = self.lock_path();
        let lock = open_lock_file(&lock_path)?;
        fs2::FileExt::lock_exclusive(&lock).map_err(|e| StorageError::io(&lock_path, e))?;

        let mut entries = read_entries(&self.path)?;
        if mutate(&mut entries)? {
            write_atomically(&self.path, &entries)?;
        }
        // Dropping `lock` closes the handle and releases the lock.
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(read_entries(&self.path)?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value);
            Ok(true)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.commit(|entries| Ok(entries.remove(key).is_some()))
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<Value>) -> Result<Option<Value>, StorageError>,
    ) -> Result<(), StorageError> {
        self.commit(|entries| match apply(entries.get(key).cloned())? {
            Some(value) => {
                entries.insert(key.to_string(), value);
                Ok(true)
            }
            None => Ok(false),
        })
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>, StorageError> {
    match fs::read_to_string(path) {
        Ok(raw) if raw.trim().is_empty() => Ok(Map::new()),
        Ok(raw) => Ok(serde_json::from_str::<Map<String, Value>>(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

fn ensure_parent(path: &Path) -> Result<(), StorageError> {
    let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
            tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
        }
    }
    Ok(())
}

fn private_file_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options
}

fn open_lock_file(path: &Path) -> Result<File, StorageError> {
    private_file_options()
        .truncate(false)
        .open(path)
        .map_err(|e| StorageError::io(path, e))
}

fn write_atomically(path: &Path, entries: &Map<String, Value>) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(entries)?;
    let tmp = path.with_extension("json.tmp");

    let result = write_synced(&tmp, &body)
        .and_then(|()| fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_synced(path: &Path, body: &[u8]) -> Result<(), StorageError> {
    let mut file = private_file_options()
        .truncate(true)
        .open(path)
        .map_err(|e| StorageError::io(path, e))?;

    // A temp file left over from a crashed run keeps its old mode.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| StorageError::io(path, e))?;
    }

    file.write_all(body).map_err(|e| StorageError::io(path, e))?;
    file.sync_all().map_err(|e| StorageError::io(path, e))
}
