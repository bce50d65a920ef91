//! Storage port for persisted slots, plus the file and in-memory backends.
//!
//! A slot holds one string value. `write` is a full replace: readers see
//! either the old value or the new one, never a mix.
//!
//! On-disk layout under the configured `work_dir`:
//! ```text
//! ~/.wegram/
//! └── wegram_wallet.json   (mode 0600)
//! ```

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::AppError;

/// Key-value persistence used by the identity bootstrap.
pub trait WalletStore {
    /// `Ok(None)` when the slot has never been written.
    /// [`AppError::CorruptSlot`] when the slot exists but does not hold text.
    fn read(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Replace the slot's value atomically.
    fn write(&self, key: &str, value: &str) -> Result<(), AppError>;
}

impl<T: WalletStore + ?Sized> WalletStore for &T {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        (**self).write(key, value)
    }
}

// ── file backend ─────────────────────────────────────────────────────────────

/// One JSON file per slot under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, AppError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl WalletStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        let path = self.slot_path(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(AppError::Storage(format!("cannot read {}: {e}", path.display())));
            }
        };
        String::from_utf8(bytes).map(Some).map_err(|e| {
            AppError::CorruptSlot(format!("{} is not valid UTF-8: {e}", path.display()))
        })
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| {
            AppError::Storage(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        // Write to a sibling temp file, flush it to disk, then rename over the slot.
        let tmp_path = path.with_extension("json.tmp");
        if let Err(e) = write_private_file(&tmp_path, value.as_bytes()) {
            let _ = fs::remove_file(&tmp_path);
            return Err(AppError::Storage(format!(
                "cannot write {}: {e}",
                tmp_path.display()
            )));
        }

        if let Err(e) = fs::rename(&tmp_path, &path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(AppError::Storage(format!(
                "cannot replace {}: {e}",
                path.display()
            )));
        }

        debug!(slot = key, path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

/// Create `path` readable by the owner only, write `bytes` and fsync.
/// A temp file left behind by an interrupted write is replaced.
fn write_private_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// Slot keys become file names, so keep them to a safe alphabet.
fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() {
        return Err(AppError::Storage("slot key must not be empty".into()));
    }
    if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(AppError::Storage(format!(
            "invalid slot key '{key}': only [A-Za-z0-9_-] allowed"
        )));
    }
    Ok(())
}

// ── in-memory backend ────────────────────────────────────────────────────────

/// Process-local slots; discarded on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot directly, bypassing any bookkeeping a wrapper might do.
    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.lock().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// External clearing of a slot.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // Mutations are single insert/remove calls; a poisoned map is still whole.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl WalletStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.insert(key, value);
        Ok(())
    }
}
