//! File-backed key-value storage.
//!
//! The whole map lives in one JSON document that is rewritten on every
//! mutation. Suited to small stores, not to heavy write loads.

use anyhow::{Context, Result, anyhow};
use getrandom::fill;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::KvStore;

#[derive(Serialize, Deserialize, Default)]
struct Image {
    entries: Vec<ImageEntry>,
}

#[derive(Serialize, Deserialize)]
struct ImageEntry {
    key: Vec<u8>,
    value: Vec<u8>,
}

type Entries = BTreeMap<Vec<u8>, Vec<u8>>;

/// A [`KvStore`] persisting all entries to a single file.
///
/// Clones share the same in-process lock, so read-modify-write cycles from
/// clones never interleave. Separate processes writing the same file are not
/// coordinated.
#[derive(Clone, Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    /// Creates a new FileStorage instance with the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns `true` if the storage file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut Entries) -> (T, bool)) -> Result<T> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow!("file storage lock poisoned"))?;

        let mut entries = self.load()?;
        let (out, dirty) = f(&mut entries);
        if dirty {
            self.save(&entries)?;
        }
        Ok(out)
    }

    /// Reads all entries. A missing file is an empty store.
    fn load(&self) -> Result<Entries> {
        if !self.exists() {
            return Ok(Entries::new());
        }

        let data = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let image: Image = serde_json::from_slice(&data)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;

        Ok(image
            .entries
            .into_iter()
            .map(|e| (e.key, e.value))
            .collect())
    }

    /// Writes all entries using atomic write.
    ///
    /// This method ensures crash-safety by:
    /// 1. Writing data to a temporary file with random name
    /// 2. Syncing the temporary file to disk
    /// 3. Atomically replacing the old file with the new one
    /// 4. Syncing the parent directory to ensure the rename is persisted
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self, entries: &Entries) -> Result<()> {
        let image = Image {
            entries: entries
                .iter()
                .map(|(key, value)| ImageEntry {
                    key: key.clone(),
                    value: value.clone(),
                })
                .collect(),
        };
        let data = serde_json::to_vec(&image)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.random_tmp_path()?;

        // securely create temp file (fail if exists)
        let mut tmp_file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
            .context("failed to create temporary file")?;

        tmp_file.write_all(&data)?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        if let Err(e) = self.atomic_replace(&tmp_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }

        if let Some(parent) = self.path.parent() {
            let dir = File::open(parent)?;
            dir.sync_all()?;
        }

        Ok(())
    }

    /// Generates a unique temporary file path in the same directory.
    ///
    /// Format: `filename.tmp.<randomhex>`
    fn random_tmp_path(&self) -> Result<PathBuf> {
        let mut buf = [0u8; 8]; // 64 bit entropy
        fill(&mut buf)?;

        let rand_string = buf.iter().map(|b| format!("{:02x}", b)).collect::<String>();

        let file_name = self
            .path
            .file_name()
            .context("storage path has no file name")?
            .to_string_lossy();

        let tmp_name = format!("{}.tmp.{}", file_name, rand_string);

        Ok(self.path.with_file_name(tmp_name))
    }

    /// Atomically replaces the target file with the temporary file.
    ///
    /// Uses Windows `ReplaceFileW` API with `REPLACEFILE_WRITE_THROUGH` flag
    /// to ensure the operation is truly atomic and persisted to disk.
    #[cfg(target_os = "windows")]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        use std::ffi::OsStr;
        use std::os::windows::ffi::OsStrExt;
        use windows_sys::Win32::Storage::FileSystem::{REPLACEFILE_WRITE_THROUGH, ReplaceFileW};

        // ReplaceFileW requires the target to exist
        if !self.path.exists() {
            fs::rename(tmp_path, &self.path)?;
            return Ok(());
        }

        fn to_wide(s: &OsStr) -> Vec<u16> {
            s.encode_wide().chain(std::iter::once(0)).collect()
        }

        let target_w = to_wide(self.path.as_os_str());
        let tmp_w = to_wide(tmp_path.as_os_str());

        // SAFETY:
        // - Strings are valid UTF-16 and null-terminated
        // - Pointers remain valid during the call
        // - Windows does not retain the pointers after return
        let result = unsafe {
            ReplaceFileW(
                target_w.as_ptr(),
                tmp_w.as_ptr(),
                std::ptr::null(),
                REPLACEFILE_WRITE_THROUGH,
                std::ptr::null(),
                std::ptr::null(),
            )
        };

        if result == 0 {
            let err = std::io::Error::last_os_error();
            return Err(err).context("atomic replace failed");
        }

        Ok(())
    }

    /// On Unix, `rename()` is atomic when both paths are on the same filesystem.
    #[cfg(not(target_os = "windows"))]
    fn atomic_replace(&self, tmp_path: &Path) -> Result<()> {
        fs::rename(tmp_path, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStorage {
    fn put(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_vec(), value.to_vec());
            ((), true)
        })
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.with_entries(|entries| (entries.get(key).cloned(), false))
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.with_entries(|entries| ((), entries.remove(key).is_some()))
    }
}
