//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that keeps one file per
//! key under a base directory. It is used on desktop and mobile platforms so
//! the session and favorites survive app restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── userToken
//! ├── userData
//! └── favorites
//! ```
//!
//! Writes go to `<key>.tmp` first and are renamed into place, so a crash
//! mid-write leaves the previous value intact.
//!
//! ## Platform data directories
//!
//! Use [`dirs::data_dir()`] to obtain a platform-appropriate base:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/unicourse/` |
//! | Linux | `~/.local/share/unicourse/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\unicourse\` |
//! | Android | App-internal storage (via `dirs`) |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::validation(format!("invalid storage key: {key:?}")));
        }
        Ok(self.base.join(key))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match std::fs::read_to_string(self.entry_path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key)?;
        std::fs::create_dir_all(&self.base)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.entry_path(key)?) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
