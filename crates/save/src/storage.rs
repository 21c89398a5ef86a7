//! Storage backends for the save blob.
//!
//! Native builds keep the save in a durable file (`save.json`) and fall back
//! to a small key-value store (`prefs.json`, a JSON object of strings) when
//! the file write fails. Loading prefers the file, then the key-value entry.
//!
//! WASM builds use `window.localStorage` under the same key.

use std::path::PathBuf;

use bevy::prelude::*;

use crate::save_error::SaveError;

pub const SAVE_FILE_NAME: &str = "save.json";
pub const PREFS_FILE_NAME: &str = "prefs.json";
pub const KV_SAVE_KEY: &str = "save_data_string";

/// Where the save blob lives.
#[derive(Resource, Debug, Clone)]
pub struct StorageConfig {
    pub save_path: PathBuf,
    pub prefs_path: PathBuf,
    pub kv_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::in_dir(default_save_dir())
    }
}

impl StorageConfig {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            save_path: dir.join(SAVE_FILE_NAME),
            prefs_path: dir.join(PREFS_FILE_NAME),
            kv_key: KV_SAVE_KEY.to_string(),
        }
    }
}

/// Per-user data directory: `$HOME/.harvest`, `%APPDATA%\harvest`, or the
/// working directory when neither is set.
pub fn default_save_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) {
        return PathBuf::from(home).join(".harvest");
    }
    if let Some(appdata) = std::env::var_os("APPDATA").filter(|a| !a.is_empty()) {
        return PathBuf::from(appdata).join("harvest");
    }
    PathBuf::from(".")
}

/// Which backend a blob was written to or read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    KeyValue,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackend::File => write!(f, "save file"),
            StorageBackend::KeyValue => write!(f, "key-value store"),
        }
    }
}

// ---------------------------------------------------------------------------
// Native
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::collections::BTreeMap;
    use std::path::Path;

    use bevy::prelude::*;

    use crate::atomic_write::atomic_write;
    use crate::save_error::SaveError;

    pub(super) fn read_file(path: &Path) -> Result<Option<String>, SaveError> {
        match std::fs::read_to_string(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(super) fn write_file(path: &Path, data: &str) -> Result<(), SaveError> {
        atomic_write(path, data.as_bytes())?;
        Ok(())
    }

    fn read_prefs(path: &Path) -> Result<BTreeMap<String, String>, SaveError> {
        let Some(raw) = read_file(path)? else {
            return Ok(BTreeMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!("Ignoring unreadable preferences file {}: {e}", path.display());
                Ok(BTreeMap::new())
            }
        }
    }

    pub(super) fn kv_get(path: &Path, key: &str) -> Result<Option<String>, SaveError> {
        Ok(read_prefs(path)?.remove(key))
    }

    pub(super) fn kv_set(path: &Path, key: &str, value: &str) -> Result<(), SaveError> {
        let mut prefs = read_prefs(path)?;
        prefs.insert(key.to_string(), value.to_string());
        let json = serde_json::to_string(&prefs).map_err(|e| SaveError::Encode(e.to_string()))?;
        atomic_write(path, json.as_bytes())?;
        Ok(())
    }
}

/// Writes `data`, returning the backend that accepted it.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_save(config: &StorageConfig, data: &str) -> Result<StorageBackend, SaveError> {
    let file_err = match native::write_file(&config.save_path, data) {
        Ok(()) => return Ok(StorageBackend::File),
        Err(e) => e,
    };
    warn!(
        "Writing {} failed ({file_err}), falling back to the key-value store",
        config.save_path.display()
    );
    native::kv_set(&config.prefs_path, &config.kv_key, data)
        .map(|()| StorageBackend::KeyValue)
        .map_err(|kv_err| {
            SaveError::Unavailable(format!("file: {file_err}; key-value: {kv_err}"))
        })
}

/// Reads the stored blob: the file first, then the key-value entry.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_save(config: &StorageConfig) -> Result<Option<(StorageBackend, String)>, SaveError> {
    let file_result = native::read_file(&config.save_path);
    match &file_result {
        Ok(Some(data)) => return Ok(Some((StorageBackend::File, data.clone()))),
        Ok(None) => {}
        Err(e) => warn!("Reading {} failed: {e}", config.save_path.display()),
    }
    match native::kv_get(&config.prefs_path, &config.kv_key) {
        Ok(found) => Ok(found.map(|data| (StorageBackend::KeyValue, data))),
        Err(kv_err) => match file_result {
            Err(file_err) => Err(SaveError::Unavailable(format!(
                "file: {file_err}; key-value: {kv_err}"
            ))),
            Ok(_) => Err(kv_err),
        },
    }
}

// ---------------------------------------------------------------------------
// WASM
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, SaveError> {
    web_sys::window()
        .ok_or_else(|| SaveError::Unavailable("no window".to_string()))?
        .local_storage()
        .map_err(|e| SaveError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| SaveError::Unavailable("localStorage disabled".to_string()))
}

#[cfg(target_arch = "wasm32")]
pub fn write_save(config: &StorageConfig, data: &str) -> Result<StorageBackend, SaveError> {
    local_storage()?
        .set_item(&config.kv_key, data)
        .map_err(|e| SaveError::Unavailable(format!("{e:?}")))?;
    Ok(StorageBackend::KeyValue)
}

#[cfg(target_arch = "wasm32")]
pub fn read_save(config: &StorageConfig) -> Result<Option<(StorageBackend, String)>, SaveError> {
    let found = local_storage()?
        .get_item(&config.kv_key)
        .map_err(|e| SaveError::Unavailable(format!("{e:?}")))?;
    Ok(found.map(|data| (StorageBackend::KeyValue, data)))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::scratch_dir;

    #[test]
    fn test_write_prefers_file() {
        let dir = scratch_dir("storage_prefers_file");
        let config = StorageConfig::in_dir(&dir);

        let backend = write_save(&config, "{}").unwrap();

        assert_eq!(backend, StorageBackend::File);
        assert_eq!(std::fs::read_to_string(&config.save_path).unwrap(), "{}");
        assert!(!config.prefs_path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_falls_back_to_key_value_store() {
        let dir = scratch_dir("storage_fallback");
        let mut config = StorageConfig::in_dir(&dir);
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"file, not a dir").unwrap();
        config.save_path = blocker.join(SAVE_FILE_NAME);

        let backend = write_save(&config, "payload").unwrap();

        assert_eq!(backend, StorageBackend::KeyValue);
        let read = read_save(&config).unwrap();
        assert_eq!(read, Some((StorageBackend::KeyValue, "payload".to_string())));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_both_backends_failing_is_unavailable() {
        let dir = scratch_dir("storage_both_fail");
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, b"file, not a dir").unwrap();
        let config = StorageConfig {
            save_path: blocker.join(SAVE_FILE_NAME),
            prefs_path: blocker.join(PREFS_FILE_NAME),
            kv_key: KV_SAVE_KEY.to_string(),
        };

        let err = write_save(&config, "payload").unwrap_err();

        assert!(matches!(err, SaveError::Unavailable(_)), "got {err:?}");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_prefers_file_over_key_value() {
        let dir = scratch_dir("storage_read_order");
        let config = StorageConfig::in_dir(&dir);
        std::fs::write(&config.save_path, "from file").unwrap();
        native::kv_set(&config.prefs_path, &config.kv_key, "from prefs").unwrap();

        let read = read_save(&config).unwrap();

        assert_eq!(read, Some((StorageBackend::File, "from file".to_string())));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_read_nothing_stored() {
        let dir = scratch_dir("storage_empty");
        let config = StorageConfig::in_dir(&dir);
        assert_eq!(read_save(&config).unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_key_value_store_keeps_other_keys() {
        let dir = scratch_dir("storage_other_keys");
        let config = StorageConfig::in_dir(&dir);
        native::kv_set(&config.prefs_path, "volume", "0.5").unwrap();
        native::kv_set(&config.prefs_path, &config.kv_key, "blob").unwrap();

        assert_eq!(
            native::kv_get(&config.prefs_path, "volume").unwrap().as_deref(),
            Some("0.5")
        );
        assert_eq!(
            native::kv_get(&config.prefs_path, &config.kv_key)
                .unwrap()
                .as_deref(),
            Some("blob")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_prefs_file_reads_as_empty() {
        let dir = scratch_dir("storage_corrupt_prefs");
        let config = StorageConfig::in_dir(&dir);
        std::fs::write(&config.prefs_path, "{{{{").unwrap();
        assert_eq!(read_save(&config).unwrap(), None);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
