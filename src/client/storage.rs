use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),
    #[error("Stored value is corrupt: {0}")]
    Corrupt(String),
}

/// One JSON document on disk, the local equivalent of a browser storage key.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<T>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    /// Replaces the stored document. Written to a sibling file first so a
    /// crash never leaves half a document behind.
    pub fn save(&self, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(value).map_err(|e| StorageError::Io(e.to_string()))?;
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, json).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::rename(&staging, &self.path).map_err(|e| StorageError::Io(e.to_string()))
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let file: JsonFile<Note> = JsonFile::new(dir.path().join("note.json"));
        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn saved_value_survives_a_new_handle() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("note.json");

        JsonFile::new(&path)
            .save(&Note { text: "γεια".into() })
            .unwrap();

        let reloaded: JsonFile<Note> = JsonFile::new(&path);
        assert_eq!(reloaded.load().unwrap(), Some(Note { text: "γεια".into() }));
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("note.json");
        fs::write(&path, "{ not json").unwrap();

        let file: JsonFile<Note> = JsonFile::new(&path);
        assert!(matches!(file.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn clearing_twice_is_fine() {
        let dir = tempdir().unwrap();
        let file: JsonFile<Note> = JsonFile::new(dir.path().join("note.json"));
        file.save(&Note { text: "x".into() }).unwrap();

        file.clear().unwrap();
        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
    }
}
