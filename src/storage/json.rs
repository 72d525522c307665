use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{DiaryStorage, StorageError, Users};

/// Pretty-printed JSON document at a fixed path.
///
/// Writes truncate the file and rewrite it; there is no temp-file swap.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DiaryStorage for JsonFileStorage {
    fn load(&self) -> Result<Users, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No data file yet, starting empty");
                return Ok(Users::new());
            }
            Err(e) => return Err(e.into()),
        };

        let users: Users = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), users = users.len(), "Loaded snapshot");
        Ok(users)
    }

    fn save(&self, users: &Users) -> Result<(), StorageError> {
        let mut body = serde_json::to_string_pretty(users)?;
        body.push('\n');
        fs::write(&self.path, body)?;
        tracing::debug!(path = %self.path.display(), users = users.len(), "Saved snapshot");
        Ok(())
    }
}
