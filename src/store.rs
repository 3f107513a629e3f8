use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::playlist::Playlist;

/// Durable backing for the playlist: one JSON document, fully overwritten on
/// every write. Rotation state is never persisted.
#[derive(Debug, Clone)]
pub struct PlaylistStore {
    path: PathBuf,
}

impl PlaylistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the playlist document. A missing file is a first boot and
    /// returns `Ok(None)`; a present but malformed document (bad JSON,
    /// non-string URL, missing or non-positive duration) is rejected whole
    /// as [`Error::CorruptConfig`] rather than coerced entry by entry.
    pub fn load(&self) -> Result<Option<Playlist>, Error> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let playlist: Playlist =
            serde_json::from_slice(&data).map_err(|err| Error::CorruptConfig {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        playlist.validate().map_err(|err| Error::CorruptConfig {
            path: self.path.clone(),
            message: err.to_string(),
        })?;
        Ok(Some(playlist))
    }

    /// Overwrites the backing document with `playlist`. No partial or merge
    /// writes.
    pub fn save(&self, playlist: &Playlist) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(playlist)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
