//! JSON file implementation of the durable store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::domain::entities::UrlMap;
use crate::error::AppError;

/// Durable store that serializes the full mapping to a local JSON file.
///
/// The on-disk format is a single pretty-printed JSON object keyed by
/// short code. Every save replaces the whole file; there is no appending
/// or incremental writing. Writes go through a temp-file sibling followed
/// by a rename, so a crash mid-save leaves the previous file intact.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    ///
    /// The file is not touched here; it may not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the backing file, used as the remote mirror object name.
    ///
    /// Falls back to the full path string for paths without a final
    /// component (which a configured data file never has in practice).
    pub fn object_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Loads the full mapping from disk.
    ///
    /// A missing file is not an error: it yields an empty mapping, the
    /// state of a first run. A file that exists but cannot be parsed is
    /// [`AppError::DataCorruption`]; the store never silently replaces
    /// unreadable data with an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::DataCorruption`] on parse failure and
    /// [`AppError::Io`] if an existing file cannot be read.
    pub fn load(&self) -> Result<UrlMap, AppError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Data file {} not found, starting empty", self.path.display());
                return Ok(UrlMap::new());
            }
            Err(e) => return Err(AppError::io(&self.path, e)),
        };

        let map: UrlMap = serde_json::from_str(&content)
            .map_err(|e| AppError::corruption(&self.path, e))?;

        debug!("Loaded {} entries from {}", map.len(), self.path.display());
        Ok(map)
    }

    /// Serializes the full mapping to disk, replacing the previous file.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] if the temp file cannot be written or the
    /// rename over the target fails.
    pub fn save(&self, map: &UrlMap) -> Result<(), AppError> {
        // to_string_pretty on a map of plain serializable values cannot fail;
        // treat a failure as corruption of the in-memory state anyway.
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| AppError::corruption(&self.path, e))?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json).map_err(|e| AppError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| AppError::io(&self.path, e))?;

        debug!("Saved {} entries to {}", map.len(), self.path.display());
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_is_file_basename() {
        let store = JsonFileStore::new("/var/lib/shortvault/urlshortener.json");
        assert_eq!(store.object_name(), "urlshortener.json");
    }

    #[test]
    fn test_tmp_path_is_sibling() {
        let store = JsonFileStore::new("data/urlshortener.json");
        assert_eq!(store.tmp_path(), PathBuf::from("data/urlshortener.json.tmp"));
    }
}
