//! Short URL creation, retrieval, and persistence orchestration.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::{ShortUrlEntry, UrlMap};
use crate::error::AppError;
use crate::infrastructure::mirror::RemoteMirror;
use crate::infrastructure::persistence::JsonFileStore;
use crate::utils::code_generator::generate_unique_code;

/// The shortener store: exclusive owner of the in-memory URL mapping.
///
/// Orchestrates the persistence protocol around every operation:
/// load pulls the remote copy (when one exists) over the local file before
/// parsing it, and every mutation (creation, counted retrieval, expiry
/// eviction) ends with a full save of the mapping to the local file
/// followed by a mirror upload.
///
/// The store is built for exactly one logical caller at a time. Mutating
/// operations take `&mut self`; there is no internal locking and no
/// rollback between the local write and the remote upload of a save.
pub struct ShortenerStore {
    entries: UrlMap,
    persistence: JsonFileStore,
    mirror: Arc<dyn RemoteMirror>,
    object_name: String,
    code_length: usize,
}

impl ShortenerStore {
    /// Creates an empty store over the given persistence and mirror.
    ///
    /// The remote object is named after the data file's basename. Call
    /// [`Self::load`] to populate the mapping.
    pub fn new(
        persistence: JsonFileStore,
        mirror: Arc<dyn RemoteMirror>,
        code_length: usize,
    ) -> Self {
        let object_name = persistence.object_name();

        Self {
            entries: UrlMap::new(),
            persistence,
            mirror,
            object_name,
            code_length,
        }
    }

    /// Loads the mapping, refreshing the local file from the mirror first.
    ///
    /// When the remote object exists it is downloaded over the local file
    /// before parsing, so the remote copy wins over a stale local file.
    /// This is a full overwrite, not a merge.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RemoteUnavailable`] if a mirror call fails,
    /// [`AppError::DataCorruption`] if the local file cannot be parsed.
    pub async fn load(&mut self) -> Result<(), AppError> {
        if self.mirror.exists(&self.object_name).await? {
            self.mirror
                .download(&self.object_name, self.persistence.path())
                .await?;
        }

        self.entries = self.persistence.load()?;
        info!("Loaded {} short links", self.entries.len());
        Ok(())
    }

    /// Persists the full mapping: local file first, then mirror upload.
    ///
    /// If the local write succeeds but the upload fails, the two copies
    /// diverge until the next successful save; the error still surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Io`] on local write failure and
    /// [`AppError::RemoteUnavailable`] on upload failure.
    pub async fn save(&self) -> Result<(), AppError> {
        self.persistence.save(&self.entries)?;
        self.mirror
            .upload(&self.object_name, self.persistence.path())
            .await?;
        Ok(())
    }

    /// Shortens a URL, returning the freshly generated code.
    ///
    /// The original URL is stored verbatim and may repeat across entries;
    /// codes are globally unique. The new entry starts with a zero access
    /// count and is persisted before the code is returned.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::save`] errors.
    pub async fn shorten_url(
        &mut self,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<String, AppError> {
        let code = generate_unique_code(&self.entries, self.code_length);
        let entry = ShortUrlEntry::new(code.clone(), original_url, expires_at);

        self.entries.insert(code.clone(), entry);
        self.save().await?;

        info!(code = %code, "Created short link");
        Ok(code)
    }

    /// Resolves a short code to its original URL.
    ///
    /// An entry whose expiry has passed is removed on lookup (lazy expiry;
    /// there is no background sweep) and reported the same as an unknown
    /// code. A successful resolution increments the entry's access count.
    /// Both side effects are persisted before returning.
    ///
    /// `now` is supplied by the caller so expiry decisions are
    /// deterministic under test.
    ///
    /// # Errors
    ///
    /// Returns the [`Self::save`] errors.
    pub async fn retrieve_url(
        &mut self,
        code: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, AppError> {
        let expired = match self.entries.get(code) {
            None => return Ok(None),
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.entries.remove(code);
            self.save().await?;
            info!(code = %code, "Evicted expired short link");
            return Ok(None);
        }

        let original_url = match self.entries.get_mut(code) {
            Some(entry) => {
                entry.access_count += 1;
                entry.original_url.clone()
            }
            None => return Ok(None),
        };

        self.save().await?;
        debug!(code = %code, "Resolved short link");
        Ok(Some(original_url))
    }

    /// Returns the entry for a code, including its access count and expiry.
    ///
    /// Pure read: no expiry check, no mutation, no save. An entry that has
    /// expired but was never retrieved still reports stats here. Stats are
    /// an audit view, while [`Self::retrieve_url`] is the live-serving
    /// path that evicts.
    pub fn get_stats(&self, code: &str) -> Option<&ShortUrlEntry> {
        self.entries.get(code)
    }

    /// Finds all entries whose original URL contains `substring`,
    /// case-insensitively.
    ///
    /// Returns a snapshot of matching entries sorted by short code, not a
    /// live view. No mutation, no save.
    pub fn find_by_original_url(&self, substring: &str) -> Vec<ShortUrlEntry> {
        let needle = substring.to_lowercase();

        let mut matches: Vec<ShortUrlEntry> = self
            .entries
            .values()
            .filter(|entry| entry.original_url.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.short_code.cmp(&b.short_code));
        matches
    }

    /// Number of entries currently in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the mapping holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mirror::{MirrorError, MockRemoteMirror, NullMirror};
    use mockall::predicate::eq;
    use std::fs;

    fn store_in(dir: &tempfile::TempDir) -> ShortenerStore {
        let persistence = JsonFileStore::new(dir.path().join("urlshortener.json"));
        ShortenerStore::new(persistence, Arc::new(NullMirror::new()), 6)
    }

    #[tokio::test]
    async fn test_load_skips_download_when_remote_object_missing() {
        let dir = tempfile::tempdir().unwrap();

        let mut mirror = MockRemoteMirror::new();
        mirror
            .expect_exists()
            .with(eq("urlshortener.json"))
            .times(1)
            .returning(|_| Ok(false));
        mirror.expect_download().times(0);

        let persistence = JsonFileStore::new(dir.path().join("urlshortener.json"));
        let mut store = ShortenerStore::new(persistence, Arc::new(mirror), 6);

        store.load().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_load_downloads_remote_copy_before_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urlshortener.json");

        // Stale local file that the remote copy must overwrite.
        fs::write(
            &path,
            r#"{ "stale1": { "short_code": "stale1", "original_url": "https://old.example", "access_count": 9, "expires_at": null } }"#,
        )
        .unwrap();

        let mut mirror = MockRemoteMirror::new();
        mirror.expect_exists().times(1).returning(|_| Ok(true));
        mirror.expect_download().times(1).returning(|_, path| {
            fs::write(
                path,
                r#"{ "fresh1": { "short_code": "fresh1", "original_url": "https://new.example", "access_count": 0, "expires_at": null } }"#,
            )
            .unwrap();
            Ok(())
        });

        let persistence = JsonFileStore::new(path);
        let mut store = ShortenerStore::new(persistence, Arc::new(mirror), 6);
        store.load().await.unwrap();

        assert!(store.get_stats("stale1").is_none());
        assert_eq!(
            store.get_stats("fresh1").unwrap().original_url,
            "https://new.example"
        );
    }

    #[tokio::test]
    async fn test_load_surfaces_mirror_failure_as_remote_unavailable() {
        let dir = tempfile::tempdir().unwrap();

        let mut mirror = MockRemoteMirror::new();
        mirror.expect_exists().returning(|_| {
            Err(MirrorError::ConnectionError("endpoint unreachable".into()))
        });

        let persistence = JsonFileStore::new(dir.path().join("urlshortener.json"));
        let mut store = ShortenerStore::new(persistence, Arc::new(mirror), 6);

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, AppError::RemoteUnavailable(_)));
    }

    #[tokio::test]
    async fn test_every_mutation_uploads_to_mirror() {
        let dir = tempfile::tempdir().unwrap();

        let mut mirror = MockRemoteMirror::new();
        mirror.expect_exists().returning(|_| Ok(false));
        // shorten + counted retrieve + expiry eviction = three uploads
        mirror
            .expect_upload()
            .with(eq("urlshortener.json"), mockall::predicate::always())
            .times(3)
            .returning(|_, _| Ok(()));

        let persistence = JsonFileStore::new(dir.path().join("urlshortener.json"));
        let mut store = ShortenerStore::new(persistence, Arc::new(mirror), 6);
        store.load().await.unwrap();

        let now = Utc::now();
        let code = store
            .shorten_url("https://a.com".to_string(), None)
            .await
            .unwrap();
        store.retrieve_url(&code, now).await.unwrap();

        // Force expiry on the entry, then retrieve to trigger eviction.
        store
            .entries
            .get_mut(&code)
            .unwrap()
            .expires_at = Some(now - chrono::Duration::days(1));
        store.retrieve_url(&code, now).await.unwrap();
    }

    #[tokio::test]
    async fn test_generated_codes_have_configured_length() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let code = store
            .shorten_url("https://a.com".to_string(), None)
            .await
            .unwrap();

        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[tokio::test]
    async fn test_duplicate_original_urls_get_distinct_codes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        let first = store
            .shorten_url("https://a.com".to_string(), None)
            .await
            .unwrap();
        let second = store
            .shorten_url("https://a.com".to_string(), None)
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);

        assert_eq!(store.retrieve_url("nope42", Utc::now()).await.unwrap(), None);
    }
}
