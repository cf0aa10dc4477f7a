#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use shortvault::domain::entities::UrlMap;
use shortvault::infrastructure::mirror::{MirrorError, MirrorResult, RemoteMirror};

/// In-memory object store double for integration tests.
///
/// Holds object bytes in a map and counts uploads, so tests can assert on
/// the full mirror protocol (existence check, download-before-parse,
/// upload-after-mutation) without a network.
pub struct InMemoryMirror {
    objects: Mutex<HashMap<String, Vec<u8>>>,
    uploads: AtomicUsize,
}

impl InMemoryMirror {
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            uploads: AtomicUsize::new(0),
        }
    }

    /// Seeds the mirror with a pre-existing object.
    pub fn with_object(name: &str, bytes: Vec<u8>) -> Self {
        let mirror = Self::new();
        mirror.objects.lock().unwrap().insert(name.to_string(), bytes);
        mirror
    }

    /// Bytes currently stored for an object, if any.
    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).cloned()
    }

    /// Number of uploads performed so far.
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }

    /// Parses the stored object as a URL mapping.
    pub fn object_as_map(&self, name: &str) -> Option<UrlMap> {
        let bytes = self.object(name)?;
        serde_json::from_slice(&bytes).ok()
    }
}

#[async_trait]
impl RemoteMirror for InMemoryMirror {
    async fn exists(&self, object_name: &str) -> MirrorResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(object_name))
    }

    async fn upload(&self, object_name: &str, local_path: &Path) -> MirrorResult<()> {
        let bytes = fs::read(local_path)
            .map_err(|e| MirrorError::OperationError(format!("read failed: {}", e)))?;

        self.objects
            .lock()
            .unwrap()
            .insert(object_name.to_string(), bytes);
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn download(&self, object_name: &str, local_path: &Path) -> MirrorResult<()> {
        let bytes = self
            .objects
            .lock()
            .unwrap()
            .get(object_name)
            .cloned()
            .ok_or_else(|| {
                MirrorError::OperationError(format!("no such object: {}", object_name))
            })?;

        fs::write(local_path, bytes)
            .map_err(|e| MirrorError::OperationError(format!("write failed: {}", e)))?;
        Ok(())
    }
}
