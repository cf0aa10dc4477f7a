//! No-op mirror implementation for disabled remote mirroring.

use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use super::service::{MirrorResult, RemoteMirror};

/// A mirror implementation that does nothing.
///
/// Used when no remote endpoint is configured. `exists` always reports
/// false, so a load never tries to refresh the local file, and transfers
/// succeed immediately without moving any data. The store holds this
/// variant instead of branching on an "enabled" flag.
pub struct NullMirror;

impl NullMirror {
    /// Creates a new NullMirror instance.
    pub fn new() -> Self {
        debug!("Using NullMirror (remote mirroring disabled)");
        Self
    }
}

impl Default for NullMirror {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteMirror for NullMirror {
    async fn exists(&self, _object_name: &str) -> MirrorResult<bool> {
        Ok(false)
    }

    async fn upload(&self, _object_name: &str, _local_path: &Path) -> MirrorResult<()> {
        Ok(())
    }

    async fn download(&self, _object_name: &str, _local_path: &Path) -> MirrorResult<()> {
        Ok(())
    }
}
