//! Remote mirror trait and error types.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;

/// Errors that can occur during mirror operations.
#[derive(Debug)]
pub enum MirrorError {
    /// The remote endpoint could not be reached at all.
    ConnectionError(String),
    /// The endpoint answered, but the operation failed (auth, missing
    /// bucket, unexpected status, local file trouble mid-transfer).
    OperationError(String),
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Mirror connection error: {}", e),
            Self::OperationError(e) => write!(f, "Mirror operation error: {}", e),
        }
    }
}

impl std::error::Error for MirrorError {}

/// Result type for mirror operations.
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Trait for mirroring the local data file to a remote object store.
///
/// The store consumes exactly three capabilities, keyed by a single object
/// name: existence check, upload, download. Transport concerns (auth,
/// retries, timeouts) belong to implementations; none of the calls retry
/// here, and a failure surfaces as-is from the load/save that triggered it.
///
/// # Implementations
///
/// - [`crate::infrastructure::mirror::HttpMirror`] - S3-compatible HTTP object store
/// - [`crate::infrastructure::mirror::NullMirror`] - No-op implementation for disabled mirroring
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteMirror: Send + Sync {
    /// Checks whether the named object exists on the remote.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] if the remote cannot be reached or answers
    /// with anything other than "found" / "not found".
    async fn exists(&self, object_name: &str) -> MirrorResult<bool>;

    /// Uploads the local file at `local_path` as the named object,
    /// replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] on transport failure, a non-success remote
    /// status, or if the local file cannot be read.
    async fn upload(&self, object_name: &str, local_path: &Path) -> MirrorResult<()>;

    /// Downloads the named object to `local_path`, overwriting the local
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`MirrorError`] on transport failure, a non-success remote
    /// status, or if the local file cannot be written.
    async fn download(&self, object_name: &str, local_path: &Path) -> MirrorResult<()>;
}
