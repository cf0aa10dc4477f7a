//! Application error types.
//!
//! A missing or expired short code is not an error: lookups return
//! `Option`/`Ok(None)` instead. Errors cover the failure modes an operator
//! has to act on: a local data file that cannot be parsed, an unreachable
//! remote mirror, and plain I/O failures. Corruption and mirror outages are
//! kept as separate variants so "remote is down" is distinguishable from
//! "local data is bad".

use std::path::PathBuf;

use crate::infrastructure::mirror::MirrorError;

/// Top-level error type for store and persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The local data file exists but could not be parsed.
    ///
    /// Fatal for the load that hit it; no automatic recovery is attempted.
    /// Repair the file by hand or restore it from the remote mirror.
    #[error("data file {path} is corrupted: {source}")]
    DataCorruption {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A remote mirror capability (exists/upload/download) failed.
    #[error("remote mirror unavailable: {0}")]
    RemoteUnavailable(#[from] MirrorError),

    /// Local filesystem read or write failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn corruption(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::DataCorruption {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
