//! Short URL entry representing one code → URL mapping.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The full in-memory mapping, keyed by short code.
pub type UrlMap = HashMap<String, ShortUrlEntry>;

/// A shortened URL record.
///
/// One entry per short code. The original URL is stored verbatim; no
/// validation or normalization is applied. `expires_at = None` means the
/// entry never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortUrlEntry {
    pub short_code: String,
    pub original_url: String,
    pub access_count: u64,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortUrlEntry {
    /// Creates a fresh entry with a zero access count.
    pub fn new(
        short_code: String,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            short_code,
            original_url,
            access_count: 0,
            expires_at,
        }
    }

    /// Returns true if the entry has passed its expiry time.
    ///
    /// The comparison is strict: an entry whose expiry equals `now` still
    /// resolves. `now` is injected so expiry logic stays deterministic in
    /// tests.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| e < now)
    }
}
