//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence or transport
//! concerns. The whole data model of this service is one record type:
//!
//! - [`ShortUrlEntry`] - A short code → original URL mapping with usage
//!   bookkeeping
//! - [`UrlMap`] - The full keyed collection owned by the shortener store

pub mod entry;

pub use entry::{ShortUrlEntry, UrlMap};
