//! Durable persistence of the URL mapping.
//!
//! The mapping is persisted wholesale to a local JSON file on every
//! mutation. There is exactly one implementation:
//!
//! - [`JsonFileStore`] - Pretty-printed JSON file, replaced atomically on save

pub mod json_store;

pub use json_store::JsonFileStore;
