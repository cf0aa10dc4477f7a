//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations: code generation, expiry
//! enforcement, access counting, and the persistence round-trip that
//! follows every mutation. The CLI drives the application exclusively
//! through the service API.
//!
//! # Available Services
//!
//! - [`services::shortener_service::ShortenerStore`] - Short link creation,
//!   retrieval, statistics, and search

pub mod services;
