//! # storelink-core
//!
//! Core types and utilities shared across all storelink crates.
//!
//! This crate provides:
//! - `ProductId`, the canonical 12-character package identifier
//! - `ArtifactEntry`, `Catalog` and the kind/architecture classification
//! - `StoreError` enum for unified error handling
//! - The identifier resolver that turns storefront links into a `ProductId`
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ProductId, ArtifactEntry, Catalog, etc.)
//! - `error`: Error types and result aliases
//! - `resolve`: Identifier extraction from raw ids and storefront URLs

pub mod error;
pub mod resolve;
pub mod types;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use resolve::resolve;
pub use types::{
    Architecture, ArtifactEntry, ArtifactKind, Catalog, ProductId, SizeDisplay, SizeMap,
    MAX_PROBE_BATCH,
};
