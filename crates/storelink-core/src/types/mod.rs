//! Core data types for storelink lookups.
//!
//! This module provides the fundamental types used throughout storelink:
//! - The canonical product identifier
//! - Artifact entries with their kind and architecture classification
//! - The deduplicated catalog and size probe results

pub mod artifact;
pub mod catalog;
pub mod product_id;

// Re-export all public types
pub use artifact::{Architecture, ArtifactEntry, ArtifactKind, SizeDisplay};
pub use catalog::{Catalog, SizeMap, MAX_PROBE_BATCH};
pub use product_id::ProductId;
