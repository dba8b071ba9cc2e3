//! Listing client for storelink
//!
//! This crate talks to the upstream listing service and to the artifact
//! hosts: it fetches the HTML listing for a product id, turns it into a
//! deduplicated, classified catalog, and probes artifact sizes with
//! single-byte range requests.

pub mod api;
pub mod client;
pub mod listing;
pub mod probe;

// Re-export main types
pub use api::ApiResponse;
pub use client::StoreClient;
pub use listing::{parse_listing, ListingDocument, RawAnchor};
pub use probe::{parse_content_range, probe_sizes};

use storelink_core::error::StoreError;

/// Result type for client operations
pub type ClientResult<T> = Result<T, StoreError>;
