//! Storelink benchmarking suite
//!
//! Benchmarks for the offline hot paths: identifier resolution and
//! listing page interpretation.

pub mod common;

pub use common::*;
