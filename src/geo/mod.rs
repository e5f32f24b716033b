//! Geo enrichment module.
//!
//! This module provides the per-address geo lookup client and the sparse
//! result types it produces.

pub mod client;
pub mod types;

pub use client::{GeoClient, IpLookup, PLACEHOLDER_TOKEN};
pub use types::{GeoInfo, IpinfoResponse};
