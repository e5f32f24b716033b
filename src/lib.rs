//! edgemap - CDN edge range and resolver steering mapper.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Mapping CDN address blocks and resolver-steered edge IPs to
//!   ASN/organization and coarse geography
//! - Flagging records whose geography intersects known
//!   infrastructure-incident regions
//! - Probing resolved edges for manifest health
//!
//! # Library Usage
//!
//! ```ignore
//! use edgemap::config::TargetConfig;
//! use edgemap::dns::DigResolver;
//! use edgemap::geo::GeoClient;
//! use edgemap::report::ReportBuilder;
//!
//! let config = TargetConfig::builtin();
//! let lookup = GeoClient::new(std::env::var("IPINFO_TOKEN").ok())?;
//! let resolver = DigResolver::new();
//! let rows = ReportBuilder::new(&config, &lookup, &resolver).collect().await;
//! edgemap::report::write_csv(&rows, "edge_region_map.csv")?;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Build the region map CSV (default command)
//! edgemap
//! edgemap map --output edges.csv
//!
//! # Probe resolver-steered edges
//! edgemap edges
//! edgemap edges --timeout 3
//!
//! # List configured blocks and resolvers
//! edgemap list
//! ```
//!
//! # Behavior
//!
//! Every per-address failure is soft: a missing credential, a failed
//! lookup, or a dead resolver degrades that record to empty fields and
//! the run continues. Only an unwritable report sink aborts a run.

pub mod cli;
pub mod config;
pub mod dns;
pub mod edge;
pub mod error;
pub mod geo;
pub mod incident;
pub mod report;

// Re-export commonly used types
pub use cli::{Cli, Commands};
pub use config::{AddressBlock, BlockStatus, ConfigLoader, ResolverSpec, TargetConfig};
pub use dns::{DigResolver, Resolver};
pub use edge::{EdgeProber, ResolverReport};
pub use error::{Error, Result};
pub use geo::{GeoClient, GeoInfo, IpLookup};
pub use incident::IncidentFlag;
pub use report::{ReportBuilder, ReportRow, RowSource};
