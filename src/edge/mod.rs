//! Edge probing module.
//!
//! This module verifies resolver-steered edges by fetching known
//! manifest endpoints directly from each edge address.

pub mod probe;

pub use probe::{
    probe_resolvers, EdgeHealth, EdgeProbe, EdgeProber, ResolverReport, ResolverVerdict,
};
