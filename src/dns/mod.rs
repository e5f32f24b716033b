//! DNS module.
//!
//! This module provides hostname resolution through named recursive
//! resolvers, backed by the system `dig` utility.

pub mod resolve;

pub use resolve::{DigResolver, Resolver, DEFAULT_TIMEOUT_SECS};
