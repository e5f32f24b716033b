//! Configuration module.
//!
//! This module provides the target configuration (host, CDN blocks,
//! resolver list) and the loader that resolves it from files or built-in
//! defaults.

pub mod loader;
pub mod targets;

pub use loader::ConfigLoader;
pub use targets::{AddressBlock, BlockStatus, ResolverSpec, TargetConfig, DEFAULT_HOST};
