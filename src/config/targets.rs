//! Target configuration types.
//!
//! This module provides the types describing what a mapping run operates
//! on: the hostname whose edges are resolved, the CDN address blocks that
//! are sampled, and the recursive resolvers that are queried.

use serde::{Deserialize, Serialize};

/// Hostname whose edge IPs are resolved by default.
pub const DEFAULT_HOST: &str = "armmf.adobe.com";

/// Akamai IPv4 ranges currently listed in the origin IP ACL.
const ACTIVE_IPV4: &[&str] = &[
    "2.16.0.0/13",
    "23.0.0.0/12",
    "23.192.0.0/11",
    "23.32.0.0/11",
    "95.100.0.0/15",
    "184.24.0.0/13",
];

/// Akamai IPv4 ranges removed from the origin IP ACL (as of 2025-07-01).
/// Edges observed in the wild still fall in these, so they stay mapped.
const REMOVED_IPV4: &[&str] = &[
    "23.64.0.0/14",
    "23.72.0.0/13",
    "69.192.0.0/16",
    "72.246.0.0/15",
    "88.221.0.0/16",
    "92.122.0.0/15",
    "96.16.0.0/15",
    "96.6.0.0/15",
    "104.64.0.0/10",
    "118.214.0.0/16",
    "172.224.0.0/12",
    "172.232.0.0/13",
    "172.224.0.0/13",
    "173.222.0.0/15",
    "184.50.0.0/15",
    "184.84.0.0/14",
];

/// Recursive resolvers compared by the mapping run, in query order.
/// An absent address means the system default resolver.
const RESOLVERS: &[(&str, Option<&str>)] = &[
    ("local", None),
    ("google", Some("8.8.8.8")),
    ("cloudflare", Some("1.1.1.1")),
    ("quad9", Some("9.9.9.9")),
    ("opendns", Some("208.67.222.222")),
];

/// Lifecycle status of a CDN address block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlockStatus {
    /// Block is in the current origin ACL
    Active,
    /// Block was removed from the origin ACL but may still serve edges
    Removed,
}

impl std::fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Removed => write!(f, "Removed"),
        }
    }
}

/// A CDN address block in CIDR notation, tagged with its ACL status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AddressBlock {
    /// CIDR descriptor, e.g. "184.24.0.0/13"
    pub cidr: String,
    /// ACL lifecycle status
    pub status: BlockStatus,
}

impl AddressBlock {
    /// Create a new address block.
    pub fn new(cidr: impl Into<String>, status: BlockStatus) -> Self {
        Self {
            cidr: cidr.into(),
            status,
        }
    }

    /// Pick one representative address inside the block to look up.
    ///
    /// Takes the first three octets of the base address and appends `.1`.
    /// Prefix length is deliberately ignored: for short prefixes the sample
    /// can fall outside the nominal range, which is acceptable for a
    /// geo lookup sample.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let block = AddressBlock::new("184.24.0.0/13", BlockStatus::Active);
    /// assert_eq!(block.sample_ip(), "184.24.0.1");
    /// ```
    #[must_use]
    pub fn sample_ip(&self) -> String {
        let base = self.cidr.split('/').next().unwrap_or_default();
        let prefix: Vec<&str> = base.split('.').take(3).collect();
        format!("{}.1", prefix.join("."))
    }
}

/// A recursive resolver to query, identified by name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolverSpec {
    /// Human-readable resolver name (e.g. "cloudflare")
    pub name: String,
    /// Resolver IP address; `None` means the system default resolver
    #[serde(default)]
    pub address: Option<String>,
}

impl ResolverSpec {
    /// Create a resolver spec with an explicit address.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: Some(address.into()),
        }
    }

    /// Create a resolver spec for the system default resolver.
    pub fn system(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
        }
    }
}

/// Everything a mapping run operates on.
///
/// Loaded from a JSON override file or constructed from the built-in
/// tables. List order is significant: blocks are reported active-first in
/// declared order, and resolved addresses are attributed to the first
/// resolver (in this order) that returned them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Hostname to resolve through each configured resolver
    #[serde(default = "default_host")]
    pub host: String,
    /// Active CIDR blocks, in declared order
    #[serde(default)]
    pub active: Vec<String>,
    /// Removed CIDR blocks, in declared order
    #[serde(default)]
    pub removed: Vec<String>,
    /// Resolvers to query, in declared order
    #[serde(default)]
    pub resolvers: Vec<ResolverSpec>,
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl TargetConfig {
    /// Build the configuration from the built-in tables.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            active: ACTIVE_IPV4.iter().map(ToString::to_string).collect(),
            removed: REMOVED_IPV4.iter().map(ToString::to_string).collect(),
            resolvers: RESOLVERS
                .iter()
                .map(|(name, addr)| ResolverSpec {
                    name: (*name).to_string(),
                    address: addr.map(ToString::to_string),
                })
                .collect(),
        }
    }

    /// All blocks in report order: active blocks first, then removed
    /// blocks, each list in its declared order.
    #[must_use]
    pub fn blocks(&self) -> Vec<AddressBlock> {
        self.active
            .iter()
            .map(|c| AddressBlock::new(c, BlockStatus::Active))
            .chain(
                self.removed
                    .iter()
                    .map(|c| AddressBlock::new(c, BlockStatus::Removed)),
            )
            .collect()
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_ip_first_host() {
        let block = AddressBlock::new("184.24.0.0/13", BlockStatus::Active);
        assert_eq!(block.sample_ip(), "184.24.0.1");
    }

    #[test]
    fn test_sample_ip_ignores_prefix_length() {
        // /10 nominally spans 104.64.0.0 - 104.127.255.255; the sampler
        // still answers base.1 without widening the third octet.
        let block = AddressBlock::new("104.64.0.0/10", BlockStatus::Removed);
        assert_eq!(block.sample_ip(), "104.64.0.1");
    }

    #[test]
    fn test_sample_ip_nonzero_third_octet() {
        let block = AddressBlock::new("23.192.4.0/22", BlockStatus::Active);
        assert_eq!(block.sample_ip(), "23.192.4.1");
    }

    #[test]
    fn test_builtin_block_order() {
        let config = TargetConfig::builtin();
        let blocks = config.blocks();

        assert_eq!(blocks.len(), 22);
        assert_eq!(blocks[0].cidr, "2.16.0.0/13");
        assert_eq!(blocks[0].status, BlockStatus::Active);
        assert_eq!(blocks[5].cidr, "184.24.0.0/13");
        assert_eq!(blocks[5].status, BlockStatus::Active);
        assert_eq!(blocks[6].cidr, "23.64.0.0/14");
        assert_eq!(blocks[6].status, BlockStatus::Removed);
        assert!(blocks[6..].iter().all(|b| b.status == BlockStatus::Removed));
    }

    #[test]
    fn test_builtin_resolver_order() {
        let config = TargetConfig::builtin();
        let names: Vec<&str> = config.resolvers.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["local", "google", "cloudflare", "quad9", "opendns"]
        );
        assert!(config.resolvers[0].address.is_none());
        assert_eq!(config.resolvers[1].address.as_deref(), Some("8.8.8.8"));
    }

    #[test]
    fn test_resolver_spec_constructors() {
        let explicit = ResolverSpec::new("google", "8.8.8.8");
        assert_eq!(explicit.address.as_deref(), Some("8.8.8.8"));

        let system = ResolverSpec::system("local");
        assert!(system.address.is_none());
    }
}
