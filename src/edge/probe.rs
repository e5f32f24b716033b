//! Edge health probing.
//!
//! Verifies the edges each resolver steers the target host to, by
//! fetching the mac manifest endpoints directly from every resolved edge
//! address (the connection is pinned to the edge, the way
//! `curl --resolve` does it) and classifying the answers.

use crate::config::ResolverSpec;
use crate::error::{Error, Result};
use std::net::SocketAddr;
use std::time::Duration;

/// Version-file path; a healthy edge answers a short version string.
const VERSION_PATH: &str = "/arm-manifests/mac/AcrobatDC/acrobat/current_version.txt";

/// Manifest path fetched alongside the version file for its length/ETag.
const MANIFEST_PATH: &str = "/arm-manifests/mac/AcrobatDC/acrobat/AcrobatManifest.arm";

/// Body length of a healthy version file, e.g. "25.001.20693".
const HEALTHY_VERSION_LEN: usize = 12;

/// Default timeout for one edge fetch in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Resolvers probed by the edges command, in query order. A superset of
/// the mapping resolvers: both addresses of each anycast pair, since the
/// pairs can steer to different edges.
const PROBE_RESOLVERS: &[(&str, Option<&str>)] = &[
    ("local", None),
    ("opendns-1", Some("208.67.222.222")),
    ("opendns-2", Some("208.67.220.220")),
    ("lumen-1", Some("4.2.2.1")),
    ("lumen-2", Some("4.2.2.2")),
    ("quad9-1", Some("9.9.9.9")),
    ("quad9-2", Some("149.112.112.112")),
    ("comodo-1", Some("8.26.56.26")),
    ("comodo-2", Some("8.20.247.20")),
    ("google", Some("8.8.8.8")),
    ("cloudflare", Some("1.1.1.1")),
    ("vodafone-zayo", Some("207.126.96.248")),
];

/// The extended resolver list used by edge probing.
#[must_use]
pub fn probe_resolvers() -> Vec<ResolverSpec> {
    PROBE_RESOLVERS
        .iter()
        .map(|(name, addr)| ResolverSpec {
            name: (*name).to_string(),
            address: addr.map(ToString::to_string),
        })
        .collect()
}

/// Health classification of a single edge address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeHealth {
    /// Version file has the expected length
    Good,
    /// Version file is empty
    Bad,
    /// Fetch failed, timed out, or answered an unexpected length
    Unknown,
}

impl std::fmt::Display for EdgeHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "GOOD"),
            Self::Bad => write!(f, "BAD"),
            Self::Unknown => write!(f, "UNK"),
        }
    }
}

/// Aggregate verdict for one resolver's edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverVerdict {
    /// Every probed edge was good
    Good,
    /// Every probed edge was bad
    Bad,
    /// Edges disagree
    Mixed,
    /// Nothing could be classified
    Unknown,
}

impl std::fmt::Display for ResolverVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Good => write!(f, "GOOD"),
            Self::Bad => write!(f, "BAD"),
            Self::Mixed => write!(f, "MIXED"),
            Self::Unknown => write!(f, "UNK"),
        }
    }
}

/// Probe outcome for one edge address.
#[derive(Debug, Clone)]
pub struct EdgeProbe {
    /// The edge address that was probed
    pub ip: String,
    /// Health classification
    pub health: EdgeHealth,
    /// Version-file body length, `None` when the fetch failed
    pub version_len: Option<usize>,
    /// Manifest body length, `None` when the fetch failed
    pub manifest_len: Option<usize>,
    /// Version-file ETag, empty when absent
    pub etag: String,
}

/// All probes performed for one resolver.
#[derive(Debug, Clone)]
pub struct ResolverReport {
    /// Resolver name
    pub name: String,
    /// Per-edge probe outcomes, in resolution order
    pub probes: Vec<EdgeProbe>,
}

impl ResolverReport {
    /// Aggregate the per-edge classifications.
    #[must_use]
    pub fn verdict(&self) -> ResolverVerdict {
        if self.probes.is_empty() {
            return ResolverVerdict::Unknown;
        }
        let all = |health: EdgeHealth| self.probes.iter().all(|p| p.health == health);
        if all(EdgeHealth::Good) {
            ResolverVerdict::Good
        } else if all(EdgeHealth::Bad) {
            ResolverVerdict::Bad
        } else if all(EdgeHealth::Unknown) {
            ResolverVerdict::Unknown
        } else {
            ResolverVerdict::Mixed
        }
    }
}

/// Probes edges for a fixed host.
///
/// # Example
///
/// ```ignore
/// let prober = EdgeProber::new("armmf.adobe.com");
/// let probe = prober.probe_edge("23.11.224.68").await;
/// println!("{}: {}", probe.ip, probe.health);
/// ```
pub struct EdgeProber {
    host: String,
    timeout: Duration,
}

impl EdgeProber {
    /// Create a prober for the given host with the default timeout.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create a prober with a custom per-fetch timeout.
    pub fn with_timeout(host: impl Into<String>, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            timeout,
        }
    }

    /// Probe a single edge address.
    ///
    /// Fetches the version file and the manifest from the edge and
    /// classifies the result. Fetch failures degrade to
    /// [`EdgeHealth::Unknown`], never to an error.
    pub async fn probe_edge(&self, ip: &str) -> EdgeProbe {
        let client = match self.pinned_client(ip) {
            Ok(client) => client,
            Err(e) => {
                tracing::debug!(ip, "cannot build pinned client: {e}");
                return EdgeProbe {
                    ip: ip.to_string(),
                    health: EdgeHealth::Unknown,
                    version_len: None,
                    manifest_len: None,
                    etag: String::new(),
                };
            }
        };

        let version = self.fetch(&client, VERSION_PATH).await;
        let manifest = self.fetch(&client, MANIFEST_PATH).await;

        let version_len = version.as_ref().map(|(len, _)| *len);
        EdgeProbe {
            ip: ip.to_string(),
            health: classify(version_len),
            version_len,
            manifest_len: manifest.as_ref().map(|(len, _)| *len),
            etag: version.and_then(|(_, etag)| etag).unwrap_or_default(),
        }
    }

    /// Probe every edge in `ips`, in order.
    pub async fn probe_all(&self, ips: &[String]) -> Vec<EdgeProbe> {
        let mut probes = Vec::with_capacity(ips.len());
        for ip in ips {
            probes.push(self.probe_edge(ip).await);
        }
        probes
    }

    /// Build an HTTPS client whose connections to the host are pinned to
    /// the given edge address.
    fn pinned_client(&self, ip: &str) -> Result<reqwest::Client> {
        let addr: SocketAddr = format!("{ip}:443")
            .parse()
            .map_err(|_| Error::parse(format!("invalid edge address: {ip}")))?;
        let client = reqwest::Client::builder()
            .resolve(&self.host, addr)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }

    /// Fetch one path from the pinned edge. Answers the body length and
    /// the ETag header; `None` on any transport or status failure.
    async fn fetch(&self, client: &reqwest::Client, path: &str) -> Option<(usize, Option<String>)> {
        let url = format!("https://{}{}", self.host, path);
        let response = match client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url, "edge fetch failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "edge answered non-success");
            return None;
        }

        let etag = response
            .headers()
            .get(reqwest::header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await.ok()?;
        Some((body.len(), etag))
    }
}

/// Classify an edge by its version-file body length.
fn classify(version_len: Option<usize>) -> EdgeHealth {
    match version_len {
        Some(HEALTHY_VERSION_LEN) => EdgeHealth::Good,
        Some(0) => EdgeHealth::Bad,
        _ => EdgeHealth::Unknown,
    }
}
