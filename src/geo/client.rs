//! IP geo lookup client.
//!
//! Wraps the ipinfo.io per-address lookup. The client is fail-open: a
//! missing or placeholder credential disables lookups entirely, and any
//! transport or status failure degrades that one lookup to an empty
//! result so a batch run always completes.

use crate::error::Result;
use crate::geo::types::{GeoInfo, IpinfoResponse};
use async_trait::async_trait;
use std::time::Duration;

/// Placeholder credential that disables network lookups.
pub const PLACEHOLDER_TOKEN: &str = "YOUR_TOKEN_HERE";

/// The lookup service base URL.
const DEFAULT_BASE_URL: &str = "https://ipinfo.io";

/// Timeout for a single lookup request in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Per-address lookup seam.
///
/// Implemented by [`GeoClient`] for real lookups; report assembly is
/// generic over this trait so it can be driven without network access.
#[async_trait]
pub trait IpLookup {
    /// Look up one address. Never fails: lookup problems come back as
    /// [`GeoInfo::empty`].
    async fn lookup(&self, ip: &str) -> GeoInfo;
}

/// HTTP client for the ipinfo.io lookup endpoint.
///
/// # Example
///
/// ```ignore
/// let client = GeoClient::new(std::env::var("IPINFO_TOKEN").ok())?;
/// let info = client.lookup("184.24.0.1").await;
/// println!("{} {}", info.country, info.city);
/// ```
pub struct GeoClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GeoClient {
    /// Create a client against the production endpoint.
    ///
    /// A `token` of `None`, empty, or the documented placeholder leaves
    /// the client in disabled mode: every lookup answers empty without
    /// touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (used by tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn with_base_url(token: Option<String>, base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        let token = token.filter(|t| !t.is_empty() && t != PLACEHOLDER_TOKEN);
        if token.is_none() {
            tracing::warn!("no lookup token configured, geo enrichment disabled");
        }

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Whether the client holds a usable credential.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl IpLookup for GeoClient {
    async fn lookup(&self, ip: &str) -> GeoInfo {
        let Some(token) = &self.token else {
            return GeoInfo::empty();
        };

        let url = format!("{}/{}", self.base_url, ip);
        tracing::debug!(ip, "geo lookup");

        let response = match self
            .http
            .get(&url)
            .query(&[("token", token.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(ip, "lookup request failed: {e}");
                return GeoInfo::empty();
            }
        };

        if !response.status().is_success() {
            tracing::debug!(ip, status = %response.status(), "lookup answered non-success");
            return GeoInfo::empty();
        }

        match response.json::<IpinfoResponse>().await {
            Ok(raw) => GeoInfo::from(raw),
            Err(e) => {
                tracing::debug!(ip, "lookup body unreadable: {e}");
                GeoInfo::empty()
            }
        }
    }
}
