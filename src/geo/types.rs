//! Geo lookup data types.
//!
//! The upstream lookup answers free-form JSON where any field may be
//! absent, so the wire type is all-optional and the report-facing type
//! defaults every field to an empty string.

use serde::{Deserialize, Serialize};

/// Organizational and geographic attributes for one address.
///
/// Every field is a plain string, empty when the upstream source omitted
/// it or the lookup failed. Coordinates are never carried, by contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GeoInfo {
    /// Autonomous system identifier, e.g. "AS20940"
    pub asn: String,
    /// Organization name, e.g. "Akamai International B.V."
    pub org: String,
    /// ISO country code, e.g. "IN"
    pub country: String,
    /// Region or state name
    pub region: String,
    /// City name
    pub city: String,
    /// "true" when the address is anycast, "false" when explicitly not,
    /// empty when the source did not say
    pub anycast: String,
}

impl GeoInfo {
    /// The all-empty result used whenever a lookup is skipped or fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asn.is_empty()
            && self.org.is_empty()
            && self.country.is_empty()
            && self.region.is_empty()
            && self.city.is_empty()
            && self.anycast.is_empty()
    }
}

/// Raw upstream response.
///
/// Sparse by design: the service omits fields freely, and extra fields
/// (notably the `loc` coordinates) are ignored rather than modeled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpinfoResponse {
    /// Organization string: AS identifier followed by a free-text name
    #[serde(default)]
    pub org: Option<String>,
    /// ISO country code
    #[serde(default)]
    pub country: Option<String>,
    /// Region or state name
    #[serde(default)]
    pub region: Option<String>,
    /// City name
    #[serde(default)]
    pub city: Option<String>,
    /// Anycast indicator
    #[serde(default)]
    pub anycast: Option<bool>,
}

impl From<IpinfoResponse> for GeoInfo {
    fn from(raw: IpinfoResponse) -> Self {
        let (asn, org) = split_org(raw.org.as_deref().unwrap_or_default());
        Self {
            asn,
            org,
            country: raw.country.unwrap_or_default(),
            region: raw.region.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            anycast: raw.anycast.map(|a| a.to_string()).unwrap_or_default(),
        }
    }
}

/// Split an upstream organization string into (AS identifier, name).
///
/// The identifier is the first whitespace-delimited token; the name is
/// the rest with internal whitespace runs collapsed. Either half is empty
/// when the source omitted it.
pub(crate) fn split_org(org: &str) -> (String, String) {
    let mut parts = org.split_whitespace();
    let asn = parts.next().unwrap_or_default().to_string();
    let name = parts.collect::<Vec<_>>().join(" ");
    (asn, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_org() {
        let (asn, name) = split_org("AS1234 Example Org Name");
        assert_eq!(asn, "AS1234");
        assert_eq!(name, "Example Org Name");
    }

    #[test]
    fn test_split_org_empty() {
        let (asn, name) = split_org("");
        assert_eq!(asn, "");
        assert_eq!(name, "");
    }

    #[test]
    fn test_split_org_identifier_only() {
        let (asn, name) = split_org("AS20940");
        assert_eq!(asn, "AS20940");
        assert_eq!(name, "");
    }

    #[test]
    fn test_split_org_collapses_whitespace() {
        let (asn, name) = split_org("AS20940  Akamai   International B.V.");
        assert_eq!(asn, "AS20940");
        assert_eq!(name, "Akamai International B.V.");
    }

    #[test]
    fn test_geo_info_from_sparse_response() {
        let raw = IpinfoResponse {
            country: Some("IT".to_string()),
            ..IpinfoResponse::default()
        };
        let info = GeoInfo::from(raw);
        assert_eq!(info.country, "IT");
        assert_eq!(info.asn, "");
        assert_eq!(info.org, "");
        assert_eq!(info.anycast, "");
    }

    #[test]
    fn test_geo_info_anycast_rendering() {
        let raw = IpinfoResponse {
            anycast: Some(true),
            ..IpinfoResponse::default()
        };
        assert_eq!(GeoInfo::from(raw).anycast, "true");

        let raw = IpinfoResponse {
            anycast: Some(false),
            ..IpinfoResponse::default()
        };
        assert_eq!(GeoInfo::from(raw).anycast, "false");
    }

    #[test]
    fn test_geo_info_is_empty() {
        assert!(GeoInfo::empty().is_empty());
        let info = GeoInfo {
            country: "BR".to_string(),
            ..GeoInfo::default()
        };
        assert!(!info.is_empty());
    }
}
