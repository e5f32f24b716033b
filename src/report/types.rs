//! Report row types.

use crate::config::BlockStatus;
use crate::geo::GeoInfo;
use crate::incident::IncidentFlag;
use serde::Serialize;

/// CSV column header. Column order and presence are a compatibility
/// contract for downstream consumers of the report file.
pub const CSV_HEADER: [&str; 11] = [
    "Source",
    "Status",
    "Input",
    "IP",
    "ASN",
    "Org",
    "Country",
    "Region",
    "City",
    "Anycast",
    "CableCutRegion",
];

/// Where a report row came from.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub enum RowSource {
    /// Sampled from a configured CDN block
    Cidr,
    /// Resolved through the named resolver
    Resolved(String),
}

impl std::fmt::Display for RowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cidr => write!(f, "CIDR"),
            Self::Resolved(name) => write!(f, "Resolved({name})"),
        }
    }
}

/// One row of the mapping report.
///
/// Created once per processed address and immutable afterwards; the
/// ordered row sequence is what gets serialized.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportRow {
    /// Row provenance: block sample or resolver answer
    pub source: RowSource,
    /// ACL status for CIDR rows, `None` for resolved rows
    pub status: Option<BlockStatus>,
    /// The CIDR descriptor or the resolved hostname
    pub input: String,
    /// The address that was looked up
    pub ip: String,
    /// Geo enrichment, empty-field on lookup failure
    pub geo: GeoInfo,
    /// Incident-region classification
    pub flag: IncidentFlag,
}

impl ReportRow {
    /// The row's CSV fields, in [`CSV_HEADER`] order.
    #[must_use]
    pub fn record(&self) -> Vec<String> {
        vec![
            self.source.to_string(),
            self.status.map(|s| s.to_string()).unwrap_or_default(),
            self.input.clone(),
            self.ip.clone(),
            self.geo.asn.clone(),
            self.geo.org.clone(),
            self.geo.country.clone(),
            self.geo.region.clone(),
            self.geo.city.clone(),
            self.geo.anycast.clone(),
            self.flag.to_string(),
        ]
    }

    /// Fixed-width one-line console rendering of the row.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let status = self
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        // width specs only pad strings, not arbitrary Display impls
        format!(
            "{:<16} | {:<7} | {:<16} | {:<15} | {:<10} | {:<30} | {:<2} | {:<16} | {:<16} | CableCutRegion={}",
            self.source.to_string(),
            status,
            self.input,
            self.ip,
            self.geo.asn,
            truncate(&self.geo.org, 30),
            self.geo.country,
            truncate(&self.geo.region, 16),
            truncate(&self.geo.city, 16),
            self.flag,
        )
    }
}

/// Clip a string to at most `max` characters for column alignment.
fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> ReportRow {
        ReportRow {
            source: RowSource::Cidr,
            status: Some(BlockStatus::Active),
            input: "184.24.0.0/13".to_string(),
            ip: "184.24.0.1".to_string(),
            geo: GeoInfo {
                asn: "AS20940".to_string(),
                org: "Akamai International B.V.".to_string(),
                country: "IN".to_string(),
                region: "Maharashtra".to_string(),
                city: "Mumbai".to_string(),
                anycast: String::new(),
            },
            flag: IncidentFlag::Likely,
        }
    }

    #[test]
    fn test_row_source_display() {
        assert_eq!(RowSource::Cidr.to_string(), "CIDR");
        assert_eq!(
            RowSource::Resolved("google".to_string()).to_string(),
            "Resolved(google)"
        );
    }

    #[test]
    fn test_record_matches_header_arity() {
        assert_eq!(sample_row().record().len(), CSV_HEADER.len());
    }

    #[test]
    fn test_record_field_order() {
        let record = sample_row().record();
        assert_eq!(record[0], "CIDR");
        assert_eq!(record[1], "Active");
        assert_eq!(record[2], "184.24.0.0/13");
        assert_eq!(record[3], "184.24.0.1");
        assert_eq!(record[4], "AS20940");
        assert_eq!(record[10], "Likely");
    }

    #[test]
    fn test_resolved_row_has_empty_status() {
        let row = ReportRow {
            source: RowSource::Resolved("quad9".to_string()),
            status: None,
            input: "armmf.adobe.com".to_string(),
            ip: "23.11.224.68".to_string(),
            geo: GeoInfo::empty(),
            flag: IncidentFlag::No,
        };
        assert_eq!(row.record()[1], "");
        assert!(row.summary_line().contains("| -"));
    }

    #[test]
    fn test_summary_line_clips_long_fields() {
        let mut row = sample_row();
        row.geo.org = "An Organization Name Far Longer Than Thirty Characters".to_string();
        let line = row.summary_line();
        assert!(line.contains("An Organization Name Far Longe |"));
    }

    #[test]
    fn test_truncate_multibyte_boundary() {
        assert_eq!(truncate("São Paulo", 3), "São");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
