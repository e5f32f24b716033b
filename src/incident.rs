//! Infrastructure incident classification.
//!
//! Flags a record whose geography intersects areas reported as impacted
//! by the September 2025 submarine cable cuts. Purely heuristic: a
//! country-code membership test, then a keyword scan over region + city.

use serde::{Deserialize, Serialize};

/// Countries widely reported as impacted during the disruptions.
const AFFECTED_COUNTRIES: &[&str] = &[
    "IN", // India
    "IT", // Italy (Milan incident)
    "BR", // Brazil (São Paulo incident)
    "EG", // Egypt (Red Sea crossings & landing points)
    "SA", // Saudi Arabia
    "AE", // UAE
    "QA", // Qatar
    "OM", // Oman
    "BH", // Bahrain
    "KW", // Kuwait
];

/// Region/city names known to be impacted, matched case-insensitively as
/// phrase substrings of "{region} {city}".
const AFFECTED_REGION_KEYWORDS: &[&str] = &[
    "Middle East",
    "West Asia",
    "Gulf",
    "São Paulo",
    "Sao Paulo",
    "Milan",
    "Lombardy",
    "Chennai",
    "Mumbai",
    "Maharashtra",
    "Tamil Nadu",
];

/// Whether a record's geography matches the incident heuristics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IncidentFlag {
    /// Geography intersects the affected areas
    Likely,
    /// No overlap found
    No,
}

impl std::fmt::Display for IncidentFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Likely => write!(f, "Likely"),
            Self::No => write!(f, "No"),
        }
    }
}

/// Classify a record by country code, region name, and city name.
///
/// The country code is trimmed and uppercased before the membership
/// test; the keyword scan is case-insensitive. All three inputs default
/// to empty upstream, so the function has no failure mode.
#[must_use]
pub fn classify(country: &str, region: &str, city: &str) -> IncidentFlag {
    let code = country.trim().to_uppercase();
    if AFFECTED_COUNTRIES.contains(&code.as_str()) {
        return IncidentFlag::Likely;
    }

    let haystack = format!("{} {}", region.trim(), city.trim()).to_lowercase();
    for keyword in AFFECTED_REGION_KEYWORDS {
        if haystack.contains(&keyword.to_lowercase()) {
            return IncidentFlag::Likely;
        }
    }

    IncidentFlag::No
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affected_country() {
        assert_eq!(classify("IN", "", ""), IncidentFlag::Likely);
        assert_eq!(classify("EG", "Cairo", "Cairo"), IncidentFlag::Likely);
    }

    #[test]
    fn test_country_code_normalization() {
        assert_eq!(classify(" in ", "", ""), IncidentFlag::Likely);
        assert_eq!(classify("br", "", ""), IncidentFlag::Likely);
    }

    #[test]
    fn test_keyword_match_in_region() {
        assert_eq!(classify("FR", "Lombardy region", ""), IncidentFlag::Likely);
        assert_eq!(classify("", "Tamil Nadu", "Chennai"), IncidentFlag::Likely);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        assert_eq!(classify("US", "", "mumbai"), IncidentFlag::Likely);
        assert_eq!(classify("US", "MIDDLE EAST", ""), IncidentFlag::Likely);
    }

    #[test]
    fn test_keyword_match_ascii_fallback_spelling() {
        assert_eq!(classify("", "Sao Paulo", ""), IncidentFlag::Likely);
        assert_eq!(classify("", "São Paulo", ""), IncidentFlag::Likely);
    }

    #[test]
    fn test_unaffected_geography() {
        assert_eq!(classify("FR", "Paris", ""), IncidentFlag::No);
        assert_eq!(classify("US", "California", "San Jose"), IncidentFlag::No);
        assert_eq!(classify("", "", ""), IncidentFlag::No);
    }

    #[test]
    fn test_flag_display() {
        assert_eq!(IncidentFlag::Likely.to_string(), "Likely");
        assert_eq!(IncidentFlag::No.to_string(), "No");
    }
}
