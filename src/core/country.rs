//! Country expansion status model.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// How far along the network is in a country. Ordered by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountryStatus {
    None,
    Proposed,
    Ambassador,
    Signed,
    Development,
    Operating,
}

impl Display for CountryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CountryStatus::None => "Available",
            CountryStatus::Proposed => "Land Proposed",
            CountryStatus::Ambassador => "Ambassador",
            CountryStatus::Signed => "Land Signed",
            CountryStatus::Development => "In Development",
            CountryStatus::Operating => "Operating",
        };
        write!(f, "{label}")
    }
}

impl CountryStatus {
    /// A country has ambassador coverage from the ambassador stage onward.
    pub fn has_ambassador(&self) -> bool {
        *self >= CountryStatus::Ambassador
    }
}

/// A `current`/`target` pair backing one expansion meter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub current: u32,
    pub target: u32,
}

/// A country in the expansion pipeline, keyed by alpha-3 code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: String,
    pub name: String,
    pub status: CountryStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub locations: Milestone,
    #[serde(default)]
    pub architects: Milestone,
    #[serde(default)]
    pub ambassador_applications: Milestone,
    #[serde(default)]
    pub content_creators: Milestone,
    #[serde(default)]
    pub b2b_clients: Milestone,
}

/// Aggregate counts over the expansion pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionStats {
    /// Countries in development or already operating.
    pub active: usize,
    /// Countries anywhere in the pipeline.
    pub total_proposed: usize,
}

/// Counts active and pipeline countries the way the dashboard header does.
pub fn expansion_stats(countries: &[Country]) -> ExpansionStats {
    let active = countries
        .iter()
        .filter(|c| matches!(c.status, CountryStatus::Development | CountryStatus::Operating))
        .count();
    let total_proposed = countries
        .iter()
        .filter(|c| c.status != CountryStatus::None)
        .count();
    ExpansionStats {
        active,
        total_proposed,
    }
}

/// Read access to the expansion pipeline.
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<Country>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country(id: &str, status: CountryStatus) -> Country {
        Country {
            id: id.to_string(),
            name: id.to_string(),
            status,
            description: None,
            locations: Milestone::default(),
            architects: Milestone::default(),
            ambassador_applications: Milestone::default(),
            content_creators: Milestone::default(),
            b2b_clients: Milestone::default(),
        }
    }

    #[test]
    fn test_status_deserializes_lowercase() {
        let status: CountryStatus = serde_json::from_str("\"development\"").unwrap();
        assert_eq!(status, CountryStatus::Development);
        let status: CountryStatus = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(status, CountryStatus::None);
    }

    #[test]
    fn test_ambassador_coverage_by_stage() {
        assert!(!CountryStatus::None.has_ambassador());
        assert!(!CountryStatus::Proposed.has_ambassador());
        assert!(CountryStatus::Ambassador.has_ambassador());
        assert!(CountryStatus::Signed.has_ambassador());
        assert!(CountryStatus::Development.has_ambassador());
        assert!(CountryStatus::Operating.has_ambassador());
    }

    #[test]
    fn test_expansion_stats() {
        let countries = vec![
            country("BGR", CountryStatus::Development),
            country("AUT", CountryStatus::Signed),
            country("ROU", CountryStatus::Ambassador),
            country("LTU", CountryStatus::Proposed),
            country("USA", CountryStatus::None),
            country("GRC", CountryStatus::Operating),
        ];
        let stats = expansion_stats(&countries);
        assert_eq!(stats.active, 2);
        assert_eq!(stats.total_proposed, 5);
    }

    #[test]
    fn test_expansion_stats_empty() {
        let stats = expansion_stats(&[]);
        assert_eq!(stats.active, 0);
        assert_eq!(stats.total_proposed, 0);
    }
}
