use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Risk tier for a discovered service, ordered from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Returns a numeric rank where lower values indicate higher risk.
    /// High = 0, Medium = 1, Low = 2.
    pub fn rank(&self) -> u8 {
        match self {
            RiskTier::High => 0,
            RiskTier::Medium => 1,
            RiskTier::Low => 2,
        }
    }

    /// Risk-score weight: High = 10, Medium = 5, Low = 1.
    pub fn weight(&self) -> u64 {
        match self {
            RiskTier::High => 10,
            RiskTier::Medium => 5,
            RiskTier::Low => 1,
        }
    }

    /// The persisted string form, matching the serde wire names.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::High => "HIGH",
            RiskTier::Medium => "MEDIUM",
            RiskTier::Low => "LOW",
        }
    }

    /// Parses the persisted form. Unknown strings degrade to Low rather
    /// than failing, so a read never rejects a row.
    pub fn parse(s: &str) -> RiskTier {
        match s {
            "HIGH" => RiskTier::High,
            "MEDIUM" => RiskTier::Medium,
            _ => RiskTier::Low,
        }
    }
}

/// One raw service observation as produced by the upstream scanner, before
/// risk classification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceObservation {
    pub host: String,
    #[serde(default)]
    pub hostname: Option<String>,
    pub port: u16,
    #[serde(default)]
    pub protocol: Option<String>,
    pub service: String,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub extra_info: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// A classified service observation. Only the classifier builds these, so
/// `risk`, `cvss_estimate` and `recommendation` are always populated
/// together; `scan_id` and `scan_date` are stamped by the store at save
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub host: String,
    pub hostname: Option<String>,
    pub port: u16,
    pub protocol: Option<String>,
    pub service: String,
    pub product: Option<String>,
    pub version: Option<String>,
    pub extra_info: Option<String>,
    pub state: Option<String>,
    pub risk: RiskTier,
    pub cvss_estimate: f64,
    pub recommendation: String,
    pub scan_id: Option<String>,
    pub scan_date: Option<DateTime<Utc>>,
}

/// Abbreviated finding row returned by recency queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFinding {
    pub host: String,
    pub port: u16,
    pub service: String,
    pub risk: RiskTier,
    pub scan_date: Option<DateTime<Utc>>,
}
