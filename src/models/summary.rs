use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::finding::{Finding, RiskTier};

/// Aggregate statistics over one scan's classified findings. This is the
/// aggregator's output and the shape handed to the alert decision; the
/// persisted per-scan row is [`ScanSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub total: u64,
    pub high: u64,
    pub medium: u64,
    pub low: u64,
    /// Count of distinct hosts across the findings.
    pub hosts: u64,
    /// Weighted sum: High=10, Medium=5, Low=1.
    pub risk_score: u64,
    pub high_percent: f64,
    pub medium_percent: f64,
    pub low_percent: f64,
}

impl RiskSummary {
    /// Computes counts, distinct hosts, the weighted risk score and the
    /// percentage split. Pure; does not reorder the findings.
    pub fn from_findings(findings: &[Finding]) -> RiskSummary {
        let total = findings.len() as u64;
        let high = findings.iter().filter(|f| f.risk == RiskTier::High).count() as u64;
        let medium = findings.iter().filter(|f| f.risk == RiskTier::Medium).count() as u64;
        let low = findings.iter().filter(|f| f.risk == RiskTier::Low).count() as u64;
        let hosts = findings
            .iter()
            .map(|f| f.host.as_str())
            .collect::<HashSet<_>>()
            .len() as u64;
        let risk_score = findings.iter().map(|f| f.risk.weight()).sum();

        // Percentages are zero when the scan found nothing at all.
        let percent = |count: u64| {
            if total == 0 {
                0.0
            } else {
                (count as f64 / total as f64 * 1000.0).round() / 10.0
            }
        };

        RiskSummary {
            total,
            high,
            medium,
            low,
            hosts,
            risk_score,
            high_percent: percent(high),
            medium_percent: percent(medium),
            low_percent: percent(low),
        }
    }
}

/// The persisted per-scan summary row. Written once, atomically with the
/// scan's findings, and immutable until retention pruning removes both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSummary {
    pub scan_id: String,
    /// Address or range that was scanned.
    pub target: String,
    pub total_findings: u64,
    pub high_risk: u64,
    pub medium_risk: u64,
    pub low_risk: u64,
    pub risk_score: u64,
    pub scan_date: Option<DateTime<Utc>>,
    /// Wall-clock scan duration in seconds, if the caller measured one.
    pub scan_duration: Option<f64>,
    pub notes: Option<String>,
}

/// One day of scan history, derived from [`ScanSummary`] rows. Never stored;
/// always recomputed from the summaries in the lookback window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub scan_count: u64,
    pub total_high: u64,
    pub total_medium: u64,
    pub total_low: u64,
    pub avg_risk_score: f64,
}
