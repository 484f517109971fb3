use crate::models::finding::{Finding, RiskTier};
use crate::models::summary::RiskSummary;

/// Whether a scan warrants a notification: at least `threshold` HIGH
/// findings.
pub fn should_alert(summary: &RiskSummary, threshold: u64) -> bool {
    summary.high >= threshold
}

/// The findings that accompany an alert: the first `limit` HIGH findings
/// from the tier-ordered sequence, so discovery order among HIGH findings
/// is preserved.
pub fn select_priority(findings: &[Finding], limit: usize) -> Vec<Finding> {
    findings
        .iter()
        .filter(|f| f.risk == RiskTier::High)
        .take(limit)
        .cloned()
        .collect()
}
