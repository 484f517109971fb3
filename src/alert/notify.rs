use serde::{Deserialize, Serialize};

use crate::models::finding::Finding;
use crate::models::summary::RiskSummary;

/// What the external notifier receives: the scan's aggregate statistics
/// plus the selected priority findings, most urgent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertPayload {
    pub target: String,
    pub summary: RiskSummary,
    pub findings: Vec<Finding>,
}

/// External delivery collaborator. One best-effort call per scan; the
/// pipeline performs no retries or queuing, and a `false` return never
/// undoes persistence.
pub trait Notifier {
    fn send(&self, payload: &AlertPayload) -> bool;
}

/// Plain-text rendering of an alert, suitable as a message body. Shows the
/// summary block and up to five priority findings.
pub fn format_alert_text(payload: &AlertPayload) -> String {
    let summary = &payload.summary;
    let mut text = format!(
        "VULNERABILITY ALERT: {}\n\n{} HIGH RISK FINDINGS DETECTED\n\nScan Summary:\n- Total Findings: {}\n- High Risk: {} ({}%)\n- Medium Risk: {} ({}%)\n- Low Risk: {} ({}%)\n- Risk Score: {}\n\nHigh Risk Findings (Top 5):\n",
        payload.target,
        summary.high,
        summary.total,
        summary.high,
        summary.high_percent,
        summary.medium,
        summary.medium_percent,
        summary.low,
        summary.low_percent,
        summary.risk_score,
    );

    for (i, finding) in payload.findings.iter().take(5).enumerate() {
        let product = match (&finding.product, &finding.version) {
            (Some(p), Some(v)) => format!("{} {}", p, v),
            (Some(p), None) => p.clone(),
            _ => "Unknown".to_string(),
        };
        text.push_str(&format!(
            "\n{}. {}:{} - {}\n   Product: {}\n   Recommendation: {}\n",
            i + 1,
            finding.host,
            finding.port,
            finding.service,
            product,
            finding.recommendation,
        ));
    }

    text
}
