use tracing::{info, warn};

use crate::alert::{format_alert_text, select_priority, should_alert, AlertPayload, Notifier};
use crate::config::PipelineConfig;
use crate::db::Database;
use crate::errors::VigilError;
use crate::models::finding::ServiceObservation;
use crate::models::summary::RiskSummary;
use crate::risk::{apply_risk, summarize};

/// Per-invocation knobs for one scan's processing.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Caller-supplied scan id; generated from the timestamp when absent.
    pub scan_id: Option<String>,
    /// Wall-clock scan duration in seconds, if the caller measured one.
    pub scan_duration: Option<f64>,
    pub notes: Option<String>,
}

/// What one pipeline run produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub scan_id: String,
    pub summary: RiskSummary,
    /// `None` when no alert was warranted or no notifier was attached;
    /// otherwise the notifier's success signal.
    pub alert_sent: Option<bool>,
}

/// Runs one scan's worth of raw observations through the full pipeline:
/// classify, aggregate, persist, decide, notify. Synchronous; persistence
/// failures propagate, notification failures do not.
pub struct ScanPipeline {
    db: Database,
    config: PipelineConfig,
}

impl ScanPipeline {
    pub fn new(db: Database, config: PipelineConfig) -> Self {
        Self { db, config }
    }

    pub fn process(
        &self,
        observations: Vec<ServiceObservation>,
        target: &str,
        options: ScanOptions,
        notifier: Option<&dyn Notifier>,
    ) -> Result<ScanOutcome, VigilError> {
        let mut findings = apply_risk(observations);
        let summary = summarize(&mut findings);

        // Persistence always happens before any notification attempt.
        let scan_id = self.db.save_scan(
            &mut findings,
            target,
            options.scan_id.as_deref(),
            options.scan_duration,
            options.notes.as_deref(),
        )?;

        let alert_sent = if should_alert(&summary, self.config.alert_threshold) {
            match notifier {
                Some(notifier) => {
                    let payload = AlertPayload {
                        target: target.to_string(),
                        summary: summary.clone(),
                        findings: select_priority(&findings, self.config.priority_limit),
                    };
                    let sent = notifier.send(&payload);
                    if sent {
                        info!(scan_id = %scan_id, high = summary.high, "alert delivered");
                    } else {
                        // Best effort only; the scan is already recorded.
                        warn!(scan_id = %scan_id, "alert delivery failed");
                    }
                    Some(sent)
                }
                None => None,
            }
        } else {
            None
        };

        Ok(ScanOutcome {
            scan_id,
            summary,
            alert_sent,
        })
    }
}

/// A notifier that renders the alert into the log stream instead of
/// delivering it anywhere. Useful as a stand-in when no transport is wired
/// up.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, payload: &AlertPayload) -> bool {
        info!("\n{}", format_alert_text(payload));
        true
    }
}
