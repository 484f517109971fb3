use std::sync::Mutex;

use netvigil::alert::{AlertPayload, Notifier};
use netvigil::models::finding::ServiceObservation;
use netvigil::models::summary::RiskSummary;
use netvigil::{Database, PipelineConfig, RiskTier, ScanOptions, ScanPipeline};

/// Records every payload it is handed and answers with a configured result.
struct RecordingNotifier {
    succeed: bool,
    payloads: Mutex<Vec<AlertPayload>>,
}

impl RecordingNotifier {
    fn new(succeed: bool) -> Self {
        Self {
            succeed,
            payloads: Mutex::new(Vec::new()),
        }
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, payload: &AlertPayload) -> bool {
        self.payloads.lock().unwrap().push(payload.clone());
        self.succeed
    }
}

fn obs(host: &str, port: u16, service: &str, version: &str) -> ServiceObservation {
    ServiceObservation {
        host: host.to_string(),
        port,
        service: service.to_string(),
        version: if version.is_empty() {
            None
        } else {
            Some(version.to_string())
        },
        protocol: Some("tcp".to_string()),
        state: Some("open".to_string()),
        ..Default::default()
    }
}

#[test]
fn pipeline_classifies_persists_and_alerts() {
    let db = Database::in_memory().unwrap();
    let pipeline = ScanPipeline::new(db.clone(), PipelineConfig::default());
    let notifier = RecordingNotifier::new(true);

    let outcome = pipeline
        .process(
            vec![
                obs("192.168.1.10", 23, "telnet", ""),
                obs("192.168.1.10", 80, "http", "Apache 2.4"),
                obs("192.168.1.11", 22, "ssh", "OpenSSH 9.1"),
            ],
            "192.168.1.0/24",
            ScanOptions {
                scan_id: Some("audit-1".to_string()),
                scan_duration: Some(12.5),
                notes: Some("monthly audit".to_string()),
            },
            Some(&notifier),
        )
        .unwrap();

    assert_eq!(outcome.scan_id, "audit-1");
    assert_eq!(outcome.summary.total, 3);
    assert_eq!(outcome.summary.high, 1);
    assert_eq!(outcome.summary.medium, 1);
    assert_eq!(outcome.summary.low, 1);
    assert_eq!(outcome.summary.risk_score, 16);
    assert_eq!(outcome.summary.high_percent, 33.3);
    assert_eq!(outcome.summary.hosts, 2);
    assert_eq!(outcome.alert_sent, Some(true));

    // The notifier got the summary plus only the HIGH findings.
    let payloads = notifier.payloads.lock().unwrap();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].target, "192.168.1.0/24");
    assert_eq!(payloads[0].findings.len(), 1);
    assert_eq!(payloads[0].findings[0].service, "telnet");

    // Persisted findings come back tier-ordered and fully classified.
    let stored = db.get_scan_by_id("audit-1").unwrap();
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].risk, RiskTier::High);
    assert_eq!(stored[2].risk, RiskTier::Low);
    assert!(stored.iter().all(|f| !f.recommendation.is_empty()));
    assert_eq!(stored[0].protocol.as_deref(), Some("tcp"));
    assert_eq!(stored[0].state.as_deref(), Some("open"));

    // Round-trip law for the stored summary.
    let summaries = db.get_summaries(10).unwrap();
    assert_eq!(summaries[0].risk_score, RiskSummary::from_findings(&stored).risk_score);
    assert_eq!(summaries[0].scan_duration, Some(12.5));
    assert_eq!(summaries[0].notes.as_deref(), Some("monthly audit"));
}

#[test]
fn pipeline_no_alert_below_threshold() {
    let db = Database::in_memory().unwrap();
    let pipeline = ScanPipeline::new(db.clone(), PipelineConfig::default());
    let notifier = RecordingNotifier::new(true);

    let outcome = pipeline
        .process(
            vec![obs("10.0.0.1", 22, "ssh", "")],
            "10.0.0.1",
            ScanOptions::default(),
            Some(&notifier),
        )
        .unwrap();

    assert_eq!(outcome.alert_sent, None);
    assert!(notifier.payloads.lock().unwrap().is_empty());
    // The scan is persisted regardless of the alert decision.
    assert_eq!(db.get_summaries(10).unwrap().len(), 1);
}

#[test]
fn pipeline_notification_failure_keeps_persistence() {
    let db = Database::in_memory().unwrap();
    let pipeline = ScanPipeline::new(db.clone(), PipelineConfig::default());
    let notifier = RecordingNotifier::new(false);

    let outcome = pipeline
        .process(
            vec![obs("10.0.0.1", 3389, "rdp", "")],
            "10.0.0.1",
            ScanOptions {
                scan_id: Some("scan-f".to_string()),
                ..Default::default()
            },
            Some(&notifier),
        )
        .unwrap();

    assert_eq!(outcome.alert_sent, Some(false));
    assert_eq!(db.get_scan_by_id("scan-f").unwrap().len(), 1);
    assert_eq!(db.get_high_risk(10).unwrap().len(), 1);
}

#[test]
fn pipeline_empty_scan_is_recorded() {
    let db = Database::in_memory().unwrap();
    let pipeline = ScanPipeline::new(db.clone(), PipelineConfig::default());

    let outcome = pipeline
        .process(Vec::new(), "10.0.0.0/24", ScanOptions::default(), None)
        .unwrap();

    assert_eq!(outcome.summary.total, 0);
    assert_eq!(outcome.summary.high_percent, 0.0);
    assert_eq!(outcome.alert_sent, None);

    let summaries = db.get_summaries(10).unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].total_findings, 0);
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vigil.db");
    let path = path.to_str().unwrap();

    {
        let db = Database::new(path).unwrap();
        let pipeline = ScanPipeline::new(db, PipelineConfig::default());
        pipeline
            .process(
                vec![obs("10.0.0.1", 21, "ftp", "vsftpd 2.3.4")],
                "10.0.0.1",
                ScanOptions {
                    scan_id: Some("scan-disk".to_string()),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
    }

    let reopened = Database::new(path).unwrap();
    let stored = reopened.get_scan_by_id("scan-disk").unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].risk, RiskTier::High);
    assert_eq!(stored[0].version.as_deref(), Some("vsftpd 2.3.4"));
    assert_eq!(reopened.get_host_history("10.0.0.1").unwrap().len(), 1);
}
