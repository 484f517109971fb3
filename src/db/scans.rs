use chrono::Utc;
use tracing::info;

use crate::errors::VigilError;
use crate::models::finding::Finding;
use crate::models::summary::{RiskSummary, ScanSummary, TrendPoint};
use super::{format_scan_date, parse_scan_date, Database};

impl Database {
    /// Persists one scan: all findings plus the summary row, in a single
    /// transaction. Generates a timestamp-derived scan id when none is
    /// supplied, and stamps the effective id and a shared scan date onto
    /// every finding. A duplicate scan id is a hard error and leaves no
    /// trace of the attempted scan.
    pub fn save_scan(
        &self,
        findings: &mut [Finding],
        target: &str,
        scan_id: Option<&str>,
        scan_duration: Option<f64>,
        notes: Option<&str>,
    ) -> Result<String, VigilError> {
        let now = Utc::now();
        let scan_id = match scan_id {
            Some(id) => id.to_string(),
            None => now.format("%Y%m%d_%H%M%S").to_string(),
        };
        let scan_date = format_scan_date(now);
        let summary = RiskSummary::from_findings(findings);

        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| VigilError::Database(format!("Failed to begin transaction: {}", e)))?;

        let exists: bool = tx
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM scans WHERE scan_id = ?1)",
                rusqlite::params![scan_id],
                |row| row.get(0),
            )
            .map_err(|e| VigilError::Database(format!("Uniqueness check failed: {}", e)))?;
        if exists {
            // Dropping the transaction rolls it back.
            return Err(VigilError::DuplicateScan(scan_id));
        }

        tx.execute(
            "INSERT INTO scans (scan_id, target, total_findings, high_risk, medium_risk, low_risk, risk_score, scan_date, scan_duration, notes) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                scan_id,
                target,
                summary.total,
                summary.high,
                summary.medium,
                summary.low,
                summary.risk_score,
                scan_date,
                scan_duration,
                notes,
            ],
        )
        .map_err(|e| VigilError::Database(format!("Failed to insert scan summary: {}", e)))?;

        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO findings (id, scan_id, host, hostname, port, protocol, service, product, version, extra_info, state, risk, cvss_estimate, recommendation, scan_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
                )
                .map_err(|e| VigilError::Database(format!("Failed to prepare insert: {}", e)))?;
            for finding in findings.iter() {
                stmt.execute(rusqlite::params![
                    uuid::Uuid::new_v4().to_string(),
                    scan_id,
                    finding.host,
                    finding.hostname,
                    finding.port,
                    finding.protocol,
                    finding.service,
                    finding.product,
                    finding.version,
                    finding.extra_info,
                    finding.state,
                    finding.risk.as_str(),
                    finding.cvss_estimate,
                    finding.recommendation,
                    scan_date,
                ])
                .map_err(|e| VigilError::Database(format!("Failed to insert finding: {}", e)))?;
            }
        }

        tx.commit()
            .map_err(|e| VigilError::Database(format!("Failed to commit scan: {}", e)))?;

        // Only stamp the in-memory findings once the write is durable.
        // Re-parse the persisted string so the stamp carries the same
        // second precision a later read would see.
        let stamped_date = parse_scan_date(&scan_date);
        for finding in findings.iter_mut() {
            finding.scan_id = Some(scan_id.clone());
            finding.scan_date = stamped_date;
        }

        info!(
            scan_id = %scan_id,
            total = summary.total,
            high = summary.high,
            medium = summary.medium,
            low = summary.low,
            "scan saved"
        );
        Ok(scan_id)
    }

    /// Most recent scan summaries, newest first.
    pub fn get_summaries(&self, limit: usize) -> Result<Vec<ScanSummary>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT scan_id, target, total_findings, high_risk, medium_risk, low_risk, risk_score, scan_date, scan_duration, notes FROM scans ORDER BY scan_date DESC LIMIT ?1",
            )
            .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![limit as i64], |row| {
                let scan_date: String = row.get(7)?;
                Ok(ScanSummary {
                    scan_id: row.get(0)?,
                    target: row.get(1)?,
                    total_findings: row.get(2)?,
                    high_risk: row.get(3)?,
                    medium_risk: row.get(4)?,
                    low_risk: row.get(5)?,
                    risk_score: row.get(6)?,
                    scan_date: parse_scan_date(&scan_date),
                    scan_duration: row.get(8)?,
                    notes: row.get(9)?,
                })
            })
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        let mut summaries = Vec::new();
        for row in rows {
            summaries.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
        }
        Ok(summaries)
    }

    /// Day-by-day scan history over the lookback window, newest day first.
    /// Always recomputed from the summary rows; an empty store yields an
    /// empty vec.
    pub fn get_trends(&self, days: u32) -> Result<Vec<TrendPoint>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT DATE(scan_date) AS date, COUNT(*), SUM(high_risk), SUM(medium_risk), SUM(low_risk), AVG(risk_score) FROM scans WHERE scan_date >= date('now', '-' || ?1 || ' days') GROUP BY DATE(scan_date) ORDER BY date DESC",
            )
            .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt
            .query_map(rusqlite::params![days], |row| {
                let date: String = row.get(0)?;
                Ok((
                    date,
                    row.get::<_, u64>(1)?,
                    row.get::<_, u64>(2)?,
                    row.get::<_, u64>(3)?,
                    row.get::<_, u64>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        let mut trends = Vec::new();
        for row in rows {
            let (date, scan_count, total_high, total_medium, total_low, avg_risk_score) =
                row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?;
            let date = chrono::NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                .map_err(|e| VigilError::Database(format!("Bad trend date {}: {}", date, e)))?;
            trends.push(TrendPoint {
                date,
                scan_count,
                total_high,
                total_medium,
                total_low,
                avg_risk_score,
            });
        }
        Ok(trends)
    }

    /// Removes every scan older than `days`, findings and summary together,
    /// in one transaction. Returns the number of scans removed; matching
    /// nothing is not an error.
    pub fn prune_older_than(&self, days: u32) -> Result<usize, VigilError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn
            .transaction()
            .map_err(|e| VigilError::Database(format!("Failed to begin transaction: {}", e)))?;

        let cutoff = "date('now', '-' || ?1 || ' days')";
        let count: usize = tx
            .query_row(
                &format!("SELECT COUNT(*) FROM scans WHERE scan_date < {}", cutoff),
                rusqlite::params![days],
                |row| row.get(0),
            )
            .map_err(|e| VigilError::Database(format!("Prune count failed: {}", e)))?;
        if count == 0 {
            return Ok(0);
        }

        tx.execute(
            &format!(
                "DELETE FROM findings WHERE scan_id IN (SELECT scan_id FROM scans WHERE scan_date < {})",
                cutoff
            ),
            rusqlite::params![days],
        )
        .map_err(|e| VigilError::Database(format!("Prune findings failed: {}", e)))?;
        tx.execute(
            &format!("DELETE FROM scans WHERE scan_date < {}", cutoff),
            rusqlite::params![days],
        )
        .map_err(|e| VigilError::Database(format!("Prune scans failed: {}", e)))?;

        tx.commit()
            .map_err(|e| VigilError::Database(format!("Failed to commit prune: {}", e)))?;

        info!(removed = count, days, "pruned old scans");
        Ok(count)
    }
}
