use rusqlite::Row;

use crate::errors::VigilError;
use crate::models::finding::{Finding, RecentFinding, RiskTier};
use super::{parse_scan_date, Database};

const FINDING_COLUMNS: &str =
    "scan_id, host, hostname, port, protocol, service, product, version, extra_info, state, risk, cvss_estimate, recommendation, scan_date";

/// Most-severe-first ordering over the persisted tier strings.
const RISK_RANK: &str = "CASE risk WHEN 'HIGH' THEN 0 WHEN 'MEDIUM' THEN 1 WHEN 'LOW' THEN 2 ELSE 3 END";

fn finding_from_row(row: &Row) -> rusqlite::Result<Finding> {
    let risk: String = row.get(10)?;
    let scan_date: String = row.get(13)?;
    Ok(Finding {
        scan_id: row.get(0)?,
        host: row.get(1)?,
        hostname: row.get(2)?,
        port: row.get(3)?,
        protocol: row.get(4)?,
        service: row.get(5)?,
        product: row.get(6)?,
        version: row.get(7)?,
        extra_info: row.get(8)?,
        state: row.get(9)?,
        risk: RiskTier::parse(&risk),
        cvss_estimate: row.get(11)?,
        recommendation: row.get(12)?,
        scan_date: parse_scan_date(&scan_date),
    })
}

impl Database {
    fn query_findings(
        &self,
        sql: &str,
        params: impl rusqlite::Params,
    ) -> Result<Vec<Finding>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
        let rows = stmt
            .query_map(params, finding_from_row)
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        let mut findings = Vec::new();
        for row in rows {
            findings.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
        }
        Ok(findings)
    }

    /// Findings for one scan, most severe tier first, then ascending port.
    /// An unknown scan id yields an empty vec.
    pub fn get_scan_by_id(&self, scan_id: &str) -> Result<Vec<Finding>, VigilError> {
        self.query_findings(
            &format!(
                "SELECT {} FROM findings WHERE scan_id = ?1 ORDER BY {}, port ASC",
                FINDING_COLUMNS, RISK_RANK
            ),
            rusqlite::params![scan_id],
        )
    }

    /// Abbreviated rows across all scans, newest first and most severe
    /// first within the same timestamp.
    pub fn get_recent(&self, limit: usize) -> Result<Vec<RecentFinding>, VigilError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!(
                "SELECT host, port, service, risk, scan_date FROM findings ORDER BY scan_date DESC, {} LIMIT ?1",
                RISK_RANK
            ))
            .map_err(|e| VigilError::Database(format!("Query failed: {}", e)))?;
        let rows = stmt
            .query_map(rusqlite::params![limit as i64], |row| {
                let risk: String = row.get(3)?;
                let scan_date: String = row.get(4)?;
                Ok(RecentFinding {
                    host: row.get(0)?,
                    port: row.get(1)?,
                    service: row.get(2)?,
                    risk: RiskTier::parse(&risk),
                    scan_date: parse_scan_date(&scan_date),
                })
            })
            .map_err(|e| VigilError::Database(format!("Query error: {}", e)))?;

        let mut findings = Vec::new();
        for row in rows {
            findings.push(row.map_err(|e| VigilError::Database(format!("Row error: {}", e)))?);
        }
        Ok(findings)
    }

    /// HIGH-tier findings across all scans, newest first.
    pub fn get_high_risk(&self, limit: usize) -> Result<Vec<Finding>, VigilError> {
        self.query_findings(
            &format!(
                "SELECT {} FROM findings WHERE risk = 'HIGH' ORDER BY scan_date DESC LIMIT ?1",
                FINDING_COLUMNS
            ),
            rusqlite::params![limit as i64],
        )
    }

    /// Every finding ever recorded for one host, newest first.
    pub fn get_host_history(&self, host: &str) -> Result<Vec<Finding>, VigilError> {
        self.query_findings(
            &format!(
                "SELECT {} FROM findings WHERE host = ?1 ORDER BY scan_date DESC",
                FINDING_COLUMNS
            ),
            rusqlite::params![host],
        )
    }
}
