pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS scans (
    scan_id TEXT PRIMARY KEY,
    target TEXT NOT NULL,
    total_findings INTEGER NOT NULL DEFAULT 0,
    high_risk INTEGER NOT NULL DEFAULT 0,
    medium_risk INTEGER NOT NULL DEFAULT 0,
    low_risk INTEGER NOT NULL DEFAULT 0,
    risk_score INTEGER NOT NULL DEFAULT 0,
    scan_date TEXT NOT NULL,
    scan_duration REAL,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS findings (
    id TEXT PRIMARY KEY,
    scan_id TEXT NOT NULL REFERENCES scans(scan_id) ON DELETE CASCADE,
    host TEXT NOT NULL,
    hostname TEXT,
    port INTEGER NOT NULL,
    protocol TEXT,
    service TEXT NOT NULL,
    product TEXT,
    version TEXT,
    extra_info TEXT,
    state TEXT,
    risk TEXT NOT NULL,
    cvss_estimate REAL NOT NULL,
    recommendation TEXT NOT NULL,
    scan_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_findings_scan ON findings(scan_id);
CREATE INDEX IF NOT EXISTS idx_findings_risk ON findings(risk);
CREATE INDEX IF NOT EXISTS idx_findings_host ON findings(host);
";
