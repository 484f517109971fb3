use crate::models::finding::{Finding, RiskTier, ServiceObservation};

/// Ports that expose inherently risky services regardless of what banner
/// they present (legacy cleartext protocols, databases, remote desktops).
const HIGH_RISK_PORTS: [u16; 10] = [21, 23, 25, 445, 1433, 3306, 3389, 5432, 5900, 6379];

/// Ports worth reviewing even when the service name itself is benign.
const MEDIUM_RISK_PORTS: [u16; 5] = [80, 139, 443, 8080, 8443];

/// Matched by substring against the lower-cased service name.
const HIGH_RISK_SERVICES: [&str; 8] = [
    "telnet",
    "ftp",
    "smb",
    "rdp",
    "mysql",
    "postgresql",
    "vnc",
    "redis",
];

/// Cleartext protocols; matched by exact lower-cased name. Note the
/// asymmetry with HIGH_RISK_SERVICES (substring vs exact) is intentional
/// and load-bearing: "https" must not match "http" here.
const UNENCRYPTED_SERVICES: [&str; 4] = ["http", "ftp", "telnet", "smtp"];

/// Version substrings that suggest an outdated or unmaintained build.
const OUTDATED_MARKERS: [&str; 5] = ["1.0", "2.0", "legacy", "old", "deprecated"];

/// Classifies one observed service into a risk tier. Total: every input
/// maps to a tier, with Low as the fall-through.
///
/// Rule order is significant and first-match-wins: a high-risk port beats
/// any service-name signal, and service-name signals beat version
/// heuristics, because the later rules are strictly weaker evidence.
pub fn classify(port: u16, service: &str, version: &str) -> RiskTier {
    let service_lower = service.to_lowercase();

    if HIGH_RISK_PORTS.contains(&port) {
        return RiskTier::High;
    }

    if HIGH_RISK_SERVICES.iter().any(|s| service_lower.contains(s)) {
        return RiskTier::High;
    }

    if UNENCRYPTED_SERVICES.contains(&service_lower.as_str()) {
        return RiskTier::Medium;
    }

    if MEDIUM_RISK_PORTS.contains(&port) {
        return RiskTier::Medium;
    }

    if !version.is_empty() {
        let version_lower = version.to_lowercase();
        if OUTDATED_MARKERS.iter().any(|m| version_lower.contains(m)) {
            return RiskTier::Medium;
        }
    }

    RiskTier::Low
}

/// Estimated CVSS score for a tier. A coarse fixed mapping, not a real
/// CVE lookup.
pub fn cvss_estimate(risk: RiskTier) -> f64 {
    match risk {
        RiskTier::High => 7.5,
        RiskTier::Medium => 5.0,
        RiskTier::Low => 2.0,
    }
}

/// Remediation guidance: bespoke text for well-known services, otherwise a
/// per-tier default template interpolating service and port.
pub fn recommendation(risk: RiskTier, service: &str, port: u16) -> String {
    match risk {
        RiskTier::High => match service {
            "telnet" => "URGENT: Disable Telnet and use SSH instead".to_string(),
            "ftp" => "URGENT: Disable FTP or use SFTP/FTPS with encryption".to_string(),
            "smb" => "URGENT: Restrict SMB access, apply patches, use SMBv3".to_string(),
            "rdp" => "URGENT: Restrict RDP access, use VPN, enable NLA".to_string(),
            "mysql" | "postgresql" => {
                "URGENT: Restrict database access to localhost or VPN only".to_string()
            }
            _ => format!("URGENT: Disable or restrict {} on port {}", service, port),
        },
        RiskTier::Medium => match service {
            "http" => format!("Review and consider enabling HTTPS for {}", service),
            _ => format!("Review and harden {} configuration", service),
        },
        RiskTier::Low => format!("Monitor {} for updates and security advisories", service),
    }
}

/// Classifies one raw observation into a [`Finding`]. This is the only
/// constructor for findings, so risk, CVSS estimate and recommendation are
/// always assigned together.
pub fn classify_observation(obs: ServiceObservation) -> Finding {
    let risk = classify(obs.port, &obs.service, obs.version.as_deref().unwrap_or(""));
    let recommendation = recommendation(risk, &obs.service, obs.port);
    Finding {
        host: obs.host,
        hostname: obs.hostname,
        port: obs.port,
        protocol: obs.protocol,
        service: obs.service,
        product: obs.product,
        version: obs.version,
        extra_info: obs.extra_info,
        state: obs.state,
        risk,
        cvss_estimate: cvss_estimate(risk),
        recommendation,
        scan_id: None,
        scan_date: None,
    }
}

/// Classifies a whole scan's observations.
pub fn apply_risk(observations: Vec<ServiceObservation>) -> Vec<Finding> {
    observations.into_iter().map(classify_observation).collect()
}
