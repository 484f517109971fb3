use crate::models::finding::Finding;
use crate::models::summary::RiskSummary;

/// Summarizes one scan's classified findings.
///
/// Reorders the slice in place so that all High findings come before all
/// Medium, which come before all Low. The sort is stable, so input order is
/// preserved within a tier; downstream "top N" selection relies on this
/// ordering.
pub fn summarize(findings: &mut [Finding]) -> RiskSummary {
    findings.sort_by_key(|f| f.risk.rank());
    RiskSummary::from_findings(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::finding::{RiskTier, ServiceObservation};
    use crate::risk::classifier::classify_observation;

    fn finding(host: &str, port: u16, service: &str) -> Finding {
        classify_observation(ServiceObservation {
            host: host.to_string(),
            port,
            service: service.to_string(),
            ..Default::default()
        })
    }

    #[test]
    fn test_counts_add_up() {
        let mut findings = vec![
            finding("10.0.0.1", 23, "telnet"),
            finding("10.0.0.1", 80, "http"),
            finding("10.0.0.2", 22, "ssh"),
            finding("10.0.0.2", 3306, "mysql"),
        ];
        let summary = summarize(&mut findings);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.total, summary.high + summary.medium + summary.low);
        assert_eq!(summary.high, 2);
        assert_eq!(summary.medium, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.hosts, 2);
        assert_eq!(summary.risk_score, 10 + 10 + 5 + 1);
    }

    #[test]
    fn test_percentages_one_decimal() {
        let mut findings = vec![
            finding("10.0.0.1", 23, "telnet"),
            finding("10.0.0.1", 80, "http"),
            finding("10.0.0.1", 22, "ssh"),
        ];
        let summary = summarize(&mut findings);
        assert_eq!(summary.high_percent, 33.3);
        assert_eq!(summary.medium_percent, 33.3);
        assert_eq!(summary.low_percent, 33.3);
        assert_eq!(summary.risk_score, 16);
    }

    #[test]
    fn test_empty_scan_no_division_by_zero() {
        let mut findings: Vec<Finding> = Vec::new();
        let summary = summarize(&mut findings);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.high_percent, 0.0);
        assert_eq!(summary.medium_percent, 0.0);
        assert_eq!(summary.low_percent, 0.0);
        assert_eq!(summary.risk_score, 0);
    }

    #[test]
    fn test_tier_sort_is_stable() {
        let mut findings = vec![
            finding("a", 22, "ssh"),
            finding("b", 23, "telnet"),
            finding("c", 80, "http"),
            finding("d", 3389, "rdp"),
            finding("e", 8080, "proxy"),
        ];
        summarize(&mut findings);
        let order: Vec<(&str, RiskTier)> = findings
            .iter()
            .map(|f| (f.host.as_str(), f.risk))
            .collect();
        assert_eq!(
            order,
            vec![
                ("b", RiskTier::High),
                ("d", RiskTier::High),
                ("c", RiskTier::Medium),
                ("e", RiskTier::Medium),
                ("a", RiskTier::Low),
            ]
        );
    }
}
