use serde::{Deserialize, Serialize};

/// Tunables for one pipeline instance. Passed in explicitly at construction;
/// there is no ambient global configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Minimum number of HIGH findings in a scan before an alert is raised.
    pub alert_threshold: u64,
    /// Maximum number of HIGH findings attached to an alert payload.
    pub priority_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alert_threshold: 1,
            priority_limit: 10,
        }
    }
}
