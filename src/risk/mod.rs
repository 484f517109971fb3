pub mod aggregator;
pub mod classifier;

pub use aggregator::summarize;
pub use classifier::{apply_risk, classify, classify_observation, cvss_estimate};
