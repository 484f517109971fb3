pub mod alert;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod risk;

pub use config::PipelineConfig;
pub use db::Database;
pub use errors::VigilError;
pub use models::finding::{Finding, RiskTier, ServiceObservation};
pub use models::summary::{RiskSummary, ScanSummary, TrendPoint};
pub use pipeline::{LogNotifier, ScanOptions, ScanOutcome, ScanPipeline};
