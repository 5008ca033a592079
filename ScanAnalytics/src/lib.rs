//! Scan history engine for the contract scan dashboard.
//!
//! Records flow one way: [`ScanStore`] holds them newest-first, the
//! [`classifier`] tiers each record, the [`aggregator`] derives cross-record
//! statistics and the [`exporter`] renders CSV and HTML reports from both.

pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod exporter;
pub mod record;
pub mod scanner;
pub mod store;
pub mod submission;


pub use aggregator::{AggregateSnapshot, HistoryFilter, NetworkCount, SeverityDistribution, TrendPoint};
pub use catalog::VulnerabilityCatalogEntry;
pub use classifier::{tier, SeverityTier};
pub use config::DashboardConfig;
pub use error::{DashboardError, DashboardResult};
pub use exporter::ExportArtifact;
pub use record::ScanRecord;
pub use scanner::{ContractScanner, HttpScanner, ScanOutcome, ScanRequest, ScannerError, SimulatedScanner};
pub use store::ScanStore;
pub use submission::ScanSubmitter;
