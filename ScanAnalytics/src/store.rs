use crate::aggregator::AggregateSnapshot;
use crate::error::{helpers, DashboardResult};
use crate::record::ScanRecord;
use log::info;
use parking_lot::RwLock;
use std::sync::Arc;

/// Newest-first scan history shared between the submitter and readers.
///
/// Cloning the store clones the handle, not the records. Writers take the
/// lock exclusively so readers never see a half-applied append or clear.
#[derive(Debug, Clone, Default)]
pub struct ScanStore {
    records: Arc<RwLock<Vec<ScanRecord>>>,
}

impl ScanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted history that is already newest-first.
    pub fn from_history(records: Vec<ScanRecord>) -> DashboardResult<Self> {
        for record in &records {
            helpers::check_vulnerability_count(record.vulnerability_count)?;
        }
        Ok(Self {
            records: Arc::new(RwLock::new(records)),
        })
    }

    pub fn append(&self, record: ScanRecord) -> DashboardResult<()> {
        helpers::check_vulnerability_count(record.vulnerability_count)?;

        info!(
            "Recorded scan of {} on {} ({} vulnerabilities)",
            record.target, record.network, record.vulnerability_count
        );
        self.records.write().insert(0, record);
        Ok(())
    }

    pub fn clear(&self) {
        let mut records = self.records.write();
        let removed = records.len();
        records.clear();
        info!("Cleared {} scan records", removed);
    }

    /// Snapshot of the history, newest first.
    pub fn all(&self) -> Vec<ScanRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Compute every aggregate from a single consistent view of the records.
    pub fn snapshot(&self, top_n: usize) -> AggregateSnapshot {
        let records = self.records.read();
        AggregateSnapshot::compute(&records, top_n)
    }
}
