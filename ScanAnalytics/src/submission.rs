use crate::config::DashboardConfig;
use crate::error::{helpers, DashboardError, DashboardResult};
use crate::record::{network_display_name, ScanRecord};
use crate::scanner::{ContractScanner, ScanOutcome, ScanRequest};
use crate::store::ScanStore;
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub const PROGRESS_COMPLETE: u8 = 100;

/// Runs a scan through the external scanner and records the result.
///
/// Progress goes out on a watch channel and is advisory only. The record is
/// built and appended after the scanner resolves, with no await in between,
/// so a submission dropped mid-flight leaves the store untouched.
pub struct ScanSubmitter {
    scanner: Arc<dyn ContractScanner>,
    progress_step: u8,
    progress_ceiling: u8,
    tick: Duration,
}

impl ScanSubmitter {
    pub fn new(scanner: Arc<dyn ContractScanner>) -> Self {
        Self::from_config(scanner, &DashboardConfig::default())
    }

    pub fn from_config(scanner: Arc<dyn ContractScanner>, config: &DashboardConfig) -> Self {
        Self {
            scanner,
            progress_step: config.progress_step,
            progress_ceiling: config.progress_ceiling,
            tick: config.progress_tick(),
        }
    }

    pub async fn submit(
        &self,
        store: &ScanStore,
        request: &ScanRequest,
        progress: &watch::Sender<u8>,
    ) -> DashboardResult<ScanRecord> {
        helpers::check_submission_target(request.target.as_deref(), request.uploaded_file.as_deref())?;

        progress.send_replace(0);
        let scan = self.scanner.scan(request);
        tokio::pin!(scan);

        let mut ticker = tokio::time::interval(self.tick);
        // the first tick completes immediately
        ticker.tick().await;

        let mut current = 0u8;
        let result = loop {
            tokio::select! {
                result = &mut scan => break result,
                _ = ticker.tick() => {
                    current = current.saturating_add(self.progress_step).min(self.progress_ceiling);
                    progress.send_replace(current);
                    debug!("Scan progress {}%", current);
                }
            }
        };

        let outcome = result.map_err(|e| {
            warn!("Scan of {} failed: {}", request.display_target(), e);
            DashboardError::ExternalScanFailure(e.to_string())
        })?;

        let record = build_record(request, outcome, &Local::now());
        store.append(record.clone())?;
        progress.send_replace(PROGRESS_COMPLETE);

        info!(
            "Scan of {} completed with {} vulnerabilities",
            record.target, record.vulnerability_count
        );
        Ok(record)
    }
}

pub fn build_record(request: &ScanRequest, outcome: ScanOutcome, at: &DateTime<Local>) -> ScanRecord {
    ScanRecord {
        target: request.display_target(),
        network: network_display_name(&request.network),
        vulnerability_count: outcome.vulnerability_count,
        duration_label: outcome.duration_label,
        succeeded: outcome.succeeded,
        lines_of_code: outcome.lines_of_code,
        functions_analyzed: outcome.functions_analyzed,
        compiler_version: outcome.compiler_version,
        ..ScanRecord::new(String::new(), String::new(), 0)
    }
    .captured_at(at)
}
