use log::info;
use scan_analytics::{DashboardResult, ScanRecord, ScanStore};
use std::path::Path;

/// Load persisted history. A missing file is an empty history.
pub fn load(path: &Path) -> DashboardResult<ScanStore> {
    if !path.exists() {
        return Ok(ScanStore::new());
    }

    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Ok(ScanStore::new());
    }
    let records: Vec<ScanRecord> = serde_json::from_str(&raw)?;
    info!("Loaded {} scans from {}", records.len(), path.display());
    ScanStore::from_history(records)
}

/// Persist the history newest-first, the order it is reloaded in.
pub fn save(path: &Path, store: &ScanStore) -> DashboardResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&store.all())?;
    std::fs::write(path, json)?;
    Ok(())
}
