use crate::commands::{CommandError, CommandResult, Session};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use scan_analytics::submission::PROGRESS_COMPLETE;
use scan_analytics::{
    tier, ContractScanner, HttpScanner, ScanRequest, ScanSubmitter, SeverityTier, SimulatedScanner,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

fn create_progress_bar(message: String) -> CommandResult<ProgressBar> {
    let pb = ProgressBar::new(PROGRESS_COMPLETE as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .map_err(|e| CommandError::InternalError(e.to_string()))?
            .progress_chars("=> "),
    );
    pb.set_message(message);
    Ok(pb)
}

fn build_scanner(session: &Session) -> Arc<dyn ContractScanner> {
    match &session.config.scanner_endpoint {
        Some(endpoint) => Arc::new(HttpScanner::new(endpoint.clone(), session.config.scanner_timeout())),
        None => Arc::new(SimulatedScanner::new(session.config.simulated_delay())),
    }
}

pub async fn run_scan(session: &Session, address: Option<String>, file: Option<PathBuf>) -> CommandResult<()> {
    let uploaded_file = match file {
        Some(path) => {
            if !path.is_file() {
                return Err(CommandError::ValidationError(format!(
                    "Source file not found: {}",
                    path.display()
                )));
            }
            path.file_name().map(|name| name.to_string_lossy().into_owned())
        }
        None => None,
    };

    let request = ScanRequest {
        target: address,
        network: session.config.default_network.clone(),
        uploaded_file,
    };
    let submitter = ScanSubmitter::from_config(build_scanner(session), &session.config);

    let pb = create_progress_bar(format!("Scanning {}...", request.display_target()))?;
    let (tx, mut rx) = watch::channel(0u8);
    let bar = pb.clone();
    let ticker = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let position = *rx.borrow();
            bar.set_position(position as u64);
        }
    });

    let result = submitter.submit(&session.store, &request, &tx).await;
    drop(tx);
    let _ = ticker.await;

    let record = match result {
        Ok(record) => {
            pb.finish_with_message("Scan complete!");
            record
        }
        Err(e) => {
            pb.abandon_with_message("Scan failed");
            return Err(e.into());
        }
    };
    session.save()?;

    let severity = tier(record.vulnerability_count);
    let summary = format!(
        "{} on {}: {} vulnerabilities ({})",
        record.target, record.network, record.vulnerability_count, severity
    );
    let summary = match severity {
        SeverityTier::Critical => summary.red().bold(),
        SeverityTier::High => summary.yellow().bold(),
        SeverityTier::Medium => summary.yellow(),
        SeverityTier::Low => summary.green(),
    };
    println!("\n{}", summary);
    if !record.succeeded {
        println!("{}", "The scanner reported a failed analysis.".red());
    }
    if let (Some(lines), Some(functions)) = (record.lines_of_code, record.functions_analyzed) {
        println!("Analyzed {} lines across {} functions", lines, functions);
    }

    Ok(())
}
