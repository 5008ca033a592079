use crate::commands::{header_row, tier_cell, CommandResult, Session};
use chrono::{Local, Utc};
use colored::*;
use log::info;
use prettytable::{Cell, Row, Table};
use scan_analytics::exporter::{self, percent_label, ExportArtifact};
use scan_analytics::{tier, DashboardError, SeverityTier};
use std::path::Path;

pub fn show_stats(session: &Session, json: bool) -> CommandResult<()> {
    let snapshot = session.store.snapshot(session.config.top_riskiest);

    if json {
        let rendered = serde_json::to_string_pretty(&snapshot).map_err(DashboardError::from)?;
        println!("{}", rendered);
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(header_row(&["Metric", "Value"]));
    let metrics = [
        ("Total Scans", snapshot.total_scans.to_string()),
        ("Vulnerabilities Found", snapshot.total_vulnerabilities.to_string()),
        ("Success Rate", percent_label(snapshot.success_rate)),
        ("Failed Scans", snapshot.failed_scans.to_string()),
        ("Risk Score", format!("{}/100", snapshot.risk_score)),
        ("Critical Issues", snapshot.critical_count().to_string()),
        ("Last Scan", snapshot.last_scan_date.clone()),
        ("Lines of Code", snapshot.code_totals.total_lines.to_string()),
        ("Functions Analyzed", snapshot.code_totals.total_functions.to_string()),
        ("Avg Lines per Contract", snapshot.code_totals.avg_lines_per_contract.to_string()),
    ];
    for (metric, value) in metrics.iter() {
        table.add_row(Row::new(vec![Cell::new(metric), Cell::new(value)]));
    }
    table.printstd();

    let mut severity = Table::new();
    severity.add_row(header_row(&["Severity", "Scans"]));
    for level in SeverityTier::ALL {
        severity.add_row(Row::new(vec![
            tier_cell(level),
            Cell::new(&snapshot.severity_distribution.count(level).to_string()),
        ]));
    }
    severity.printstd();
    Ok(())
}

pub fn show_trend(session: &Session) -> CommandResult<()> {
    let records = session.store.all();
    let trend = scan_analytics::aggregator::risk_score_trend(&records);
    let volume = scan_analytics::aggregator::scans_over_time(&records);

    if trend.is_empty() {
        println!("No scans recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(header_row(&["Scan", "Vulnerabilities", "Risk Score", ""]));
    for (point, scan) in trend.iter().zip(volume.iter()) {
        let bar = "█".repeat((point.score / 5) as usize);
        table.add_row(Row::new(vec![
            Cell::new(&point.label),
            Cell::new(&scan.vulnerabilities.to_string()),
            Cell::new(&point.score.to_string()),
            Cell::new(&bar),
        ]));
    }
    table.printstd();
    Ok(())
}

pub fn show_riskiest(session: &Session, limit: Option<usize>) -> CommandResult<()> {
    let limit = limit.unwrap_or(session.config.top_riskiest);
    let riskiest = scan_analytics::aggregator::top_riskiest(&session.store.all(), limit);

    let mut table = Table::new();
    table.add_row(header_row(&["#", "Contract", "Network", "Vulnerabilities", "Risk"]));
    for (rank, record) in riskiest.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&(rank + 1).to_string()),
            Cell::new(&record.short_target()),
            Cell::new(&record.network),
            Cell::new(&record.vulnerability_count.to_string()),
            tier_cell(tier(record.vulnerability_count)),
        ]));
    }
    table.printstd();
    Ok(())
}

pub fn show_networks(session: &Session) -> CommandResult<()> {
    let records = session.store.all();
    let distribution = scan_analytics::aggregator::network_distribution(&records);

    let mut table = Table::new();
    table.add_row(header_row(&["Network", "Scans", "Share"]));
    for entry in &distribution {
        let share = entry.count as f64 / records.len() as f64;
        table.add_row(Row::new(vec![
            Cell::new(&entry.network),
            Cell::new(&entry.count.to_string()),
            Cell::new(&format!("{:.0}%", share * 100.0)),
        ]));
    }
    table.printstd();
    Ok(())
}

fn write_artifact(out: &Path, artifact: &ExportArtifact) -> CommandResult<()> {
    std::fs::create_dir_all(out)?;
    let path = out.join(&artifact.filename);
    std::fs::write(&path, &artifact.content)?;

    info!("Wrote {} ({})", path.display(), artifact.mime_type);
    println!("{}", format!("Saved {}", path.display()).green());
    Ok(())
}

pub fn export_csv(session: &Session, out: &Path) -> CommandResult<()> {
    let artifact = exporter::csv_artifact(&session.store.all(), &Utc::now());
    write_artifact(out, &artifact)
}

pub fn export_html(session: &Session, out: &Path) -> CommandResult<()> {
    // records and aggregates from the same read
    let records = session.store.all();
    let snapshot = scan_analytics::AggregateSnapshot::compute(&records, session.config.top_riskiest);
    let artifact = exporter::html_artifact(&records, &snapshot, &Local::now());
    write_artifact(out, &artifact)
}
