use crate::commands::{header_row, tier_cell, CommandResult, Session};
use crate::demo;
use colored::*;
use prettytable::{Cell, Row, Table};
use scan_analytics::exporter::import_csv;
use scan_analytics::{tier, HistoryFilter, ScanRecord};
use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn list_history(session: &Session, search: Option<String>, network: Option<String>) -> CommandResult<()> {
    let filter = HistoryFilter { query: search, network };
    let scans = filter.apply(&session.store.all());

    if scans.is_empty() {
        println!("No scans match.");
        return Ok(());
    }

    let mut table = Table::new();
    table.add_row(header_row(&[
        "Date", "Time", "Contract", "Network", "Status", "Vulnerabilities", "Risk", "Duration",
    ]));
    for scan in &scans {
        let status = if scan.succeeded {
            Cell::new("Success").style_spec("Fg")
        } else {
            Cell::new("Failed").style_spec("Fr")
        };
        table.add_row(Row::new(vec![
            Cell::new(&scan.date_label),
            Cell::new(&scan.time_label),
            Cell::new(&scan.target),
            Cell::new(&scan.network),
            status,
            Cell::new(&scan.vulnerability_count.to_string()),
            tier_cell(tier(scan.vulnerability_count)),
            Cell::new(&scan.duration_label),
        ]));
    }

    table.printstd();
    println!("{} of {} scans", scans.len(), session.store.len());
    Ok(())
}

/// Stack records on top of the history keeping their newest-first order.
fn append_batch(session: &Session, records: Vec<ScanRecord>) -> CommandResult<usize> {
    let count = records.len();
    for record in records.into_iter().rev() {
        session.store.append(record)?;
    }
    session.save()?;
    Ok(count)
}

pub fn import(session: &Session, file: &Path) -> CommandResult<()> {
    let content = std::fs::read_to_string(file)?;
    let records = import_csv(&content)?;
    let count = append_batch(session, records)?;
    println!("{}", format!("Imported {} scans", count).green());
    Ok(())
}

pub fn seed(session: &Session) -> CommandResult<()> {
    let count = append_batch(session, demo::sample_history())?;
    println!("{}", format!("Added {} sample scans", count).green());
    Ok(())
}

fn confirm(prompt: &str) -> CommandResult<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn clear(session: &Session, yes: bool) -> CommandResult<()> {
    if !yes && !confirm("Are you sure you want to clear all scan history?")? {
        println!("Nothing cleared.");
        return Ok(());
    }

    session.store.clear();
    session.save()?;
    println!("{}", "Scan history cleared.".green());
    Ok(())
}
