use crate::commands::{header_row, tier_cell, CommandError, CommandResult};
use colored::*;
use prettytable::{Cell, Row, Table};
use scan_analytics::catalog;

pub fn list_entries() {
    let mut table = Table::new();
    table.add_row(header_row(&["Vulnerability", "Severity"]));
    for entry in catalog::entries() {
        table.add_row(Row::new(vec![Cell::new(entry.key), tier_cell(entry.severity)]));
    }
    table.printstd();
}

pub fn show_entry(name: &str) -> CommandResult<()> {
    let entry = catalog::lookup(name)
        .ok_or_else(|| CommandError::ValidationError(format!("Unknown vulnerability: {}", name)))?;

    println!("{} ({})", entry.name.bold(), entry.severity);
    println!("\n{}\n{}", "Description".underline(), entry.description);
    println!("\n{}\n{}", "Impact".underline(), entry.impact);
    println!("\n{}\n{}", "Remediation".underline(), entry.remediation);
    println!("\n{}\n{}", "Example".underline(), entry.example.dimmed());
    Ok(())
}
