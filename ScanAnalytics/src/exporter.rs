use crate::aggregator::AggregateSnapshot;
use crate::classifier::tier;
use crate::error::{helpers, DashboardError, DashboardResult};
use crate::record::ScanRecord;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

pub const CSV_HEADER: [&str; 9] = [
    "Date",
    "Time",
    "Contract",
    "Network",
    "Status",
    "Vulnerabilities",
    "Duration",
    "Lines of Code",
    "Functions",
];

const NOT_AVAILABLE: &str = "N/A";

/// Rendered export content plus what a file-save mechanism needs to store it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

pub fn csv_artifact<Tz>(records: &[ScanRecord], exported_at: &DateTime<Tz>) -> ExportArtifact
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ExportArtifact {
        filename: format!("scan-history-{}.csv", exported_at.format("%Y-%m-%d")),
        mime_type: "text/csv;charset=utf-8;",
        content: export_csv(records),
    }
}

/// The filename date and the generated-on stamp both come from `exported_at`,
/// in its own timezone, so the artifact depends only on the arguments.
pub fn html_artifact<Tz>(
    records: &[ScanRecord],
    snapshot: &AggregateSnapshot,
    exported_at: &DateTime<Tz>,
) -> ExportArtifact
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ExportArtifact {
        filename: format!("vulnerability-report-{}.html", exported_at.format("%Y-%m-%d")),
        mime_type: "text/html",
        content: export_html(records, snapshot, exported_at),
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn optional_count(value: Option<u64>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Header plus one fully quoted row per record, in store order. Rows are
/// joined with `\n` and there is no trailing newline.
pub fn export_csv(records: &[ScanRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for record in records {
        let row = [
            record.date_label.clone(),
            record.time_label.clone(),
            record.target.clone(),
            record.network.clone(),
            status_label(record.succeeded).to_string(),
            record.vulnerability_count.to_string(),
            record.duration_label.clone(),
            optional_count(record.lines_of_code),
            optional_count(record.functions_analyzed),
        ];
        let quoted: Vec<String> = row.iter().map(|field| quote(field)).collect();
        lines.push(quoted.join(","));
    }

    lines.join("\n")
}

fn status_label(succeeded: bool) -> &'static str {
    if succeeded {
        "Success"
    } else {
        "Failed"
    }
}

/// Parse a delimited-text export back into records, newest first.
///
/// Compiler versions are not part of the export and come back empty.
pub fn import_csv(content: &str) -> DashboardResult<Vec<ScanRecord>> {
    let rows = split_rows(content).map_err(|line| DashboardError::MalformedExport {
        line,
        reason: "unterminated quoted field".to_string(),
    })?;
    let mut rows = rows.into_iter();

    match rows.next() {
        Some(header) if header.fields == CSV_HEADER => {}
        Some(header) => {
            return Err(DashboardError::MalformedExport {
                line: header.line,
                reason: "unexpected header row".to_string(),
            })
        }
        None => return Ok(Vec::new()),
    }

    rows.map(parse_row).collect()
}

/// One parsed row and the line it starts on.
struct CsvRow {
    line: usize,
    fields: Vec<String>,
}

fn parse_row(row: CsvRow) -> DashboardResult<ScanRecord> {
    let CsvRow { line: line_no, fields } = row;
    let malformed = |reason: String| DashboardError::MalformedExport {
        line: line_no,
        reason,
    };

    if fields.len() != CSV_HEADER.len() {
        return Err(malformed(format!(
            "expected {} fields, found {}",
            CSV_HEADER.len(),
            fields.len()
        )));
    }

    let succeeded = match fields[4].as_str() {
        "Success" => true,
        "Failed" => false,
        other => return Err(malformed(format!("unknown status {:?}", other))),
    };
    let vulnerability_count: i64 = fields[5]
        .parse()
        .map_err(|_| malformed(format!("invalid vulnerability count {:?}", fields[5])))?;
    helpers::check_vulnerability_count(vulnerability_count)?;

    let parse_optional = |value: &str, column: &str| -> DashboardResult<Option<u64>> {
        if value == NOT_AVAILABLE {
            return Ok(None);
        }
        value
            .parse()
            .map(Some)
            .map_err(|_| malformed(format!("invalid {} {:?}", column, value)))
    };

    Ok(ScanRecord {
        date_label: fields[0].clone(),
        time_label: fields[1].clone(),
        target: fields[2].clone(),
        network: fields[3].clone(),
        vulnerability_count,
        duration_label: fields[6].clone(),
        succeeded,
        lines_of_code: parse_optional(fields[7].as_str(), "line count")?,
        functions_analyzed: parse_optional(fields[8].as_str(), "function count")?,
        compiler_version: None,
    })
}

/// Split the whole export into rows of fields. Commas and line breaks only
/// delimit outside quotes, and blank rows are skipped. An unterminated quote
/// fails with the line it was opened on.
fn split_rows(content: &str) -> Result<Vec<CsvRow>, usize> {
    let mut rows = Vec::new();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut blank = true;
    let mut line = 1;
    let mut row_start = 1;
    let mut quote_start = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => {
                if !in_quotes {
                    quote_start = line;
                }
                in_quotes = !in_quotes;
                blank = false;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                blank = false;
            }
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {}
            '\n' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
                if blank {
                    fields.clear();
                } else {
                    rows.push(CsvRow {
                        line: row_start,
                        fields: std::mem::take(&mut fields),
                    });
                }
                line += 1;
                row_start = line;
                blank = true;
            }
            _ => {
                if c == '\n' {
                    line += 1;
                }
                if !c.is_whitespace() {
                    blank = false;
                }
                current.push(c);
            }
        }
    }

    if in_quotes {
        return Err(quote_start);
    }
    if !blank {
        fields.push(current);
        rows.push(CsvRow {
            line: row_start,
            fields,
        });
    }
    Ok(rows)
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn percent_label(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Self-contained HTML report: headline metrics and one row per record with
/// its severity tier.
pub fn export_html<Tz>(
    records: &[ScanRecord],
    snapshot: &AggregateSnapshot,
    generated_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let rows: String = records
        .iter()
        .map(|record| {
            let severity = tier(record.vulnerability_count);
            let status = if record.succeeded {
                "✓ Success"
            } else {
                "✗ Failed"
            };
            format!(
                r#"
        <tr>
          <td>{}</td>
          <td style="font-family: monospace; font-size: 12px;">{}</td>
          <td>{}</td>
          <td>{}</td>
          <td class="{}">{}</td>
          <td>{}</td>
        </tr>"#,
                html_escape(&record.date_label),
                html_escape(&record.target),
                html_escape(&record.network),
                status,
                severity.as_str().to_lowercase(),
                severity,
                record.vulnerability_count
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="UTF-8">
  <title>Smart Contract Vulnerability Report</title>
  <style>
    body {{ font-family: Arial, sans-serif; padding: 20px; }}
    h1 {{ color: #333; }}
    .metrics {{ display: grid; grid-template-columns: repeat(4, 1fr); gap: 20px; margin: 20px 0; }}
    .metric-card {{ border: 1px solid #ddd; padding: 15px; border-radius: 8px; }}
    .metric-value {{ font-size: 24px; font-weight: bold; color: #6366f1; }}
    table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
    th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
    th {{ background-color: #f3f4f6; }}
    .critical {{ color: #ef4444; font-weight: bold; }}
    .high {{ color: #f97316; font-weight: bold; }}
    .medium {{ color: #eab308; font-weight: bold; }}
    .low {{ color: #22c55e; font-weight: bold; }}
  </style>
</head>
<body>
  <h1>Smart Contract Vulnerability Scanner Report</h1>
  <p>Generated on: {generated}</p>

  <div class="metrics">
    <div class="metric-card">
      <div>Total Scans</div>
      <div class="metric-value">{total_scans}</div>
    </div>
    <div class="metric-card">
      <div>Vulnerabilities Found</div>
      <div class="metric-value">{total_vulns}</div>
    </div>
    <div class="metric-card">
      <div>Success Rate</div>
      <div class="metric-value">{success_rate}</div>
    </div>
    <div class="metric-card">
      <div>Critical Issues</div>
      <div class="metric-value">{critical}</div>
    </div>
  </div>

  <h2>Recent Scans</h2>
  <table>
    <thead>
      <tr>
        <th>Date</th>
        <th>Contract</th>
        <th>Network</th>
        <th>Status</th>
        <th>Risk Level</th>
        <th>Vulnerabilities</th>
      </tr>
    </thead>
    <tbody>{rows}
    </tbody>
  </table>
</body>
</html>
"#,
        generated = generated_at.format("%-m/%-d/%Y, %-I:%M:%S %p"),
        total_scans = snapshot.total_scans,
        total_vulns = snapshot.total_vulnerabilities,
        success_rate = percent_label(snapshot.success_rate),
        critical = snapshot.critical_count(),
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn sample_records() -> Vec<ScanRecord> {
        let mut first = ScanRecord::new("0xA33dec23927cEAcbd14Dd9Fa9754Aa275723D6F1", "Ethereum", 5);
        first.date_label = "Oct 15, 2025".to_string();
        first.time_label = "01:45:01 AM".to_string();
        first.duration_label = "1.20s".to_string();
        first.lines_of_code = Some(450);
        first.functions_analyzed = Some(12);

        let mut second = ScanRecord::new("Token \"v2\".sol", "Arbitrum", 9);
        second.date_label = "Oct 15, 2025".to_string();
        second.time_label = "01:42:58 AM".to_string();
        second.duration_label = "1.20s".to_string();
        second.succeeded = false;

        vec![first, second]
    }

    #[test]
    fn empty_history_exports_header_only() {
        assert_eq!(
            export_csv(&[]),
            "Date,Time,Contract,Network,Status,Vulnerabilities,Duration,Lines of Code,Functions"
        );
        assert!(import_csv(&export_csv(&[])).unwrap().is_empty());
    }

    #[test]
    fn csv_rows_quote_every_field() {
        let csv = export_csv(&sample_records());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#""Oct 15, 2025","01:45:01 AM","0xA33dec23927cEAcbd14Dd9Fa9754Aa275723D6F1","Ethereum","Success","5","1.20s","450","12""#
        );
        assert!(lines[2].contains(r#""Failed","9","1.20s","N/A","N/A""#));
        assert!(lines[2].contains(r#""Token ""v2"".sol""#));
    }

    #[test]
    fn csv_round_trip_recovers_records() {
        let records = sample_records();
        let parsed = import_csv(&export_csv(&records)).unwrap();

        assert_eq!(parsed.len(), records.len());
        for (original, restored) in records.iter().zip(&parsed) {
            assert_eq!(restored.target, original.target);
            assert_eq!(restored.network, original.network);
            assert_eq!(restored.succeeded, original.succeeded);
            assert_eq!(restored.vulnerability_count, original.vulnerability_count);
            assert_eq!(restored.date_label, original.date_label);
            assert_eq!(restored.duration_label, original.duration_label);
            assert_eq!(restored.lines_of_code, original.lines_of_code);
        }
    }

    #[test]
    fn line_breaks_inside_fields_survive_round_trip() -> anyhow::Result<()> {
        let mut multiline = ScanRecord::new("Vault\nv2.sol", "Ethereum", 4);
        multiline.duration_label = "1.20s\r\nretried".to_string();
        let mut records = sample_records();
        records.insert(0, multiline);

        let parsed = import_csv(&export_csv(&records))?;
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0].target, "Vault\nv2.sol");
        assert_eq!(parsed[0].duration_label, "1.20s\r\nretried");
        assert_eq!(parsed[1].target, records[1].target);
        assert_eq!(parsed[2].target, "Token \"v2\".sol");
        Ok(())
    }

    #[test]
    fn errors_report_the_line_a_row_starts_on() {
        let header = CSV_HEADER.join(",");
        let content = format!(
            "{}\r\n\"a\",\"b\",\"multi\nline\",\"d\",\"Success\",\"1\",\"e\",\"N/A\",\"N/A\"\r\n\r\n\"a\",\"b\",\"c\",\"d\",\"Maybe\",\"1\",\"e\",\"N/A\",\"N/A\"",
            header
        );
        assert!(matches!(
            import_csv(&content),
            Err(DashboardError::MalformedExport { line: 5, .. })
        ));

        let unterminated = format!("{}\n\"a\",\"b\n\"c\"", header);
        assert!(matches!(
            import_csv(&unterminated),
            Err(DashboardError::MalformedExport { line: 3, .. })
        ));
    }

    #[test]
    fn import_rejects_bad_rows() {
        let header = CSV_HEADER.join(",");
        let bad_status = format!("{}\n\"a\",\"b\",\"c\",\"d\",\"Maybe\",\"1\",\"e\",\"N/A\",\"N/A\"", header);
        assert!(matches!(
            import_csv(&bad_status),
            Err(DashboardError::MalformedExport { line: 2, .. })
        ));

        let negative = format!("{}\n\"a\",\"b\",\"c\",\"d\",\"Success\",\"-1\",\"e\",\"N/A\",\"N/A\"", header);
        assert!(matches!(import_csv(&negative), Err(DashboardError::Validation(_))));

        assert!(import_csv("not,a,header").is_err());
    }

    #[test]
    fn artifacts_use_export_date_in_filename() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 23, 10, 0).unwrap();
        let records = sample_records();
        let snapshot = AggregateSnapshot::compute(&records, 10);

        let csv = csv_artifact(&records, &at);
        assert_eq!(csv.filename, "scan-history-2026-03-07.csv");
        assert_eq!(csv.mime_type, "text/csv;charset=utf-8;");

        let html = html_artifact(&records, &snapshot, &at);
        assert_eq!(html.filename, "vulnerability-report-2026-03-07.html");
        assert_eq!(html.mime_type, "text/html");
    }

    #[test]
    fn report_artifact_follows_the_given_timezone() {
        let records = sample_records();
        let snapshot = AggregateSnapshot::compute(&records, 10);
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 23, 10, 0).unwrap().with_timezone(&tokyo);

        let html = html_artifact(&records, &snapshot, &at);
        assert_eq!(html.filename, "vulnerability-report-2026-03-08.html");
        assert!(html.content.contains("Generated on: 3/8/2026, 8:10:00 AM"));
        assert_eq!(html, html_artifact(&records, &snapshot, &at));
    }

    #[test]
    fn report_embeds_metrics_and_tiers() {
        let records = sample_records();
        let snapshot = AggregateSnapshot::compute(&records, 10);
        let at = Utc.with_ymd_and_hms(2025, 10, 15, 13, 5, 9).unwrap();

        let html = export_html(&records, &snapshot, &at);
        assert!(html.contains("Generated on: 10/15/2025, 1:05:09 PM"));
        assert!(html.contains(r#"<div class="metric-value">2</div>"#));
        assert!(html.contains(r#"<div class="metric-value">14</div>"#));
        assert!(html.contains(r#"<div class="metric-value">50.0%</div>"#));
        assert!(html.contains(r#"<td class="high">High</td>"#));
        assert!(html.contains(r#"<td class="critical">Critical</td>"#));
        assert!(html.contains("Token &quot;v2&quot;.sol"));

        assert_eq!(html, export_html(&records, &snapshot, &at));
    }

    #[test]
    fn empty_report_shows_zero_rate() {
        let snapshot = AggregateSnapshot::compute(&[], 10);
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let html = export_html(&[], &snapshot, &at);
        assert!(html.contains(r#"<div class="metric-value">0.0%</div>"#));
    }
}
