//! Cross-record statistics.
//!
//! Every function here is a pure function of a newest-first slice of records,
//! so the dashboard can recompute from the store on each query without any
//! cached state to invalidate.

use crate::classifier::{tier, SeverityTier};
use crate::record::ScanRecord;
use serde::Serialize;

/// Vulnerabilities per scan that saturate the risk score.
const RISK_SATURATION: f64 = 10.0;
const MAX_RISK_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanVolumePoint {
    pub label: String,
    pub vulnerabilities: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkCount {
    pub network: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityDistribution {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityDistribution {
    pub fn count(&self, severity: SeverityTier) -> usize {
        match severity {
            SeverityTier::Critical => self.critical,
            SeverityTier::High => self.high,
            SeverityTier::Medium => self.medium,
            SeverityTier::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    fn record(&mut self, severity: SeverityTier) {
        match severity {
            SeverityTier::Critical => self.critical += 1,
            SeverityTier::High => self.high += 1,
            SeverityTier::Medium => self.medium += 1,
            SeverityTier::Low => self.low += 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CodeTotals {
    pub total_lines: u64,
    pub total_functions: u64,
    pub avg_lines_per_contract: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskiestEntry {
    pub label: String,
    pub vulnerability_count: i64,
    pub tier: SeverityTier,
    /// Bar color. Tiers below Medium still chart as Medium.
    pub fill: &'static str,
}

/// Every derived statistic the dashboard shows, computed in one pass over a
/// single view of the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateSnapshot {
    pub total_scans: usize,
    pub total_vulnerabilities: i64,
    pub succeeded_scans: usize,
    pub failed_scans: usize,
    pub success_rate: f64,
    pub last_scan_date: String,
    pub risk_score: u8,
    pub risk_trend: Vec<TrendPoint>,
    pub scans_over_time: Vec<ScanVolumePoint>,
    pub severity_distribution: SeverityDistribution,
    pub network_distribution: Vec<NetworkCount>,
    pub top_riskiest: Vec<ScanRecord>,
    pub code_totals: CodeTotals,
}

impl AggregateSnapshot {
    pub fn compute(records: &[ScanRecord], top_n: usize) -> Self {
        let succeeded_scans = succeeded_count(records);

        Self {
            total_scans: total_scans(records),
            total_vulnerabilities: total_vulnerabilities(records),
            succeeded_scans,
            failed_scans: records.len() - succeeded_scans,
            success_rate: success_rate(records),
            last_scan_date: last_scan_date(records),
            risk_score: risk_score(records),
            risk_trend: risk_score_trend(records),
            scans_over_time: scans_over_time(records),
            severity_distribution: severity_distribution(records),
            network_distribution: network_distribution(records),
            top_riskiest: top_riskiest(records, top_n),
            code_totals: code_totals(records),
        }
    }

    pub fn critical_count(&self) -> usize {
        self.severity_distribution.critical
    }

    pub fn riskiest_entries(&self) -> Vec<RiskiestEntry> {
        self.top_riskiest
            .iter()
            .map(|record| {
                let level = tier(record.vulnerability_count);
                let fill = match level {
                    SeverityTier::Critical | SeverityTier::High => level.color(),
                    SeverityTier::Medium | SeverityTier::Low => SeverityTier::Medium.color(),
                };
                RiskiestEntry {
                    label: record.short_target(),
                    vulnerability_count: record.vulnerability_count,
                    tier: level,
                    fill,
                }
            })
            .collect()
    }
}

pub fn total_scans(records: &[ScanRecord]) -> usize {
    records.len()
}

pub fn total_vulnerabilities(records: &[ScanRecord]) -> i64 {
    records.iter().map(|r| r.vulnerability_count).sum()
}

pub fn succeeded_count(records: &[ScanRecord]) -> usize {
    records.iter().filter(|r| r.succeeded).count()
}

/// Fraction of successful scans in `[0, 1]`; zero for an empty history.
pub fn success_rate(records: &[ScanRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    succeeded_count(records) as f64 / records.len() as f64
}

pub fn last_scan_date(records: &[ScanRecord]) -> String {
    records
        .first()
        .map(|r| r.date_label.clone())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn risk_score(records: &[ScanRecord]) -> u8 {
    score_from_totals(total_vulnerabilities(records), records.len())
}

fn score_from_totals(total_vulnerabilities: i64, scans: usize) -> u8 {
    if scans == 0 {
        return 0;
    }
    let avg = total_vulnerabilities as f64 / scans as f64;
    let score = (avg / RISK_SATURATION * 100.0).min(MAX_RISK_SCORE).round();
    score.max(0.0) as u8
}

/// Running-average risk score over growing chronological prefixes.
///
/// Point `i` scores scans `1..=i` counted from the oldest, so the walk goes
/// over the newest-first slice in reverse.
pub fn risk_score_trend(records: &[ScanRecord]) -> Vec<TrendPoint> {
    let mut running_total = 0;
    records
        .iter()
        .rev()
        .enumerate()
        .map(|(index, record)| {
            running_total += record.vulnerability_count;
            TrendPoint {
                label: format!("Scan {}", index + 1),
                score: score_from_totals(running_total, index + 1),
            }
        })
        .collect()
}

pub fn scans_over_time(records: &[ScanRecord]) -> Vec<ScanVolumePoint> {
    records
        .iter()
        .rev()
        .enumerate()
        .map(|(index, record)| ScanVolumePoint {
            label: format!("Scan {}", index + 1),
            vulnerabilities: record.vulnerability_count,
        })
        .collect()
}

pub fn severity_distribution(records: &[ScanRecord]) -> SeverityDistribution {
    let mut distribution = SeverityDistribution::default();
    for record in records {
        distribution.record(tier(record.vulnerability_count));
    }
    distribution
}

/// Occurrences per network in the order each network is first met walking
/// the history newest-first.
pub fn network_distribution(records: &[ScanRecord]) -> Vec<NetworkCount> {
    let mut counts: Vec<NetworkCount> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|c| c.network == record.network) {
            Some(existing) => existing.count += 1,
            None => counts.push(NetworkCount {
                network: record.network.clone(),
                count: 1,
            }),
        }
    }
    counts
}

pub fn unique_networks(records: &[ScanRecord]) -> Vec<String> {
    network_distribution(records)
        .into_iter()
        .map(|c| c.network)
        .collect()
}

/// The `n` records with the most vulnerabilities. Ties keep their
/// newest-first order. Sorts a copy; the caller's slice is untouched.
pub fn top_riskiest(records: &[ScanRecord], n: usize) -> Vec<ScanRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.vulnerability_count.cmp(&a.vulnerability_count));
    ranked.truncate(n);
    ranked
}

pub fn code_totals(records: &[ScanRecord]) -> CodeTotals {
    let total_lines: u64 = records.iter().map(|r| r.lines_of_code.unwrap_or(0)).sum();
    let total_functions: u64 = records
        .iter()
        .map(|r| r.functions_analyzed.unwrap_or(0))
        .sum();
    let avg_lines_per_contract = if records.is_empty() {
        0
    } else {
        (total_lines as f64 / records.len() as f64).round() as u64
    };

    CodeTotals {
        total_lines,
        total_functions,
        avg_lines_per_contract,
    }
}

/// Case-insensitive target search plus an optional exact network match.
#[derive(Debug, Clone, Default)]
pub struct HistoryFilter {
    pub query: Option<String>,
    pub network: Option<String>,
}

impl HistoryFilter {
    pub fn matches(&self, record: &ScanRecord) -> bool {
        let matches_search = match &self.query {
            Some(query) => record
                .target
                .to_lowercase()
                .contains(&query.to_lowercase()),
            None => true,
        };
        let matches_network = match self.network.as_deref() {
            None | Some("all") => true,
            Some(network) => record.network == network,
        };
        matches_search && matches_network
    }

    pub fn apply(&self, records: &[ScanRecord]) -> Vec<ScanRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
