use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One completed scan attempt as shown in the dashboard history.
///
/// The date, time and duration labels are formatted once when the record is
/// created and carried around as opaque strings afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub date_label: String,
    pub time_label: String,
    /// Contract address or uploaded file name.
    pub target: String,
    pub network: String,
    pub vulnerability_count: i64,
    pub duration_label: String,
    pub succeeded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions_analyzed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler_version: Option<String>,
}

impl ScanRecord {
    pub fn new(target: impl Into<String>, network: impl Into<String>, vulnerability_count: i64) -> Self {
        Self {
            date_label: String::new(),
            time_label: String::new(),
            target: target.into(),
            network: network.into(),
            vulnerability_count,
            duration_label: String::new(),
            succeeded: true,
            lines_of_code: None,
            functions_analyzed: None,
            compiler_version: None,
        }
    }

    /// Stamp the capture time labels, e.g. `Oct 15, 2025` / `01:45:01 AM`.
    pub fn captured_at<Tz>(mut self, at: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.date_label = date_label(at);
        self.time_label = time_label(at);
        self
    }

    /// Target shortened for chart axes.
    pub fn short_target(&self) -> String {
        let prefix: String = self.target.chars().take(10).collect();
        format!("{}...", prefix)
    }
}

pub fn date_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%b %-d, %Y").to_string()
}

pub fn time_label<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%I:%M:%S %p").to_string()
}

/// Display name for a network selector id: `ethereum-mainnet` becomes
/// `Ethereum`, `bsc` becomes `Bsc`.
pub fn network_display_name(network_id: &str) -> String {
    let base = network_id.split('-').next().unwrap_or_default();
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
