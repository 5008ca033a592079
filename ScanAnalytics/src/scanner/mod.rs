use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod http;
mod simulated;

pub use http::HttpScanner;
pub use simulated::SimulatedScanner;

/// What the dashboard sends to the external scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    pub target: Option<String>,
    /// Network selector id, e.g. `ethereum-mainnet`.
    pub network: String,
    pub uploaded_file: Option<String>,
}

impl ScanRequest {
    pub fn for_address(address: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            target: Some(address.into()),
            network: network.into(),
            uploaded_file: None,
        }
    }

    pub fn for_file(file_name: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            target: None,
            network: network.into(),
            uploaded_file: Some(file_name.into()),
        }
    }

    /// The address if one was given, else the uploaded file name.
    pub fn display_target(&self) -> String {
        self.target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .or(self.uploaded_file.as_deref())
            .unwrap_or("Unknown")
            .to_string()
    }
}

/// Findings reported back by the scanner for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub vulnerability_count: i64,
    #[serde(default)]
    pub lines_of_code: Option<u64>,
    #[serde(default)]
    pub functions_analyzed: Option<u64>,
    #[serde(default)]
    pub compiler_version: Option<String>,
    pub succeeded: bool,
    pub duration_label: String,
}

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Scanner timed out after {0}s")]
    Timeout(u64),
    #[error("Scanner rejected the request with status {status}")]
    Rejected { status: u16 },
    #[error("Invalid scanner response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ContractScanner: Send + Sync {
    async fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome, ScannerError>;
}
