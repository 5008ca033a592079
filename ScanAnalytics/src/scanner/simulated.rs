use super::{ContractScanner, ScanOutcome, ScanRequest, ScannerError};
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

const SUCCESS_PROBABILITY: f64 = 0.8;

/// Stand-in scanner for demos: waits, then makes up plausible findings.
pub struct SimulatedScanner {
    delay: Duration,
}

impl SimulatedScanner {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedScanner {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl ContractScanner for SimulatedScanner {
    async fn scan(&self, _request: &ScanRequest) -> Result<ScanOutcome, ScannerError> {
        tokio::time::sleep(self.delay).await;

        let mut rng = rand::thread_rng();
        Ok(ScanOutcome {
            vulnerability_count: rng.gen_range(0..10),
            lines_of_code: Some(rng.gen_range(200..1000)),
            functions_analyzed: Some(rng.gen_range(5..25)),
            compiler_version: Some("0.8.20".to_string()),
            succeeded: rng.gen_bool(SUCCESS_PROBABILITY),
            duration_label: "1.20s".to_string(),
        })
    }
}
