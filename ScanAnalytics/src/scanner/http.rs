use super::{ContractScanner, ScanOutcome, ScanRequest, ScannerError};
use async_trait::async_trait;
use log::debug;
use std::time::Duration;

/// Scanner reached over HTTP: the request is POSTed as JSON and the reply is
/// decoded as a [`ScanOutcome`].
pub struct HttpScanner {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpScanner {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContractScanner for HttpScanner {
    async fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome, ScannerError> {
        debug!("Submitting {} to {}", request.display_target(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ScannerError::Timeout(self.timeout.as_secs())
                } else {
                    ScannerError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScannerError::Rejected {
                status: status.as_u16(),
            });
        }

        response
            .json::<ScanOutcome>()
            .await
            .map_err(|e| ScannerError::InvalidResponse(e.to_string()))
    }
}
