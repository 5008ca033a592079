use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("External scan failed: {0}")]
    ExternalScanFailure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Malformed export at line {line}: {reason}")]
    MalformedExport {
        line: usize,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;

// Helper functions for common validation scenarios
pub mod helpers {
    use super::*;

    pub fn check_vulnerability_count(count: i64) -> DashboardResult<()> {
        crate::ensure!(
            count >= 0,
            DashboardError::Validation(format!(
                "vulnerability count must be non-negative, got {}",
                count
            ))
        );
        Ok(())
    }

    pub fn check_submission_target(
        target: Option<&str>,
        uploaded_file: Option<&str>,
    ) -> DashboardResult<()> {
        let has_target = target.map(|t| !t.trim().is_empty()).unwrap_or(false);
        let has_file = uploaded_file.map(|f| !f.trim().is_empty()).unwrap_or(false);

        crate::ensure!(
            has_target || has_file,
            DashboardError::Validation(
                "a contract address or an uploaded source file is required".to_string()
            )
        );
        Ok(())
    }
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            return Err($err);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::helpers::*;
    use super::*;

    #[test]
    fn negative_counts_are_rejected() {
        assert!(check_vulnerability_count(0).is_ok());
        assert!(check_vulnerability_count(12).is_ok());
        assert!(matches!(
            check_vulnerability_count(-1),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn submission_needs_target_or_file() {
        assert!(check_submission_target(Some("0xabc"), None).is_ok());
        assert!(check_submission_target(None, Some("Vault.sol")).is_ok());
        assert!(check_submission_target(Some("   "), None).is_err());
        assert!(check_submission_target(None, None).is_err());
    }
}
