use crate::ensure;
use crate::error::{DashboardError, DashboardResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP endpoint of the external scanner. Without one the simulated
    /// scanner is used.
    pub scanner_endpoint: Option<String>,
    pub scanner_timeout_secs: u64,
    pub top_riskiest: usize,
    pub progress_step: u8,
    pub progress_ceiling: u8,
    pub progress_tick_ms: u64,
    /// How long the simulated scanner pretends to work.
    pub simulated_delay_ms: u64,
    pub history_path: PathBuf,
    pub default_network: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            scanner_endpoint: None,
            scanner_timeout_secs: 30,
            top_riskiest: 10,
            progress_step: 5,
            progress_ceiling: 95,
            progress_tick_ms: 100,
            simulated_delay_ms: 2000,
            history_path: PathBuf::from("scan-history.json"),
            default_network: "ethereum-mainnet".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file; missing keys take defaults.
    pub fn load(path: &Path) -> DashboardResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| DashboardError::Config(format!("Invalid config format: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DashboardResult<()> {
        ensure!(
            self.progress_step > 0,
            DashboardError::Config("progress_step must be positive".to_string())
        );
        ensure!(
            self.progress_ceiling < 100,
            DashboardError::Config("progress_ceiling must stay below 100".to_string())
        );
        ensure!(
            self.progress_tick_ms > 0,
            DashboardError::Config("progress_tick_ms must be positive".to_string())
        );
        ensure!(
            self.top_riskiest > 0,
            DashboardError::Config("top_riskiest must be positive".to_string())
        );
        Ok(())
    }

    pub fn scanner_timeout(&self) -> Duration {
        Duration::from_secs(self.scanner_timeout_secs)
    }

    pub fn progress_tick(&self) -> Duration {
        Duration::from_millis(self.progress_tick_ms)
    }

    pub fn simulated_delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("scan-analytics-{}-{}.json", name, std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let path = temp_config("partial", r#"{ "top_riskiest": 3, "scanner_endpoint": "http://localhost:9000/scan" }"#);
        let config = DashboardConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.top_riskiest, 3);
        assert_eq!(config.scanner_endpoint.as_deref(), Some("http://localhost:9000/scan"));
        assert_eq!(config.progress_ceiling, 95);
        assert_eq!(config.default_network, "ethereum-mainnet");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let path = temp_config("ceiling", r#"{ "progress_ceiling": 100 }"#);
        let result = DashboardConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(DashboardError::Config(_))));

        let config = DashboardConfig {
            progress_step: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DashboardConfig {
            progress_tick_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(DashboardError::Config(_))));

        let path = temp_config("tick", r#"{ "progress_tick_ms": 0 }"#);
        let result = DashboardConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = DashboardConfig::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(DashboardError::Config(_))));
    }
}
