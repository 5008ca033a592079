use crate::history_file;
use prettytable::{Cell, Row};
use scan_analytics::{DashboardConfig, DashboardError, ScanStore, SeverityTier};
use thiserror::Error;

pub mod catalog;
pub mod history;
pub mod report;
pub mod scan;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Dashboard(#[from] DashboardError),
    #[error("Invalid input: {0}")]
    ValidationError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Config plus the history loaded for this invocation.
pub struct Session {
    pub config: DashboardConfig,
    pub store: ScanStore,
}

impl Session {
    pub fn open(config: DashboardConfig) -> CommandResult<Self> {
        let store = history_file::load(&config.history_path)?;
        Ok(Self { config, store })
    }

    pub fn save(&self) -> CommandResult<()> {
        history_file::save(&self.config.history_path, &self.store)?;
        Ok(())
    }
}

pub fn header_row(titles: &[&str]) -> Row {
    Row::new(titles.iter().map(|t| Cell::new(t).style_spec("Fb")).collect())
}

pub fn tier_cell(tier: SeverityTier) -> Cell {
    let spec = match tier {
        SeverityTier::Critical => "Frb",
        SeverityTier::High => "Fyb",
        SeverityTier::Medium => "Fy",
        SeverityTier::Low => "Fg",
    };
    Cell::new(tier.as_str()).style_spec(spec)
}
