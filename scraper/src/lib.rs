pub mod archive;
pub mod chart;
pub mod config;
pub mod error;
pub mod format;
pub mod harvest;
pub mod scraper;
pub mod verify;
pub mod week;

#[cfg(test)]
pub mod tests;

// Re-export key types and functions for easier access
pub use crate::archive::Archive;
pub use crate::chart::{is_complete_week, ChartEntry, RawEntry};
pub use crate::config::{Cli, Mode, RunConfig};
pub use crate::error::{ConfigError, FetchError};
pub use crate::format::ArchiveFormat;
pub use crate::harvest::{HarvestSummary, Harvester};
pub use crate::scraper::{parse_chart, ChartSource, HttpChartSource};
pub use crate::verify::{verify_archive, VerifyReport};
pub use crate::week::{DateWindow, WeekAnchor};
