use std::path::PathBuf;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use clap::Parser;

use crate::archive::{Archive, DEFAULT_ROOT};
use crate::error::ConfigError;
use crate::format::ArchiveFormat;
use crate::scraper::CHART_URL;
use crate::week::DateWindow;

const AFTER_HELP: &str = "\
Dates must be in the form: YYYY-MM-DD
Up to twenty weeks at a time are downloaded per execution (see --max-weeks).
END defaults to twenty weeks past START.";

/// Archive the weekly Hot 100 chart, one file per week
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
pub struct Cli {
    /// First chart week to fetch (snapped back to its Monday)
    #[arg(required_unless_present = "verify", value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Stop before this date (default: START + 140 days, never past today)
    #[arg(value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// Use the CSV data format instead of JSON
    #[arg(long)]
    pub csv: bool,

    /// Check that every JSON and CSV file in the data directory holds 100
    /// songs (99 is accepted) and delete invalid files. Dates are ignored.
    #[arg(long)]
    pub verify: bool,

    /// Root of the archive tree
    #[arg(long, env = "HOT100_DATA_DIR", default_value = DEFAULT_ROOT)]
    pub data_dir: PathBuf,

    /// Seconds to pause after each chart fetch
    #[arg(long, default_value_t = 3)]
    pub throttle_secs: u64,

    /// Most weeks fetched per run, 0 for no limit
    #[arg(long, default_value_t = 20)]
    pub max_weeks: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// Chart URL prefix; the week's date is appended
    #[arg(long, default_value = CHART_URL)]
    pub chart_url: String,
}

/// A calendar date written as `YYYY-MM-DD` with a four-digit year.
fn parse_date(arg: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(arg, "%Y-%m-%d")
        .map_err(|e| format!("{}: dates must be in the form YYYY-MM-DD", e))?;
    if arg.len() != 10 || !(1000..=9999).contains(&date.year()) {
        return Err("dates must be in the form YYYY-MM-DD".to_string());
    }
    Ok(date)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Harvest { window: DateWindow },
    Verify,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: Mode,
    pub data_dir: PathBuf,
    pub format: ArchiveFormat,
    pub throttle: Duration,
    pub max_fetches: Option<usize>,
    pub timeout: Duration,
    pub chart_url: String,
}

impl RunConfig {
    pub fn archive(&self) -> Archive {
        Archive::new(&self.data_dir, self.format)
    }
}

impl Cli {
    /// Resolves the arguments against `today`.
    pub fn into_config(self, today: NaiveDate) -> Result<RunConfig, ConfigError> {
        let mode = if self.verify {
            Mode::Verify
        } else {
            let start = self.start.ok_or(ConfigError::MissingStart)?;
            Mode::Harvest {
                window: DateWindow::new(start, self.end, today),
            }
        };

        Ok(RunConfig {
            mode,
            data_dir: self.data_dir,
            format: if self.csv {
                ArchiveFormat::Csv
            } else {
                ArchiveFormat::Json
            },
            throttle: Duration::from_secs(self.throttle_secs),
            max_fetches: (self.max_weeks > 0).then_some(self.max_weeks),
            timeout: Duration::from_secs(self.timeout_secs),
            chart_url: self.chart_url,
        })
    }
}
