//! The per-week fetch, normalize, persist loop.

use std::thread;
use std::time::Duration;

use crate::archive::Archive;
use crate::chart::{is_complete_week, normalize_all};
use crate::scraper::ChartSource;
use crate::week::WeekAnchor;

pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(3);

/// Fetches allowed per run unless configured otherwise.
pub const DEFAULT_MAX_FETCHES: usize = 20;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    pub written: usize,
    pub skipped: usize,
    pub fetch_failures: usize,
    pub write_failures: usize,
    /// Missing weeks left for a later run once the fetch ceiling was hit.
    pub deferred: usize,
}

pub struct Harvester<S> {
    source: S,
    archive: Archive,
    throttle: Duration,
    max_fetches: Option<usize>,
}

impl<S: ChartSource> Harvester<S> {
    pub fn new(source: S, archive: Archive) -> Self {
        Harvester {
            source,
            archive,
            throttle: DEFAULT_THROTTLE,
            max_fetches: Some(DEFAULT_MAX_FETCHES),
        }
    }

    pub fn throttle(mut self, pause: Duration) -> Self {
        self.throttle = pause;
        self
    }

    /// `None` removes the ceiling.
    pub fn max_fetches(mut self, limit: Option<usize>) -> Self {
        self.max_fetches = limit;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Archives every week in `weeks` that is not on disk yet.
    ///
    /// Nothing short of the ceiling stops the run: a failed fetch still
    /// persists whatever came back (possibly nothing) and a failed write moves
    /// on to the next week. `verify` removes the resulting short files.
    pub fn run<I>(&self, weeks: I) -> HarvestSummary
    where
        I: IntoIterator<Item = WeekAnchor>,
    {
        let mut summary = HarvestSummary::default();
        let mut fetches = 0;
        let mut weeks = weeks.into_iter();

        while let Some(week) = weeks.next() {
            log::info!("-- Week: {}", week);

            if self.archive.contains(week) {
                log::debug!("{} already archived", self.archive.path_for(week).display());
                summary.skipped += 1;
                continue;
            }

            if self.max_fetches.is_some_and(|limit| fetches >= limit) {
                let remaining = 1 + weeks
                    .by_ref()
                    .filter(|w| !self.archive.contains(*w))
                    .count();
                log::info!(
                    "Fetch limit of {} weeks reached; {} missing weeks left for the next run",
                    fetches,
                    remaining
                );
                summary.deferred = remaining;
                break;
            }

            fetches += 1;
            let raw = match self.source.fetch_week(week) {
                Ok(raw) => raw,
                Err(e) => {
                    log::warn!("Visit error for {}: {}", week, e);
                    summary.fetch_failures += 1;
                    Vec::new()
                }
            };

            let entries = normalize_all(&raw);
            if !is_complete_week(entries.len()) {
                log::warn!(
                    "{} has {} entries; writing it anyway, --verify will remove it",
                    week,
                    entries.len()
                );
            }

            match self.archive.write_week(week, &entries) {
                Ok(path) => {
                    log::info!("Wrote {} entries to {}", entries.len(), path.display());
                    summary.written += 1;
                }
                Err(e) => {
                    log::error!("{:#}", e);
                    summary.write_failures += 1;
                }
            }

            if !self.throttle.is_zero() {
                log::info!("self-throttle: pausing for {:?}", self.throttle);
                thread::sleep(self.throttle);
            }
        }

        summary
    }
}
