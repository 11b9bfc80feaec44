//! Integrity sweep over the archive.
//!
//! Every `.json`/`.csv` file under the root is decoded and deleted unless it
//! holds a complete week. This never touches the network.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::chart::{is_complete_week, ChartEntry};
use crate::format::ArchiveFormat;

pub const SUMMARY: &str =
    "Any invalid/incomplete files have been removed. Remaining data checks out OK.";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub checked: usize,
    pub kept: usize,
    pub deleted: Vec<PathBuf>,
    pub delete_failures: Vec<PathBuf>,
}

/// Outcome for a single archive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Keep,
    WrongCount(usize),
    Unreadable(String),
}

pub fn read_week(path: &Path, format: ArchiveFormat) -> Result<Vec<ChartEntry>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    format.decode(&contents)
}

pub fn check_file(path: &Path, format: ArchiveFormat) -> Verdict {
    match read_week(path, format) {
        Ok(entries) if is_complete_week(entries.len()) => Verdict::Keep,
        Ok(entries) => Verdict::WrongCount(entries.len()),
        Err(e) => Verdict::Unreadable(format!("{:#}", e)),
    }
}

/// Deletes every archive file under `root` that does not hold a complete week.
pub fn verify_archive<P: AsRef<Path>>(root: P) -> VerifyReport {
    let root = root.as_ref();
    let mut report = VerifyReport::default();

    if !root.exists() {
        log::warn!("Archive directory {} does not exist; nothing to verify", root.display());
        return report;
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable archive entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(format) = ArchiveFormat::from_path(path) else {
            continue;
        };

        report.checked += 1;
        let reason = match check_file(path, format) {
            Verdict::Keep => {
                report.kept += 1;
                continue;
            }
            Verdict::WrongCount(count) => format!("{} entries", count),
            Verdict::Unreadable(error) => error,
        };

        log::info!("{}: invalid ({})", path.display(), reason);
        match fs::remove_file(path) {
            Ok(()) => {
                log::info!("File deleted: {}", path.display());
                report.deleted.push(path.to_path_buf());
            }
            Err(e) => {
                log::error!("Problem deleting file {}: {}", path.display(), e);
                report.delete_failures.push(path.to_path_buf());
            }
        }
    }

    log::info!(
        "Checked {} files: {} kept, {} deleted",
        report.checked,
        report.kept,
        report.deleted.len()
    );
    log::info!("{}", SUMMARY);
    report
}
