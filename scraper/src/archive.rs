use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::ChartEntry;
use crate::format::ArchiveFormat;
use crate::week::WeekAnchor;

pub const DEFAULT_ROOT: &str = "data";

/// The on-disk archive: `<root>/<YYYY>/<YYYY-MM-DD>.<ext>`, one file per week.
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    format: ArchiveFormat,
}

impl Archive {
    pub fn new<P: AsRef<Path>>(root: P, format: ArchiveFormat) -> Self {
        Archive {
            root: root.as_ref().to_path_buf(),
            format,
        }
    }

    pub fn year_dir(&self, week: WeekAnchor) -> PathBuf {
        self.root.join(week.year().to_string())
    }

    pub fn path_for(&self, week: WeekAnchor) -> PathBuf {
        self.year_dir(week)
            .join(format!("{}.{}", week, self.format.extension()))
    }

    /// A week counts as archived as soon as its file exists, whatever it holds.
    pub fn contains(&self, week: WeekAnchor) -> bool {
        self.path_for(week).exists()
    }

    /// Writes a week's entries to its file and returns the path.
    ///
    /// Never replaces an existing file; callers check `contains` first and an
    /// existing file here is reported as an error.
    pub fn write_week(&self, week: WeekAnchor, entries: &[ChartEntry]) -> Result<PathBuf> {
        let dir = self.year_dir(week);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let payload = self.format.encode(entries)?;

        let path = self.path_for(week);
        let mut file = File::options()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("Failed to create file: {}", path.display()))?;
        file.write_all(payload.as_bytes())
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        file.flush()
            .with_context(|| format!("Failed to flush file: {}", path.display()))?;

        Ok(path)
    }
}
