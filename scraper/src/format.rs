//! On-disk encodings of a chart week.

use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use crate::chart::ChartEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveFormat {
    #[default]
    Json,
    Csv,
}

impl ArchiveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveFormat::Json => "json",
            ArchiveFormat::Csv => "csv",
        }
    }

    /// Format of an archive file, judged by extension alone.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ArchiveFormat::Json),
            "csv" => Some(ArchiveFormat::Csv),
            _ => None,
        }
    }

    pub fn encode(&self, entries: &[ChartEntry]) -> Result<String> {
        match self {
            ArchiveFormat::Json => {
                serde_json::to_string_pretty(entries).context("Failed to serialize chart week")
            }
            ArchiveFormat::Csv => encode_csv(entries),
        }
    }

    pub fn decode(&self, contents: &str) -> Result<Vec<ChartEntry>> {
        match self {
            ArchiveFormat::Json => {
                serde_json::from_str(contents).context("Failed to parse JSON chart week")
            }
            ArchiveFormat::Csv => decode_csv(contents),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchiveFormat::Json => write!(f, "JSON"),
            ArchiveFormat::Csv => write!(f, "CSV"),
        }
    }
}

/// Song and artist are quoted with any embedded quotes dropped. Nothing else
/// is escaped, so a comma in another field shifts the columns of its row.
fn encode_csv(entries: &[ChartEntry]) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(Vec::new());

    writer
        .write_record(ChartEntry::FIELDS)
        .context("Failed to write CSV header")?;
    for entry in entries {
        let song = quoted(&entry.song);
        let artist = quoted(&entry.artist);
        writer
            .write_record([
                entry.rank.as_str(),
                song.as_str(),
                artist.as_str(),
                entry.last_week.as_str(),
                entry.trend.as_str(),
                entry.movement.as_str(),
                entry.peak.as_str(),
                entry.weeks.as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for rank {}", entry.rank))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV output: {}", e.error()))?;
    String::from_utf8(bytes).context("CSV output is not valid UTF-8")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', ""))
}

fn decode_csv(contents: &str) -> Result<Vec<ChartEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(contents.as_bytes());

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV row {}", i + 1))?;
        if record.len() != ChartEntry::FIELDS.len() {
            return Err(anyhow!(
                "CSV row {} has {} fields, expected {}",
                i + 1,
                record.len(),
                ChartEntry::FIELDS.len()
            ));
        }
        let field = |n: usize| record.get(n).unwrap_or_default().to_string();
        entries.push(ChartEntry {
            rank: field(0),
            song: field(1),
            artist: field(2),
            last_week: field(3),
            trend: field(4),
            movement: field(5),
            peak: field(6),
            weeks: field(7),
        });
    }

    Ok(entries)
}
