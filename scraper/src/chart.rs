use serde::{Deserialize, Serialize};

/// Number of entries in a complete week.
pub const FULL_CHART: usize = 100;

/// Several charts from late 1976 to early 1977 list only 99 songs.
pub const SHORT_CHART: usize = 99;

/// Whether a week holding `count` entries is complete.
pub fn is_complete_week(count: usize) -> bool {
    count == FULL_CHART || count == SHORT_CHART
}

/// One ranked song as stored in the archive.
///
/// Every field is kept as display text: new entries render rank history as
/// dashes or blanks, so nothing here is parsed into numbers.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase", default)]
pub struct ChartEntry {
    pub rank: String,
    pub song: String,
    pub artist: String,
    pub last_week: String,
    pub trend: String,
    pub movement: String,
    pub peak: String,
    pub weeks: String,
}

impl ChartEntry {
    pub const FIELDS: [&'static str; 8] = [
        "Rank", "Song", "Artist", "LastWeek", "Trend", "Movement", "Peak", "Weeks",
    ];
}

/// The eight text fragments pulled from one chart row, untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawEntry {
    pub rank: String,
    pub song: String,
    pub artist: String,
    pub last_week: String,
    pub trend: String,
    pub movement: String,
    pub peak: String,
    pub weeks: String,
}

impl RawEntry {
    /// Trims every field and corrects the source's "Failing" trend typo.
    pub fn normalize(&self) -> ChartEntry {
        let trend = match self.trend.trim() {
            "Failing" => "Falling".to_string(),
            other => other.to_string(),
        };

        ChartEntry {
            rank: self.rank.trim().to_string(),
            song: self.song.trim().to_string(),
            artist: self.artist.trim().to_string(),
            last_week: self.last_week.trim().to_string(),
            trend,
            movement: self.movement.trim().to_string(),
            peak: self.peak.trim().to_string(),
            weeks: self.weeks.trim().to_string(),
        }
    }
}

pub fn normalize_all(raw: &[RawEntry]) -> Vec<ChartEntry> {
    raw.iter().map(RawEntry::normalize).collect()
}
