//! Calendar handling: which chart weeks a run covers.
//!
//! Charts are published on Saturdays for the week of the following Monday, so
//! every week is keyed by that Monday. The same key names the remote page and
//! the local archive file.

use std::fmt;

use chrono::{Datelike, Days, Duration, NaiveDate, Weekday};

/// Weekday every anchor falls on.
pub const ANCHOR_WEEKDAY: Weekday = Weekday::Mon;

/// Span covered when no end date is given (twenty weeks).
pub const DEFAULT_SPAN_DAYS: u64 = 140;

/// Week of the very first chart (published 1958-08-02).
pub fn first_chart_week() -> NaiveDate {
    NaiveDate::from_ymd_opt(1958, 8, 4).unwrap_or(NaiveDate::MIN)
}

/// The Monday identifying one chart week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekAnchor(NaiveDate);

impl WeekAnchor {
    /// Snaps `date` backwards (never forwards) to its anchor weekday.
    pub fn containing(date: NaiveDate) -> Self {
        let back = (7 + date.weekday().num_days_from_monday()
            - ANCHOR_WEEKDAY.num_days_from_monday())
            % 7;
        WeekAnchor(date - Duration::days(i64::from(back)))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The following week, unless that runs off the calendar.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add_days(Days::new(7)).map(WeekAnchor)
    }
}

impl fmt::Display for WeekAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A normalized range of chart weeks: `[start, end)` with `start` on an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: WeekAnchor,
    end: NaiveDate,
}

impl DateWindow {
    /// Builds the window for a requested range.
    ///
    /// The start is clamped to the first chart week. A missing end defaults
    /// to start + 140 days. An end past `today` runs through the end of today,
    /// so a Monday run still picks up that Monday's chart. Only after that is
    /// the start snapped back to its Monday. An end before the requested
    /// start, or a start after today, collapses the window onto the anchor,
    /// so it yields nothing rather than an error.
    pub fn new(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> Self {
        let start = start.max(first_chart_week());
        let anchor = WeekAnchor::containing(start);
        let mut end = end.unwrap_or_else(|| {
            start
                .checked_add_days(Days::new(DEFAULT_SPAN_DAYS))
                .unwrap_or(NaiveDate::MAX)
        });
        if end > today {
            end = today.succ_opt().unwrap_or(today);
        }
        if end < start || start > today {
            end = anchor.date();
        }
        DateWindow { start: anchor, end }
    }

    pub fn start(&self) -> WeekAnchor {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Anchors seven days apart, strictly before the end date.
    pub fn anchors(&self) -> impl Iterator<Item = WeekAnchor> {
        let end = self.end;
        std::iter::successors(Some(self.start), WeekAnchor::next)
            .take_while(move |week| week.date() < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn today() -> NaiveDate {
        date("2024-06-01")
    }

    #[test]
    fn snaps_back_to_monday() {
        // 2020-01-01 is a Wednesday
        assert_eq!(WeekAnchor::containing(date("2020-01-01")).to_string(), "2019-12-30");
        assert_eq!(WeekAnchor::containing(date("2019-12-30")).to_string(), "2019-12-30");
        // Sunday goes back six days, not forward one
        assert_eq!(WeekAnchor::containing(date("2020-01-05")).to_string(), "2019-12-30");
    }

    #[test]
    fn start_before_first_chart_is_clamped() {
        let window = DateWindow::new(date("1950-03-15"), None, today());
        let first = window.anchors().next().unwrap();
        assert_eq!(first.date(), first_chart_week());
    }

    #[test]
    fn every_anchor_is_a_monday() {
        let window = DateWindow::new(date("1999-02-18"), Some(date("2001-11-03")), today());
        let anchors: Vec<_> = window.anchors().collect();
        assert!(!anchors.is_empty());
        assert!(anchors.iter().all(|w| w.date().weekday() == ANCHOR_WEEKDAY));
        assert!(anchors.windows(2).all(|p| p[1].date() - p[0].date() == Duration::days(7)));
    }

    #[test]
    fn end_before_start_is_empty() {
        // Monday and mid-week starts alike
        for start in ["2010-05-10", "2010-05-13"] {
            let window = DateWindow::new(date(start), Some(date("2010-01-01")), today());
            assert_eq!(window.anchors().count(), 0, "{start}");
        }
    }

    #[test]
    fn single_day_range_covers_its_week() {
        let window = DateWindow::new(date("2010-05-13"), Some(date("2010-05-13")), today());
        let anchors: Vec<String> = window.anchors().map(|w| w.to_string()).collect();
        assert_eq!(anchors, ["2010-05-10"]);
    }

    #[test]
    fn start_in_the_future_is_empty() {
        for start in ["2030-01-07", "2024-06-02", "2024-06-05"] {
            let window = DateWindow::new(date(start), None, today());
            assert_eq!(window.anchors().count(), 0, "{start}");
        }
    }

    #[test]
    fn anchors_never_pass_today() {
        let window = DateWindow::new(date("2024-04-03"), None, today());
        assert!(window.anchors().all(|w| w.date() <= today()));
        assert_eq!(window.anchors().last().unwrap().to_string(), "2024-05-27");
    }

    #[test]
    fn end_is_clamped_to_today() {
        let window = DateWindow::new(date("2024-05-06"), Some(date("2025-01-01")), today());
        assert_eq!(window.end(), today().succ_opt().unwrap());
        let anchors: Vec<String> = window.anchors().map(|w| w.to_string()).collect();
        assert_eq!(anchors, ["2024-05-06", "2024-05-13", "2024-05-20", "2024-05-27"]);
    }

    #[test]
    fn monday_run_includes_that_monday() {
        let monday = date("2024-06-03");
        let window = DateWindow::new(date("2024-05-27"), None, monday);
        let anchors: Vec<String> = window.anchors().map(|w| w.to_string()).collect();
        assert_eq!(anchors, ["2024-05-27", "2024-06-03"]);

        let window = DateWindow::new(monday, None, monday);
        assert_eq!(window.anchors().count(), 1);
    }

    #[test]
    fn far_future_start_does_not_overflow() {
        let window = DateWindow::new(NaiveDate::MAX, None, today());
        assert_eq!(window.anchors().count(), 0);

        let window = DateWindow::new(date("2024-05-20"), Some(NaiveDate::MAX), today());
        assert_eq!(window.anchors().count(), 2);
    }

    #[test]
    fn default_window_spans_twenty_weeks() {
        let window = DateWindow::new(date("2020-01-01"), None, today());
        let anchors: Vec<WeekAnchor> = window.anchors().collect();
        assert_eq!(anchors.first().unwrap().to_string(), "2019-12-30");
        assert_eq!(anchors.last().unwrap().to_string(), "2020-05-18");
        // the end is computed before snapping, so the Monday in the partial
        // first week is included as well
        assert_eq!(anchors.len(), 21);
    }
}
