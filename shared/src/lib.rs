use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Availability of a single calendar day.
///
/// The wire spellings are the ones the calendar service stores:
/// `"none"`, `"morning"`, `"afternoon"`, `"full_day"`, `"bolo"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    #[default]
    None,
    Morning,
    Afternoon,
    FullDay,
    Bolo,
}

impl DayStatus {
    /// Successor in the click cycle. Total over all five statuses; `Bolo`
    /// wraps back to `None`.
    pub fn next(self) -> Self {
        match self {
            DayStatus::None => DayStatus::Morning,
            DayStatus::Morning => DayStatus::Afternoon,
            DayStatus::Afternoon => DayStatus::FullDay,
            DayStatus::FullDay => DayStatus::Bolo,
            DayStatus::Bolo => DayStatus::None,
        }
    }

    /// Human-readable name for legends and tooltips.
    pub fn label(self) -> &'static str {
        match self {
            DayStatus::None => "Free",
            DayStatus::Morning => "Morning",
            DayStatus::Afternoon => "Afternoon",
            DayStatus::FullDay => "Full day",
            DayStatus::Bolo => "Bolo",
        }
    }
}

/// Stored record for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub status: DayStatus,
}

/// The full date -> status mapping, the unit of every read and write against
/// the calendar service. Keys are ISO dates (`YYYY-MM-DD`); a missing key is
/// equivalent to [`DayStatus::None`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarMap(HashMap<String, DayEntry>);

impl CalendarMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved status for `date`, defaulting to `None` for absent keys.
    pub fn status_for(&self, date: &str) -> DayStatus {
        self.0.get(date).map(|entry| entry.status).unwrap_or_default()
    }

    /// Candidate map with exactly one entry replaced. Writes to the service
    /// always carry the entire map, so an edit is the latest known-good state
    /// plus one change.
    pub fn with_status(&self, date: &str, status: DayStatus) -> Self {
        let mut entries = self.0.clone();
        entries.insert(date.to_string(), DayEntry { status });
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The month currently shown, independent of the stored data. Mutated only by
/// navigation; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCursor {
    pub year: i32,
    pub month: u32,
}

impl DisplayCursor {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// One month back, unbounded.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// One month forward, unbounded.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }
}

/// One dated cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDay {
    /// Day of month, 1-based.
    pub day: u32,
    /// ISO date key for this cell (`YYYY-MM-DD`).
    pub date: String,
    pub status: DayStatus,
}

/// Render-ready layout for one month: the number of blank cells before day 1
/// (Monday-first grid), then every day of the month in ascending order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: u32,
    pub days: Vec<GridDay>,
}

/// Lay out `cursor`'s month against `calendar`.
///
/// Pure and deterministic; recomputed from the current map on every render.
/// A cursor outside chrono's representable range lays out as an empty grid.
pub fn month_grid(cursor: DisplayCursor, calendar: &CalendarMap) -> MonthGrid {
    let Some(first) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1) else {
        return MonthGrid {
            year: cursor.year,
            month: cursor.month,
            leading_blanks: 0,
            days: Vec::new(),
        };
    };

    // Monday-first offset so day 1 lands under its weekday header.
    let leading_blanks = first.weekday().num_days_from_monday();

    let mut days = Vec::new();
    let mut date = first;
    while date.month() == cursor.month {
        let key = date.format("%Y-%m-%d").to_string();
        days.push(GridDay {
            day: date.day(),
            status: calendar.status_for(&key),
            date: key,
        });
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    MonthGrid {
        year: cursor.year,
        month: cursor.month,
        leading_blanks,
        days,
    }
}

/// The two ways synchronization with the calendar service can fail. Both are
/// non-fatal: shown as a transient message and logged.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncError {
    LoadFailed(String),
    SaveFailed(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::LoadFailed(detail) => {
                write!(f, "Could not load the calendar: {}", detail)
            }
            SyncError::SaveFailed(detail) => {
                write!(f, "Could not save the change: {}", detail)
            }
        }
    }
}

impl std::error::Error for SyncError {}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATUSES: [DayStatus; 5] = [
        DayStatus::None,
        DayStatus::Morning,
        DayStatus::Afternoon,
        DayStatus::FullDay,
        DayStatus::Bolo,
    ];

    #[test]
    fn test_status_cycle_order() {
        assert_eq!(DayStatus::None.next(), DayStatus::Morning);
        assert_eq!(DayStatus::Morning.next(), DayStatus::Afternoon);
        assert_eq!(DayStatus::Afternoon.next(), DayStatus::FullDay);
        assert_eq!(DayStatus::FullDay.next(), DayStatus::Bolo);
        assert_eq!(DayStatus::Bolo.next(), DayStatus::None);
    }

    #[test]
    fn test_status_cycle_has_period_five() {
        for status in ALL_STATUSES {
            let mut cycled = status;
            for _ in 0..5 {
                cycled = cycled.next();
            }
            assert_eq!(cycled, status);
        }
    }

    #[test]
    fn test_status_wire_spellings() {
        let spellings = [
            (DayStatus::None, "\"none\""),
            (DayStatus::Morning, "\"morning\""),
            (DayStatus::Afternoon, "\"afternoon\""),
            (DayStatus::FullDay, "\"full_day\""),
            (DayStatus::Bolo, "\"bolo\""),
        ];

        for (status, json) in spellings {
            assert_eq!(serde_json::to_string(&status).unwrap(), json);
            assert_eq!(serde_json::from_str::<DayStatus>(json).unwrap(), status);
        }
    }

    #[test]
    fn test_map_wire_shape() {
        let json = r#"{"2024-02-14":{"status":"morning"},"2024-02-15":{"status":"bolo"}}"#;
        let map: CalendarMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.status_for("2024-02-14"), DayStatus::Morning);
        assert_eq!(map.status_for("2024-02-15"), DayStatus::Bolo);
        // Absent key resolves to the default status.
        assert_eq!(map.status_for("2024-02-16"), DayStatus::None);
    }

    #[test]
    fn test_map_reserializes_unchanged() {
        // An unmodified load/save round trip must echo the stored state.
        let json = r#"{"2024-03-01":{"status":"full_day"},"2024-03-02":{"status":"afternoon"}}"#;
        let map: CalendarMap = serde_json::from_str(json).unwrap();
        let reserialized = serde_json::to_string(&map).unwrap();

        let original: serde_json::Value = serde_json::from_str(json).unwrap();
        let echoed: serde_json::Value = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(echoed, original);
    }

    #[test]
    fn test_with_status_builds_full_map_candidate() {
        let map = CalendarMap::new()
            .with_status("2024-05-01", DayStatus::Morning)
            .with_status("2024-05-02", DayStatus::Bolo);

        let candidate = map.with_status("2024-05-03", DayStatus::FullDay);

        // The candidate carries every prior entry plus exactly one change.
        assert_eq!(candidate.len(), 3);
        assert_eq!(candidate.status_for("2024-05-01"), DayStatus::Morning);
        assert_eq!(candidate.status_for("2024-05-02"), DayStatus::Bolo);
        assert_eq!(candidate.status_for("2024-05-03"), DayStatus::FullDay);
        // The source map is untouched.
        assert_eq!(map.len(), 2);
        assert_eq!(map.status_for("2024-05-03"), DayStatus::None);
    }

    #[test]
    fn test_click_on_unmarked_day_yields_morning() {
        let map = CalendarMap::new();
        let clicked = map.status_for("2025-01-10").next();
        assert_eq!(clicked, DayStatus::Morning);
    }

    #[test]
    fn test_february_2024_layout() {
        // Leap year, 29 days, starts on a Thursday.
        let grid = month_grid(DisplayCursor::new(2024, 2), &CalendarMap::new());

        assert_eq!(grid.leading_blanks, 3);
        assert_eq!(grid.days.len(), 29);
        assert_eq!(grid.days.first().unwrap().date, "2024-02-01");
        assert_eq!(grid.days.last().unwrap().date, "2024-02-29");
    }

    #[test]
    fn test_leading_blanks_follow_monday_first_weekday() {
        // (year, month, ISO weekday of day 1) spot checks.
        let cases = [
            (2024, 1, 1),  // Monday
            (2024, 9, 7),  // Sunday
            (2025, 6, 7),  // Sunday
            (2025, 12, 1), // Monday
            (2023, 2, 3),  // Wednesday
        ];

        for (year, month, iso_weekday) in cases {
            let grid = month_grid(DisplayCursor::new(year, month), &CalendarMap::new());
            assert_eq!(
                grid.leading_blanks,
                (iso_weekday - 1) % 7,
                "month {}-{}",
                year,
                month
            );
        }
    }

    #[test]
    fn test_month_lengths() {
        let lengths = [
            (2024, 4, 30),
            (2024, 7, 31),
            (2023, 2, 28),
            (2000, 2, 29),
            (1900, 2, 28),
        ];

        for (year, month, expected) in lengths {
            let grid = month_grid(DisplayCursor::new(year, month), &CalendarMap::new());
            assert_eq!(grid.days.len(), expected, "month {}-{}", year, month);
        }
    }

    #[test]
    fn test_grid_annotates_days_from_map() {
        let map = CalendarMap::new().with_status("2024-02-14", DayStatus::Afternoon);
        let grid = month_grid(DisplayCursor::new(2024, 2), &map);

        assert_eq!(grid.days[13].status, DayStatus::Afternoon);
        assert_eq!(grid.days[12].status, DayStatus::None);
    }

    #[test]
    fn test_cursor_navigation_wraps_years() {
        let january = DisplayCursor::new(2025, 1);
        assert_eq!(january.prev(), DisplayCursor::new(2024, 12));

        let december = DisplayCursor::new(2025, 12);
        assert_eq!(december.next(), DisplayCursor::new(2026, 1));

        let june = DisplayCursor::new(2025, 6);
        assert_eq!(june.prev(), DisplayCursor::new(2025, 5));
        assert_eq!(june.next(), DisplayCursor::new(2025, 7));
        assert_eq!(june.prev().next(), june);
    }

    #[test]
    fn test_sync_error_messages() {
        let load = SyncError::LoadFailed("timeout".to_string());
        assert_eq!(load.to_string(), "Could not load the calendar: timeout");

        let save = SyncError::SaveFailed("server error 500".to_string());
        assert_eq!(save.to_string(), "Could not save the change: server error 500");
    }
}
