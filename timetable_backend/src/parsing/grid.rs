//! Timetable grid import.
//!
//! The grid is the cell text of the exported timetable sheet: the header in
//! the top-left cell, then one column per weekday (Monday first) and one row
//! per period pair, starting at the profile's row and column offsets. A cell
//! holds alternating lines of course label and week expression.

use chrono::Weekday;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::config::RegionProfile;
use crate::core::domain::{Content, ContentKind, CourseLength, CoursePeriod, Semester};
use crate::core::schedule::Schedule;
use crate::error::{ScheduleError, ScheduleResult};
use crate::time::weekday_from_sunday_index;

/// Weekday columns read from the grid.
pub const DAY_COLUMNS: usize = 7;
/// Period rows read from the grid, noon excluded.
pub const PERIOD_ROWS: usize = 5;

/// Rectangular-ish table of optional cell strings, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimetableGrid {
    rows: Vec<Vec<Option<String>>>,
}

impl TimetableGrid {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    /// Text at `(row, column)`; missing rows and columns read as `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    pub fn header(&self) -> Option<&str> {
        self.cell(0, 0)
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Write a cell, growing the grid as needed.
    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) {
        if self.rows.len() <= row {
            self.rows.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, None);
        }
        cells[column] = Some(text.into());
    }
}

/// Year and semester from a header like `2021春季学期`.
///
/// # Errors
/// `Format` when the header is shorter than five characters or does not
/// start with a four-digit year.
pub fn parse_header(header: &str) -> ScheduleResult<(i32, Semester)> {
    let mut chars = header.chars();
    let year_text: String = chars.by_ref().take(4).collect();
    let semester_char = chars
        .next()
        .ok_or_else(|| ScheduleError::format(format!("Timetable header '{}' is too short", header)))?;

    let year = year_text
        .parse::<i32>()
        .map_err(|_| ScheduleError::format(format!("Timetable header '{}' has no year", header)))?;

    Ok((year, Semester::from_header_char(semester_char)))
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.map_or(true, |text| text.trim().is_empty())
}

/// Build a schedule from a timetable grid.
///
/// # Errors
/// `Format` for a missing or malformed header or a cell whose lines do not
/// pair up, and any error raised while parsing a week expression. The
/// first failure aborts the import.
pub fn import_schedule(grid: &TimetableGrid, profile: &RegionProfile) -> ScheduleResult<Schedule> {
    let header = grid
        .header()
        .ok_or_else(|| ScheduleError::format("Timetable header cell is missing"))?;
    let (year, semester) = parse_header(header)?;
    let mut schedule = Schedule::new(year, semester);

    let row_offset = profile.row_offset();
    let column_offset = profile.column_offset();

    for i in 0..DAY_COLUMNS {
        let day = weekday_from_sunday_index(((i + 1) % 7) as u8).unwrap_or(Weekday::Sun);
        let mut j = 0;
        while j < PERIOD_ROWS {
            let current = grid.cell(j + row_offset, i + column_offset);
            if is_blank(current) {
                j += 1;
                continue;
            }
            let next = grid.cell(j + row_offset + 1, i + column_offset);
            let length = CourseLength::from_long(current == next);
            let period = CoursePeriod::try_from((j + 1) as u8)?;

            let text = profile.preprocess_cell(current.unwrap_or_default());
            debug!("Cell {:?} {} ({:?}): {:?}", day, period, length, text);
            import_cell(&mut schedule, &text, day, period, length, profile)?;

            j += if length.is_long() { 2 } else { 1 };
        }
    }

    info!(
        "Imported {} {} timetable with {} courses",
        year,
        semester,
        schedule.len()
    );
    Ok(schedule)
}

fn import_cell(
    schedule: &mut Schedule,
    text: &str,
    day: Weekday,
    period: CoursePeriod,
    length: CourseLength,
    profile: &RegionProfile,
) -> ScheduleResult<()> {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() % 2 != 0 {
        return Err(ScheduleError::format(format!(
            "Cell lines do not pair course and weeks: {:?}",
            text
        )));
    }

    for pair in lines.chunks(2) {
        let (label, expression) = (pair[0], pair[1]);
        let (name, kind) = if label.contains(profile.lab_label()) {
            (label.replace(profile.lab_label(), ""), ContentKind::Lab)
        } else {
            (label.to_string(), ContentKind::Standard)
        };

        let content = Content::from_expression(&name, day, period, length, kind, expression, profile)?;
        if content.max_week().is_none() {
            warn!("Week expression {:?} for {} yields no weeks", expression, name);
        }
        schedule.entry_or_insert(&name).add_or_merge_content(content)?;
    }

    Ok(())
}
