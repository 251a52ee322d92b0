use chrono::{Duration, NaiveDate, Weekday};

use crate::config::RegionProfile;
use crate::core::domain::Semester;
use crate::error::{ScheduleError, ScheduleResult};

/// Last teaching week a timetable may name.
pub const MAX_WEEK: u32 = 60;

/// Position of a term in a region's semester start table.
///
/// # Arguments
/// * `base_year` - First year covered by the table
/// * `year` - Academic year of the term
/// * `semester` - Term within the year
///
/// # Returns
/// * `i64` - `(year - base_year) * 3 + semester ordinal`, negative for years
///   before the table
pub fn semester_index(base_year: i32, year: i32, semester: Semester) -> i64 {
    (i64::from(year) - i64::from(base_year)) * 3 + i64::from(semester.ordinal())
}

/// First day of the given term.
///
/// # Example
/// ```
/// use timetable_rust::config::Region;
/// use timetable_rust::core::domain::Semester;
/// use timetable_rust::time::semester_start;
///
/// let start = semester_start(Region::Harbin.profile(), 2021, Semester::Spring).unwrap();
/// assert_eq!(start.to_string(), "2021-03-08");
/// ```
///
/// # Errors
/// `SemesterOutOfRange` when the profile has no start date for the term.
pub fn semester_start(
    profile: &RegionProfile,
    year: i32,
    semester: Semester,
) -> ScheduleResult<NaiveDate> {
    let starts = profile.semester_starts();
    let index = semester_index(profile.base_year(), year, semester);

    usize::try_from(index)
        .ok()
        .and_then(|i| starts.get(i).copied())
        .ok_or(ScheduleError::SemesterOutOfRange {
            year,
            semester,
            index,
            available: starts.len(),
        })
}

/// Days from Monday: Monday is 0 and Sunday is 6.
pub fn day_offset(day: Weekday) -> i64 {
    i64::from(day.num_days_from_monday())
}

/// Weekday from a Sunday-based index (0 = Sunday ... 6 = Saturday).
pub fn weekday_from_sunday_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Monday of the given teaching week, week 1 being the semester start.
pub fn week_start(semester_start: NaiveDate, week: u32) -> ScheduleResult<NaiveDate> {
    occurrence_date(semester_start, week, Weekday::Mon)
}

/// Calendar date of a class held on `day` in teaching week `week`.
///
/// # Arguments
/// * `semester_start` - First day of week 1
/// * `week` - Teaching week, starting at 1
/// * `day` - Day of the class
///
/// # Returns
/// * `Ok(NaiveDate)` - `semester_start + (week - 1) * 7 + day_offset(day)`
/// * `Err(ScheduleError::Range)` - for week 0, a week past [`MAX_WEEK`] or a
///   date outside the calendar
pub fn occurrence_date(semester_start: NaiveDate, week: u32, day: Weekday) -> ScheduleResult<NaiveDate> {
    if week == 0 {
        return Err(ScheduleError::range("Week numbers start at 1, got week 0"));
    }
    if week > MAX_WEEK {
        return Err(ScheduleError::range(format!(
            "Week {} is past the last teaching week {}",
            week, MAX_WEEK
        )));
    }

    let days = (i64::from(week) - 1) * 7 + day_offset(day);
    semester_start
        .checked_add_signed(Duration::days(days))
        .ok_or_else(|| {
            ScheduleError::range(format!(
                "Week {} {:?} overflows the calendar from {}",
                week, day, semester_start
            ))
        })
}
