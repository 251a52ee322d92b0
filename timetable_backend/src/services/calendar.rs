//! Calendar projection: turns a schedule into dated events.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use log::info;

use crate::config::RegionProfile;
use crate::core::domain::{Cell, Content};
use crate::core::schedule::{DateOverride, Entry, Schedule};
use crate::error::{ScheduleError, ScheduleResult};
use crate::time::{occurrence_date, week_start, MAX_WEEK};

/// Hours after midnight at which a week marker is placed.
pub const WEEK_MARKER_HOUR: u32 = 7;
/// Days each week marker repeats for.
pub const WEEK_MARKER_DAYS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// "第N周" banner for a teaching week
    WeekMarker,
    /// One class meeting
    Class,
}

/// Alarm shown before a class starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub lead_minutes: u32,
    pub message: String,
}

impl Reminder {
    pub fn lead(&self) -> Duration {
        Duration::minutes(i64::from(self.lead_minutes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recurrence {
    Daily { count: u32 },
}

/// One projected event in floating local time.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub kind: EventKind,
    pub start: NaiveDateTime,
    pub duration: Duration,
    pub summary: String,
    pub location: String,
    pub reminder: Option<Reminder>,
    pub recurrence: Option<Recurrence>,
}

impl CalendarEvent {
    pub fn end(&self) -> NaiveDateTime {
        self.start + self.duration
    }
}

/// Project every class of the schedule, plus week markers unless disabled.
///
/// Week markers come first, then classes entry by entry in content order.
/// Occurrence dates found in the override map are moved or dropped.
///
/// # Errors
/// `SemesterOutOfRange` when the profile has no start for the schedule's
/// term, `Range` when a week is past [`MAX_WEEK`] or an occurrence falls
/// outside the calendar.
pub fn project_calendar(schedule: &Schedule, profile: &RegionProfile) -> ScheduleResult<Vec<CalendarEvent>> {
    let semester_start = schedule.semester_start(profile)?;
    let last_week = schedule.max_week().unwrap_or(0);
    if last_week > MAX_WEEK {
        return Err(ScheduleError::range(format!(
            "Week {} is past the last teaching week {}",
            last_week, MAX_WEEK
        )));
    }

    let mut events = Vec::new();
    if !schedule.disable_week_index {
        for week in 1..=last_week {
            events.push(week_marker(semester_start, week)?);
        }
    }

    for entry in schedule.entries() {
        for content in entry.contents() {
            for (week, cell) in content.weeks() {
                let computed = occurrence_date(semester_start, week, content.day())?;
                let date = match schedule.override_for(computed) {
                    Some(DateOverride::Suppressed) => continue,
                    Some(DateOverride::Moved(date)) => date,
                    None => computed,
                };
                events.push(class_event(schedule, entry, content, cell, date, profile));
            }
        }
    }

    info!(
        "Projected {} events for {} {}",
        events.len(),
        schedule.year(),
        schedule.semester()
    );
    Ok(events)
}

fn week_marker(semester_start: NaiveDate, week: u32) -> ScheduleResult<CalendarEvent> {
    let hour = NaiveTime::from_hms_opt(WEEK_MARKER_HOUR, 0, 0)
        .ok_or_else(|| ScheduleError::range("Week marker hour is not a valid time"))?;

    Ok(CalendarEvent {
        kind: EventKind::WeekMarker,
        start: week_start(semester_start, week)?.and_time(hour),
        duration: Duration::zero(),
        summary: format!("第{}周", week),
        location: String::new(),
        reminder: None,
        recurrence: Some(Recurrence::Daily {
            count: WEEK_MARKER_DAYS,
        }),
    })
}

fn class_event(
    schedule: &Schedule,
    entry: &Entry,
    content: &Content,
    cell: &Cell,
    date: NaiveDate,
    profile: &RegionProfile,
) -> CalendarEvent {
    let reminder = entry.notifications_enabled().then(|| Reminder {
        lead_minutes: schedule.notification_lead_minutes,
        message: format!("您在{}有一节{}即将开始", cell.room, entry.name()),
    });

    CalendarEvent {
        kind: EventKind::Class,
        start: date.and_time(profile.start_time(content.period())),
        duration: content.duration(),
        summary: format!(
            "{}{} by {}",
            entry.name(),
            content.kind().summary_suffix(),
            cell.teacher
        ),
        location: cell.room.clone(),
        reminder,
        recurrence: None,
    }
}
