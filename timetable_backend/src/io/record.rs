//! Persistence record for schedules.
//!
//! The JSON layout uses camelCase keys, numeric ordinals for enums and a
//! Sunday-based day index:
//!
//! ```json
//! {
//!   "year": 2021, "semester": 0,
//!   "enableNotification": true, "notificationTime": 25, "disableWeekIndex": false,
//!   "dateMap": { "2021-05-01": null, "2021-05-08": "2021-05-03" },
//!   "entries": [{
//!     "courseName": "高等数学", "enableNotification": true,
//!     "contents": [{
//!       "courseName": "高等数学", "dayOfWeek": 1, "courseTime": 1, "type": 0,
//!       "isLongCourse": false,
//!       "weekInformation": { "1": { "name": "高等数学", "teacher": "张三", "location": "H304" } }
//!     }]
//!   }]
//! }
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::domain::{Cell, Content, ContentKind, CourseLength, CoursePeriod, Semester, WeekMap};
use crate::core::schedule::{DateOverride, Entry, Schedule};
use crate::error::{ScheduleError, ScheduleResult};
use crate::time::weekday_from_sunday_index;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    pub name: String,
    pub teacher: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    pub course_name: String,
    pub day_of_week: u8,
    pub course_time: u8,
    #[serde(rename = "type")]
    pub kind: u8,
    pub is_long_course: bool,
    #[serde(default)]
    pub week_information: BTreeMap<u32, CellRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub course_name: String,
    #[serde(default)]
    pub enable_notification: bool,
    #[serde(default)]
    pub contents: Vec<ContentRecord>,
}

fn default_notification_time() -> u32 {
    crate::core::schedule::DEFAULT_NOTIFICATION_LEAD_MINUTES
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecord {
    pub year: i32,
    pub semester: u8,
    /// Summary of the entry flags; the per-entry flags win on load.
    #[serde(default)]
    pub enable_notification: Option<bool>,
    #[serde(default = "default_notification_time")]
    pub notification_time: u32,
    #[serde(default)]
    pub disable_week_index: bool,
    #[serde(default)]
    pub date_map: BTreeMap<NaiveDate, Option<NaiveDate>>,
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

impl From<&Cell> for CellRecord {
    fn from(cell: &Cell) -> Self {
        Self {
            name: cell.name.clone(),
            teacher: cell.teacher.clone(),
            location: cell.room.clone(),
        }
    }
}

impl From<CellRecord> for Cell {
    fn from(record: CellRecord) -> Self {
        Cell::new(record.name, record.teacher, record.location)
    }
}

impl From<&Content> for ContentRecord {
    fn from(content: &Content) -> Self {
        Self {
            course_name: content.name().to_string(),
            day_of_week: content.day().num_days_from_sunday() as u8,
            course_time: content.period().ordinal(),
            kind: content.kind().ordinal(),
            is_long_course: content.is_long(),
            week_information: content
                .weeks()
                .map(|(week, cell)| (week, CellRecord::from(cell)))
                .collect(),
        }
    }
}

impl TryFrom<ContentRecord> for Content {
    type Error = ScheduleError;

    fn try_from(record: ContentRecord) -> ScheduleResult<Self> {
        let day = weekday_from_sunday_index(record.day_of_week).ok_or_else(|| {
            ScheduleError::Serialization(format!("Invalid dayOfWeek {}", record.day_of_week))
        })?;
        let period = CoursePeriod::try_from(record.course_time)?;
        let kind = ContentKind::from_ordinal(record.kind)
            .ok_or_else(|| ScheduleError::Serialization(format!("Invalid content type {}", record.kind)))?;
        let weeks: WeekMap = record
            .week_information
            .into_iter()
            .map(|(week, cell)| (week, Cell::from(cell)))
            .collect();

        Ok(Content::from_weeks(
            &record.course_name,
            day,
            period,
            CourseLength::from_long(record.is_long_course),
            kind,
            weeks,
        ))
    }
}

impl From<&Entry> for EntryRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            course_name: entry.name().to_string(),
            enable_notification: entry.notifications_enabled(),
            contents: entry.contents().iter().map(ContentRecord::from).collect(),
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = ScheduleError;

    fn try_from(record: EntryRecord) -> ScheduleResult<Self> {
        let mut entry = Entry::new(record.course_name);
        entry.set_notifications(record.enable_notification);
        for content in record.contents {
            entry.add_content(Content::try_from(content)?)?;
        }
        Ok(entry)
    }
}

impl From<&Schedule> for ScheduleRecord {
    fn from(schedule: &Schedule) -> Self {
        Self {
            year: schedule.year(),
            semester: schedule.semester().ordinal(),
            enable_notification: schedule.notifications_enabled(),
            notification_time: schedule.notification_lead_minutes,
            disable_week_index: schedule.disable_week_index,
            date_map: schedule
                .overrides()
                .iter()
                .map(|(date, value)| (*date, value.as_option()))
                .collect(),
            entries: schedule.entries().iter().map(EntryRecord::from).collect(),
        }
    }
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = ScheduleError;

    fn try_from(record: ScheduleRecord) -> ScheduleResult<Self> {
        let semester = Semester::from_ordinal(record.semester).ok_or_else(|| {
            ScheduleError::Serialization(format!("Invalid semester {}", record.semester))
        })?;

        let mut schedule = Schedule::new(record.year, semester);
        schedule.notification_lead_minutes = record.notification_time;
        schedule.disable_week_index = record.disable_week_index;
        for (date, value) in record.date_map {
            schedule.set_override(date, DateOverride::from_option(value));
        }
        for entry in record.entries {
            schedule.add_entry(Entry::try_from(entry)?)?;
        }
        Ok(schedule)
    }
}

/// Parse JSON, naming the path of the first offending field.
fn parse_with_path<T: DeserializeOwned>(json: &str) -> ScheduleResult<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        ScheduleError::Serialization(format!("{} at '{}'", err.inner(), err.path()))
    })
}

impl EntryRecord {
    pub fn from_json_str(json: &str) -> ScheduleResult<Self> {
        parse_with_path(json)
    }
}

impl ScheduleRecord {
    pub fn from_json_str(json: &str) -> ScheduleResult<Self> {
        parse_with_path(json)
    }

    pub fn to_json_string(&self) -> ScheduleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScheduleError::Serialization(e.to_string()))
    }
}

/// Serialize a schedule to pretty JSON.
pub fn to_json(schedule: &Schedule) -> ScheduleResult<String> {
    ScheduleRecord::from(schedule).to_json_string()
}

/// Rebuild a schedule from JSON written by [`to_json`].
pub fn from_json(json: &str) -> ScheduleResult<Schedule> {
    Schedule::try_from(ScheduleRecord::from_json_str(json)?)
}

/// Serialize a single course, for sharing one entry between schedules.
pub fn entry_to_json(entry: &Entry) -> ScheduleResult<String> {
    serde_json::to_string_pretty(&EntryRecord::from(entry))
        .map_err(|e| ScheduleError::Serialization(e.to_string()))
}

/// Rebuild a single course written by [`entry_to_json`].
pub fn entry_from_json(json: &str) -> ScheduleResult<Entry> {
    Entry::try_from(EntryRecord::from_json_str(json)?)
}
