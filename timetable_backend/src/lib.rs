//! Timetable week-expression parser and calendar projector.
//!
//! Reads a university timetable grid whose cells encode "which weeks, which
//! teacher, which room" in a compact notation, builds a [`core::Schedule`],
//! and projects it into dated calendar events.
//!
//! ```
//! use timetable_rust::config::Region;
//! use timetable_rust::core::domain::{Content, ContentKind, CourseLength, CoursePeriod, Semester};
//! use timetable_rust::core::Schedule;
//! use timetable_rust::services::project_calendar;
//! use chrono::Weekday;
//!
//! let profile = Region::Harbin.profile();
//! let mut schedule = Schedule::new(2021, Semester::Spring);
//! let content = Content::from_expression(
//!     "高等数学",
//!     Weekday::Wed,
//!     CoursePeriod::C34,
//!     CourseLength::Single,
//!     ContentKind::Standard,
//!     "张三[1-2]李四[3-4]H304",
//!     profile,
//! )?;
//! schedule.entry_or_insert("高等数学").add_content(content)?;
//!
//! let events = project_calendar(&schedule, profile)?;
//! assert_eq!(events.len(), 8);
//! # Ok::<(), timetable_rust::ScheduleError>(())
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod services;
pub mod time;

pub use error::{ScheduleError, ScheduleResult};
