//! Course model: per-week cells, weekly contents, course entries and the
//! schedule that owns them.

pub mod domain;
pub mod schedule;

pub use domain::{Cell, Content, ContentKind, CourseLength, CoursePeriod, Semester, WeekMap};
pub use schedule::{DateOverride, Entry, Schedule, DEFAULT_NOTIFICATION_LEAD_MINUTES};
