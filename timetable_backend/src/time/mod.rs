//! Date arithmetic for teaching weeks.

pub mod semester;

pub use semester::{
    MAX_WEEK, day_offset, occurrence_date, semester_index, semester_start, week_start,
    weekday_from_sunday_index,
};
