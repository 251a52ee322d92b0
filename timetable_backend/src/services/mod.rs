//! Service layer turning schedules into calendars.
//!
//! [`calendar`] projects a schedule into dated events; [`ics`] renders those
//! events as an iCalendar document.

pub mod calendar;
pub mod ics;

pub use calendar::{project_calendar, CalendarEvent, EventKind, Recurrence, Reminder};
pub use ics::render_ics;
