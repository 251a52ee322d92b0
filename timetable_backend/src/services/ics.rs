//! iCalendar (RFC 5545) rendering of projected events.
//!
//! Times are written as floating local times, so the calendar application
//! places them in the user's own zone.

use chrono::{Duration, NaiveDateTime};
use sha2::{Digest, Sha256};

use crate::services::calendar::{CalendarEvent, Recurrence};

const PRODUCT_ID: &str = "-//timetable-rust//Timetable Export//ZH";
const MAX_LINE_OCTETS: usize = 75;

/// Escape a TEXT property value.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Stable identifier of an event.
///
/// # Arguments
/// * `event` - Projected event
///
/// # Returns
/// Hex SHA-256 of summary, start and location, suffixed with a domain.
pub fn event_uid(event: &CalendarEvent) -> String {
    let mut hasher = Sha256::new();
    hasher.update(event.summary.as_bytes());
    hasher.update([0u8]);
    hasher.update(format_date_time(event.start).as_bytes());
    hasher.update([0u8]);
    hasher.update(event.location.as_bytes());
    format!("{}@timetable-rust", hex::encode(hasher.finalize()))
}

fn format_date_time(value: NaiveDateTime) -> String {
    value.format("%Y%m%dT%H%M%S").to_string()
}

/// `PT#H#M` form of a whole-minute duration; zero renders as `PT0S`.
pub fn format_duration(duration: Duration) -> String {
    let minutes = duration.num_minutes();
    if minutes <= 0 {
        return "PT0S".to_string();
    }
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("PT{}M", m),
        (h, 0) => format!("PT{}H", h),
        (h, m) => format!("PT{}H{}M", h, m),
    }
}

/// Push one content line, folded at 75 octets without splitting a character.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            out.push_str("\r\n ");
            width = 1;
        }
        out.push(c);
        width += len;
    }
    out.push_str("\r\n");
}

fn push_event(out: &mut String, event: &CalendarEvent) {
    push_line(out, "BEGIN:VEVENT");
    push_line(out, &format!("UID:{}", event_uid(event)));
    push_line(out, &format!("DTSTAMP:{}Z", format_date_time(event.start)));
    push_line(out, &format!("DTSTART:{}", format_date_time(event.start)));
    push_line(out, &format!("DURATION:{}", format_duration(event.duration)));
    push_line(out, &format!("SUMMARY:{}", escape_text(&event.summary)));
    if !event.location.is_empty() {
        push_line(out, &format!("LOCATION:{}", escape_text(&event.location)));
    }
    if let Some(Recurrence::Daily { count }) = event.recurrence {
        push_line(out, &format!("RRULE:FREQ=DAILY;COUNT={}", count));
    }
    if let Some(reminder) = &event.reminder {
        push_line(out, "BEGIN:VALARM");
        push_line(out, "ACTION:DISPLAY");
        push_line(out, &format!("TRIGGER:-PT{}M", reminder.lead_minutes));
        push_line(out, &format!("DESCRIPTION:{}", escape_text(&reminder.message)));
        push_line(out, "END:VALARM");
    }
    push_line(out, "END:VEVENT");
}

/// Render events as a VCALENDAR document with CRLF line endings.
///
/// `DTSTAMP` repeats the event start so the output is reproducible.
pub fn render_ics(events: &[CalendarEvent], calendar_name: &str) -> String {
    let mut out = String::new();
    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODUCT_ID));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(calendar_name)));
    for event in events {
        push_event(&mut out, event);
    }
    push_line(&mut out, "END:VCALENDAR");
    out
}
