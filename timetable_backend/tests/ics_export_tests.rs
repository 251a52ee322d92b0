//! Checks that exported calendars parse as iCalendar.

use ical::IcalParser;
use std::io::BufReader;
use timetable_rust::config::Region;
use timetable_rust::parsing::{import_schedule, TimetableGrid};
use timetable_rust::services::{project_calendar, render_ics};

fn property<'a>(event: &'a ical::parser::ical::component::IcalEvent, name: &str) -> Option<&'a str> {
    event
        .properties
        .iter()
        .find(|p| p.name == name)
        .and_then(|p| p.value.as_deref())
}

fn exported_calendar() -> String {
    let profile = Region::Harbin.profile();
    let mut grid = TimetableGrid::default();
    grid.set_cell(0, 0, "2021春季学期");
    grid.set_cell(3, 4, "大学物理\n张三[1-2]李四[3-4]H304");
    let mut schedule = import_schedule(&grid, profile).unwrap();
    schedule.set_notifications(true);

    let events = project_calendar(&schedule, profile).unwrap();
    render_ics(&events, "2021春季学期")
}

#[test]
fn test_export_parses_with_ical() {
    let ics = exported_calendar();
    let mut parser = IcalParser::new(BufReader::new(ics.as_bytes()));
    let calendar = parser.next().expect("one calendar").expect("valid calendar");

    assert_eq!(calendar.events.len(), 8);

    let marker = &calendar.events[0];
    assert_eq!(property(marker, "SUMMARY"), Some("第1周"));
    assert_eq!(property(marker, "RRULE"), Some("FREQ=DAILY;COUNT=7"));
    assert!(marker.alarms.is_empty());

    let class = &calendar.events[4];
    assert_eq!(property(class, "SUMMARY"), Some("大学物理 by 张三"));
    assert_eq!(property(class, "DTSTART"), Some("20210310T100000"));
    assert_eq!(property(class, "DURATION"), Some("PT1H30M"));
    assert_eq!(class.alarms.len(), 1);
}

#[test]
fn test_uids_are_unique() {
    let ics = exported_calendar();
    let mut parser = IcalParser::new(BufReader::new(ics.as_bytes()));
    let calendar = parser.next().unwrap().unwrap();

    let mut uids: Vec<_> = calendar
        .events
        .iter()
        .filter_map(|e| property(e, "UID"))
        .collect();
    uids.sort_unstable();
    uids.dedup();
    assert_eq!(uids.len(), calendar.events.len());
}
