//! Occurrence assembly: joins teachers and rooms to the week ranges of one
//! cell expression.
//!
//! A teacher applies to every week range after it until the next teacher.
//! A room closes every week range still waiting for one, however many
//! teachers came in between. Ranges never followed by a room get
//! [`PENDING_ROOM`]. When two ranges share a week, the later one wins.

use log::debug;

use crate::config::RegionProfile;
use crate::core::domain::{Cell, WeekMap};
use crate::error::{ScheduleError, ScheduleResult};
use crate::parsing::expression::{tokenize, Token};
use crate::parsing::week_range::expand_week_range;

/// Room label for week ranges no room follows.
pub const PENDING_ROOM: &str = "<地点待定>";

#[derive(Debug)]
struct RangeSlot<'a> {
    token: &'a str,
    teacher: &'a str,
    room: Option<&'a str>,
}

/// Parse a raw week expression into a week map for the named course.
///
/// The expression is cleaned with the profile's cleanup rules first.
///
/// # Errors
/// `Classification` for a unit that is neither teacher, week range nor room;
/// `Range` for a week range that cannot be expanded.
pub fn assemble_weeks(name: &str, expression: &str, profile: &RegionProfile) -> ScheduleResult<WeekMap> {
    let cleaned = profile.clean_expression(expression);
    debug!("Assembling '{}' for {}", cleaned, name);

    let mut current_teacher = "";
    let mut ranges: Vec<RangeSlot<'_>> = Vec::new();
    let mut pending: Vec<usize> = Vec::new();

    for token in tokenize(&cleaned, profile) {
        match token {
            Token::Teacher(teacher) => current_teacher = teacher,
            Token::WeekRange(range) => {
                pending.push(ranges.len());
                ranges.push(RangeSlot {
                    token: range,
                    teacher: current_teacher,
                    room: None,
                });
            }
            Token::Room(room) => {
                while let Some(index) = pending.pop() {
                    ranges[index].room = Some(room);
                }
            }
            Token::Unknown(unit) => {
                return Err(ScheduleError::Classification {
                    unit: unit.to_string(),
                    expression: cleaned.clone(),
                })
            }
        }
    }

    let mut weeks = WeekMap::new();
    for slot in &ranges {
        let room = slot.room.unwrap_or(PENDING_ROOM);
        for week in expand_week_range(slot.token, profile)? {
            weeks.insert(week, Cell::new(name, slot.teacher, room));
        }
    }

    Ok(weeks)
}
