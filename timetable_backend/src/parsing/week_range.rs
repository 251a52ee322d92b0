//! Week-range expansion.
//!
//! A week-range token is one or more `|`-separated segments, each a single
//! week or an `a-b` span, optionally tagged `单` (odd) or `双` (even). The
//! whole token may end with one more parity marker that filters the combined
//! result. Output keeps segment order and is neither sorted nor deduplicated.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::RegionProfile;
use crate::error::{ScheduleError, ScheduleResult};
use crate::time::MAX_WEEK;

static WEEK_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("week number pattern is valid"));

/// Odd or even weeks only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub const ODD_MARKER: char = '单';
    pub const EVEN_MARKER: char = '双';

    pub fn from_marker(c: char) -> Option<Self> {
        match c {
            Self::ODD_MARKER => Some(Parity::Odd),
            Self::EVEN_MARKER => Some(Parity::Even),
            _ => None,
        }
    }

    pub fn accepts(self, week: u32) -> bool {
        match self {
            Parity::Odd => week % 2 == 1,
            Parity::Even => week % 2 == 0,
        }
    }
}

fn segment_numbers(segment: &str, token: &str) -> ScheduleResult<Vec<u32>> {
    WEEK_NUMBER
        .find_iter(segment)
        .map(|number| {
            let week: u32 = number.as_str().parse().map_err(|_| {
                ScheduleError::range(format!("Week number out of range in '{}'", token))
            })?;
            if week == 0 {
                return Err(ScheduleError::range(format!(
                    "Week numbers start at 1 in '{}'",
                    token
                )));
            }
            if week > MAX_WEEK {
                return Err(ScheduleError::range(format!(
                    "Week {} is past the last teaching week {} in '{}'",
                    week, MAX_WEEK, token
                )));
            }
            Ok(week)
        })
        .collect()
}

/// Expand a week-range token into week numbers.
///
/// # Example
/// ```
/// use timetable_rust::config::Region;
/// use timetable_rust::parsing::week_range::expand_week_range;
///
/// let weeks = expand_week_range("[1-6|10]单", Region::Harbin.profile()).unwrap();
/// assert_eq!(weeks, vec![1, 3, 5]);
/// ```
///
/// # Errors
/// `Range` when the token does not match the profile's week-range pattern,
/// or names week 0 or a week past [`MAX_WEEK`].
pub fn expand_week_range(token: &str, profile: &RegionProfile) -> ScheduleResult<Vec<u32>> {
    if !profile.week_range_regex().is_match(token) {
        return Err(ScheduleError::range(format!(
            "'{}' is not a week range",
            token
        )));
    }

    let mut weeks = Vec::new();
    for segment in token.split('|') {
        let keep_odd = !segment.contains(Parity::EVEN_MARKER);
        let keep_even = !segment.contains(Parity::ODD_MARKER);

        match segment_numbers(segment, token)?.as_slice() {
            [] => continue,
            [week] => weeks.push(*week),
            [first, last, ..] => weeks.extend(
                (*first..=*last).filter(|week| {
                    (keep_odd && Parity::Odd.accepts(*week))
                        || (keep_even && Parity::Even.accepts(*week))
                }),
            ),
        }
    }

    if let Some(parity) = token.chars().next_back().and_then(Parity::from_marker) {
        weeks.retain(|week| parity.accepts(*week));
    }

    Ok(weeks)
}
