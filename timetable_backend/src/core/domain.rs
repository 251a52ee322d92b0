//! Domain models for course occurrences.
//!
//! This module provides the leaf data structures of a timetable: the per-week
//! [`Cell`], the fixed daily [`CoursePeriod`] slots, the [`ContentKind`] and
//! [`CourseLength`] of a class, the [`Semester`] enum, and [`Content`], which
//! holds one weekly slot of a course together with its week map.

use chrono::{Duration, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::RegionProfile;
use crate::error::{ScheduleError, ScheduleResult};
use crate::parsing::assembler::assemble_weeks;

/// Mapping from week number (starting at 1) to the class held that week.
pub type WeekMap = BTreeMap<u32, Cell>;

/// What is taught in one week of a slot: course name, teacher and room.
///
/// An all-empty cell means "no class".
///
/// # Examples
///
/// ```
/// use timetable_rust::core::domain::Cell;
///
/// let cell = Cell::new("高等数学", "张三", "H304");
/// assert_eq!(cell, Cell::new("高等数学", "张三", "H304"));
/// assert!(Cell::default().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub name: String,
    pub teacher: String,
    pub room: String,
}

impl Cell {
    pub fn new(name: impl Into<String>, teacher: impl Into<String>, room: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            teacher: teacher.into(),
            room: room.into(),
        }
    }

    /// Returns `true` for the "no class" cell.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.teacher.is_empty() && self.room.is_empty()
    }
}

/// One of the six fixed daily time slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CoursePeriod {
    /// Noon slot
    Noon = 0,
    /// Morning, periods 1-2
    C12 = 1,
    /// Morning, periods 3-4
    C34 = 2,
    /// Afternoon, periods 5-6
    C56 = 3,
    /// Afternoon, periods 7-8
    C78 = 4,
    /// Evening, periods 9-10
    C9A = 5,
}

impl CoursePeriod {
    pub const ALL: [CoursePeriod; 6] = [
        CoursePeriod::Noon,
        CoursePeriod::C12,
        CoursePeriod::C34,
        CoursePeriod::C56,
        CoursePeriod::C78,
        CoursePeriod::C9A,
    ];

    /// Position in the region's start-time table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Name printed on the timetable for this slot.
    pub fn friendly_name(self) -> &'static str {
        match self {
            CoursePeriod::Noon => "中午",
            CoursePeriod::C12 => "一二节",
            CoursePeriod::C34 => "三四节",
            CoursePeriod::C56 => "五六节",
            CoursePeriod::C78 => "七八节",
            CoursePeriod::C9A => "晚上",
        }
    }
}

impl TryFrom<u8> for CoursePeriod {
    type Error = ScheduleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CoursePeriod::ALL
            .get(value as usize)
            .copied()
            .ok_or(ScheduleError::UnknownPeriod(value))
    }
}

impl fmt::Display for CoursePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}

/// Kind of class held in a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    #[default]
    Standard = 0,
    Lab = 1,
    Exam = 2,
}

impl ContentKind {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(ContentKind::Standard),
            1 => Some(ContentKind::Lab),
            2 => Some(ContentKind::Exam),
            _ => None,
        }
    }

    /// Marker appended to the course name in calendar summaries.
    pub fn summary_suffix(self) -> &'static str {
        match self {
            ContentKind::Standard => "",
            ContentKind::Lab => "(实验)",
            ContentKind::Exam => "(考试)",
        }
    }
}

/// Length of a class: a single period pair or a merged double slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CourseLength {
    #[default]
    Single,
    Double,
}

impl CourseLength {
    pub const SINGLE_MINUTES: i64 = 90;
    pub const DOUBLE_MINUTES: i64 = 210;

    pub fn from_long(is_long: bool) -> Self {
        if is_long {
            CourseLength::Double
        } else {
            CourseLength::Single
        }
    }

    pub fn is_long(self) -> bool {
        self == CourseLength::Double
    }

    pub fn minutes(self) -> i64 {
        match self {
            CourseLength::Single => Self::SINGLE_MINUTES,
            CourseLength::Double => Self::DOUBLE_MINUTES,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::minutes(self.minutes())
    }
}

/// Semester of the academic year, with fixed ordinals used to index the
/// region's semester start table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Semester {
    Spring = 0,
    Summer = 1,
    #[default]
    Autumn = 2,
}

impl Semester {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(value: u8) -> Option<Self> {
        match value {
            0 => Some(Semester::Spring),
            1 => Some(Semester::Summer),
            2 => Some(Semester::Autumn),
            _ => None,
        }
    }

    /// Semester named by the fifth character of a timetable header.
    ///
    /// `春` is spring, `夏` is summer, anything else falls back to autumn.
    pub fn from_header_char(c: char) -> Self {
        match c {
            '春' => Semester::Spring,
            '夏' => Semester::Summer,
            _ => Semester::Autumn,
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Semester::Spring => "Spring",
            Semester::Summer => "Summer",
            Semester::Autumn => "Autumn",
        };
        f.write_str(name)
    }
}

/// One weekly slot of a course: day, period, kind and length, plus the
/// week map saying who teaches where in each week the slot is held.
///
/// Day, period and kind are fixed at construction. The week map can grow
/// when further expressions for the same slot are merged in; on overlapping
/// weeks the later expression wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    name: String,
    day: Weekday,
    period: CoursePeriod,
    kind: ContentKind,
    length: CourseLength,
    weeks: WeekMap,
}

impl Content {
    /// Build a content by parsing a raw week expression with the given profile.
    ///
    /// # Errors
    ///
    /// Fails with a classification error when a unit of the expression is
    /// neither teacher, week range nor room, and with a range error when a
    /// week range cannot be expanded.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Weekday;
    /// use timetable_rust::config::Region;
    /// use timetable_rust::core::domain::{Content, ContentKind, CourseLength, CoursePeriod};
    ///
    /// let content = Content::from_expression(
    ///     "高等数学",
    ///     Weekday::Wed,
    ///     CoursePeriod::C34,
    ///     CourseLength::Single,
    ///     ContentKind::Standard,
    ///     "张三[1-2]李四[3-4]H304",
    ///     Region::Harbin.profile(),
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(content.max_week(), Some(4));
    /// assert_eq!(content.slice(3).teacher, "李四");
    /// assert_eq!(content.slice(1).room, "H304");
    /// ```
    pub fn from_expression(
        name: &str,
        day: Weekday,
        period: CoursePeriod,
        length: CourseLength,
        kind: ContentKind,
        expression: &str,
        profile: &RegionProfile,
    ) -> ScheduleResult<Self> {
        let weeks = assemble_weeks(name, expression, profile)?;
        Ok(Self::from_weeks(name, day, period, length, kind, weeks))
    }

    /// Build a content from an already assembled week map.
    pub fn from_weeks(
        name: &str,
        day: Weekday,
        period: CoursePeriod,
        length: CourseLength,
        kind: ContentKind,
        weeks: WeekMap,
    ) -> Self {
        Self {
            name: name.to_string(),
            day,
            period,
            kind,
            length,
            weeks,
        }
    }

    /// Parse another expression for this slot into the week map.
    ///
    /// Weeks already present are overwritten by the new expression.
    pub fn merge_expression(&mut self, expression: &str, profile: &RegionProfile) -> ScheduleResult<()> {
        let weeks = assemble_weeks(&self.name, expression, profile)?;
        self.merge_weeks(weeks);
        Ok(())
    }

    pub fn merge_weeks(&mut self, weeks: WeekMap) {
        self.weeks.extend(weeks);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn day(&self) -> Weekday {
        self.day
    }

    pub fn period(&self) -> CoursePeriod {
        self.period
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    pub fn length(&self) -> CourseLength {
        self.length
    }

    pub fn is_long(&self) -> bool {
        self.length.is_long()
    }

    pub fn set_long(&mut self, is_long: bool) {
        self.length = CourseLength::from_long(is_long);
    }

    pub fn duration(&self) -> Duration {
        self.length.duration()
    }

    /// Key ordering the contents of an entry: `day * 10 + period`, with the
    /// day counted from Sunday.
    pub fn sort_key(&self) -> u32 {
        self.day.num_days_from_sunday() * 10 + self.period.ordinal() as u32
    }

    /// Last week in which this slot is held, `None` for an empty week map.
    pub fn max_week(&self) -> Option<u32> {
        self.weeks.keys().next_back().copied()
    }

    /// Class held in the given week, or an empty cell when there is none.
    pub fn slice(&self, week: u32) -> Cell {
        self.weeks.get(&week).cloned().unwrap_or_default()
    }

    /// Weeks with a class, in ascending order.
    pub fn weeks(&self) -> impl Iterator<Item = (u32, &Cell)> + '_ {
        self.weeks.iter().map(|(week, cell)| (*week, cell))
    }

    pub fn week_map(&self) -> &WeekMap {
        &self.weeks
    }

    pub fn into_week_map(self) -> WeekMap {
        self.weeks
    }

    /// Returns `true` when the two contents occupy the same weekly slot.
    pub fn same_slot(&self, other: &Content) -> bool {
        self.day == other.day
            && self.period == other.period
            && self.kind == other.kind
            && self.length == other.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weeks(entries: &[(u32, &str, &str)]) -> WeekMap {
        entries
            .iter()
            .map(|(week, teacher, room)| (*week, Cell::new("线性代数", *teacher, *room)))
            .collect()
    }

    #[test]
    fn test_cell_equality_requires_all_fields() {
        let a = Cell::new("线性代数", "王五", "H201");
        assert_eq!(a, Cell::new("线性代数", "王五", "H201"));
        assert_ne!(a, Cell::new("线性代数", "王五", "H202"));
        assert_ne!(a, Cell::new("线性代数", "赵六", "H201"));
        assert!(!a.is_empty());
    }

    #[test]
    fn test_course_period_ordinals() {
        assert_eq!(CoursePeriod::try_from(0).unwrap(), CoursePeriod::Noon);
        assert_eq!(CoursePeriod::try_from(5).unwrap(), CoursePeriod::C9A);
        assert!(matches!(
            CoursePeriod::try_from(6),
            Err(ScheduleError::UnknownPeriod(6))
        ));
        assert_eq!(CoursePeriod::C56.friendly_name(), "五六节");
        assert_eq!(CoursePeriod::C78.to_string(), "七八节");
    }

    #[test]
    fn test_course_length_durations() {
        assert_eq!(CourseLength::Single.duration(), Duration::minutes(90));
        assert_eq!(CourseLength::Double.duration(), Duration::minutes(210));
        assert!(CourseLength::from_long(true).is_long());
        assert!(!CourseLength::from_long(false).is_long());
    }

    #[test]
    fn test_semester_from_header_char() {
        assert_eq!(Semester::from_header_char('春'), Semester::Spring);
        assert_eq!(Semester::from_header_char('夏'), Semester::Summer);
        assert_eq!(Semester::from_header_char('秋'), Semester::Autumn);
        assert_eq!(Semester::from_header_char('x'), Semester::Autumn);
        assert_eq!(Semester::Summer.ordinal(), 1);
        assert_eq!(Semester::from_ordinal(2), Some(Semester::Autumn));
        assert_eq!(Semester::from_ordinal(3), None);
    }

    #[test]
    fn test_content_kind_suffixes() {
        assert_eq!(ContentKind::Standard.summary_suffix(), "");
        assert_eq!(ContentKind::Lab.summary_suffix(), "(实验)");
        assert_eq!(ContentKind::Exam.summary_suffix(), "(考试)");
        assert_eq!(ContentKind::from_ordinal(1), Some(ContentKind::Lab));
        assert_eq!(ContentKind::from_ordinal(9), None);
    }

    #[test]
    fn test_content_slice_and_max_week() {
        let content = Content::from_weeks(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            weeks(&[(2, "王五", "H201"), (9, "王五", "H202")]),
        );

        assert_eq!(content.max_week(), Some(9));
        assert_eq!(content.slice(9).room, "H202");
        assert!(content.slice(3).is_empty());
        assert_eq!(content.weeks().map(|(w, _)| w).collect::<Vec<_>>(), vec![2, 9]);
    }

    #[test]
    fn test_empty_content_has_no_max_week() {
        let content = Content::from_weeks(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            WeekMap::new(),
        );
        assert_eq!(content.max_week(), None);
    }

    #[test]
    fn test_sort_key_counts_days_from_sunday() {
        let sunday = Content::from_weeks(
            "线性代数",
            Weekday::Sun,
            CoursePeriod::C9A,
            CourseLength::Single,
            ContentKind::Standard,
            WeekMap::new(),
        );
        let monday = Content::from_weeks(
            "线性代数",
            Weekday::Mon,
            CoursePeriod::Noon,
            CourseLength::Single,
            ContentKind::Standard,
            WeekMap::new(),
        );
        assert_eq!(sunday.sort_key(), 5);
        assert_eq!(monday.sort_key(), 10);
    }

    #[test]
    fn test_merge_weeks_later_wins() {
        let mut content = Content::from_weeks(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            weeks(&[(1, "王五", "H201"), (2, "王五", "H201")]),
        );
        content.merge_weeks(weeks(&[(2, "赵六", "H305"), (3, "赵六", "H305")]));

        assert_eq!(content.slice(1).teacher, "王五");
        assert_eq!(content.slice(2).teacher, "赵六");
        assert_eq!(content.max_week(), Some(3));
    }

    #[test]
    fn test_merge_expression_later_expression_wins() {
        let profile = crate::config::Region::Harbin.profile();
        let mut content = Content::from_expression(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            "张三[1-4]H304",
            profile,
        )
        .unwrap();
        content.merge_expression("李四[3-6]H305", profile).unwrap();

        assert_eq!(content.slice(2), Cell::new("线性代数", "张三", "H304"));
        assert_eq!(content.slice(3), Cell::new("线性代数", "李四", "H305"));
        assert_eq!(content.slice(4), Cell::new("线性代数", "李四", "H305"));
        assert_eq!(content.max_week(), Some(6));
    }

    #[test]
    fn test_merge_expression_keeps_weeks_on_error() {
        let profile = crate::config::Region::Harbin.profile();
        let mut content = Content::from_expression(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            "张三[1-2]H304",
            profile,
        )
        .unwrap();

        let err = content.merge_expression("李四[1-999]H305", profile).unwrap_err();
        assert!(matches!(err, ScheduleError::Range(_)));
        assert_eq!(content.weeks().count(), 2);
        assert_eq!(content.slice(1).teacher, "张三");
    }

    #[test]
    fn test_set_long_switches_duration() {
        let mut content = Content::from_weeks(
            "线性代数",
            Weekday::Tue,
            CoursePeriod::C12,
            CourseLength::Single,
            ContentKind::Standard,
            WeekMap::new(),
        );
        content.set_long(true);
        assert!(content.is_long());
        assert_eq!(content.duration(), Duration::minutes(210));
    }
}
