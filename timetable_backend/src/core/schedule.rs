//! Course entries and the schedule that owns them.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::config::RegionProfile;
use crate::core::domain::{Content, Semester};
use crate::error::{ScheduleError, ScheduleResult};
use crate::time::semester::semester_start;

/// Minutes between a reminder and the class it announces, unless configured.
pub const DEFAULT_NOTIFICATION_LEAD_MINUTES: u32 = 25;

/// All weekly slots of one course, kept in `day * 10 + period` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: String,
    notifications_enabled: bool,
    contents: Vec<Content>,
}

impl Entry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            notifications_enabled: false,
            contents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        self.notifications_enabled = enabled;
    }

    /// Contents in sort order; equal keys keep insertion order.
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> impl Iterator<Item = &mut Content> {
        self.contents.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Insert a content after every content whose sort key is not greater.
    ///
    /// # Errors
    ///
    /// `EntryMismatch` when the content belongs to another course.
    pub fn add_content(&mut self, content: Content) -> ScheduleResult<()> {
        if content.name() != self.name {
            return Err(ScheduleError::EntryMismatch {
                entry: self.name.clone(),
                content: content.name().to_string(),
            });
        }

        let key = content.sort_key();
        let position = self.contents.partition_point(|existing| existing.sort_key() <= key);
        self.contents.insert(position, content);
        Ok(())
    }

    /// Merge into the content occupying the same slot, or add a new one.
    pub fn add_or_merge_content(&mut self, content: Content) -> ScheduleResult<()> {
        let slot = self
            .contents
            .iter()
            .position(|existing| existing.same_slot(&content) && existing.name() == content.name());

        match slot {
            Some(index) => {
                self.contents[index].merge_weeks(content.into_week_map());
                Ok(())
            }
            None => self.add_content(content),
        }
    }

    pub fn remove_content(&mut self, index: usize) -> Option<Content> {
        if index < self.contents.len() {
            Some(self.contents.remove(index))
        } else {
            None
        }
    }

    /// Last week any of the contents is held.
    pub fn max_week(&self) -> Option<u32> {
        self.contents.iter().filter_map(Content::max_week).max()
    }
}

/// Replacement for one computed occurrence date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOverride {
    /// Hold the occurrence on another date instead.
    Moved(NaiveDate),
    /// Drop the occurrence.
    Suppressed,
}

impl DateOverride {
    pub fn from_option(date: Option<NaiveDate>) -> Self {
        match date {
            Some(date) => DateOverride::Moved(date),
            None => DateOverride::Suppressed,
        }
    }

    pub fn as_option(self) -> Option<NaiveDate> {
        match self {
            DateOverride::Moved(date) => Some(date),
            DateOverride::Suppressed => None,
        }
    }
}

/// A semester timetable: course entries keyed by name plus projection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    year: i32,
    semester: Semester,
    entries: Vec<Entry>,
    pub notification_lead_minutes: u32,
    pub disable_week_index: bool,
    overrides: BTreeMap<NaiveDate, DateOverride>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(0, Semester::default())
    }
}

impl Schedule {
    pub fn new(year: i32, semester: Semester) -> Self {
        Self {
            year,
            semester,
            entries: Vec::new(),
            notification_lead_minutes: DEFAULT_NOTIFICATION_LEAD_MINUTES,
            disable_week_index: false,
            overrides: BTreeMap::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn semester(&self) -> Semester {
        self.semester
    }

    pub fn set_term(&mut self, year: i32, semester: Semester) {
        self.year = year;
        self.semester = semester;
    }

    /// First day of the semester according to the profile's start table.
    pub fn semester_start(&self, profile: &RegionProfile) -> ScheduleResult<NaiveDate> {
        semester_start(profile, self.year, self.semester)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entry_mut(&mut self, name: &str) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.name == name)
    }

    /// Entry for the course, created empty on first use.
    pub fn entry_or_insert(&mut self, name: &str) -> &mut Entry {
        let index = match self.position(name) {
            Some(index) => index,
            None => {
                self.entries.push(Entry::new(name));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    pub fn add_entry(&mut self, entry: Entry) -> ScheduleResult<()> {
        if self.contains(&entry.name) {
            return Err(ScheduleError::DuplicateEntry(entry.name));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn remove_entry(&mut self, name: &str) -> Option<Entry> {
        self.position(name).map(|index| self.entries.remove(index))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Last week of any course, `None` when nothing is scheduled.
    pub fn max_week(&self) -> Option<u32> {
        self.entries.iter().filter_map(Entry::max_week).max()
    }

    /// `Some(flag)` when every entry agrees, `None` when mixed or empty.
    pub fn notifications_enabled(&self) -> Option<bool> {
        let mut flags = self.entries.iter().map(Entry::notifications_enabled);
        let first = flags.next()?;
        flags.all(|flag| flag == first).then_some(first)
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        for entry in &mut self.entries {
            entry.set_notifications(enabled);
        }
    }

    /// Hold every occurrence computed for `from` on `to` instead.
    pub fn move_occurrence(&mut self, from: NaiveDate, to: NaiveDate) {
        self.overrides.insert(from, DateOverride::Moved(to));
    }

    /// Drop every occurrence computed for `date`.
    pub fn suppress_occurrence(&mut self, date: NaiveDate) {
        self.overrides.insert(date, DateOverride::Suppressed);
    }

    pub fn set_override(&mut self, date: NaiveDate, value: DateOverride) {
        self.overrides.insert(date, value);
    }

    pub fn clear_override(&mut self, date: NaiveDate) -> Option<DateOverride> {
        self.overrides.remove(&date)
    }

    pub fn override_for(&self, date: NaiveDate) -> Option<DateOverride> {
        self.overrides.get(&date).copied()
    }

    pub fn overrides(&self) -> &BTreeMap<NaiveDate, DateOverride> {
        &self.overrides
    }
}
