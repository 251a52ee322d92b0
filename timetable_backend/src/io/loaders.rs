use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use crate::config::RegionProfile;
use crate::core::schedule::Schedule;
use crate::io::record;
use crate::parsing::grid::{import_schedule, TimetableGrid};
use crate::services::calendar::project_calendar;
use crate::services::ics::render_ics;

/// Represents the source type of schedule data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleSourceType {
    /// Persisted schedule record (JSON object)
    Record,
    /// Raw timetable grid (JSON array of rows)
    Grid,
}

/// Result of loading schedule data
#[derive(Debug)]
pub struct ScheduleLoadResult {
    pub schedule: Schedule,
    pub source_type: ScheduleSourceType,
    pub num_entries: usize,
}

impl ScheduleLoadResult {
    pub fn new(schedule: Schedule, source_type: ScheduleSourceType) -> Self {
        let num_entries = schedule.len();
        Self {
            schedule,
            source_type,
            num_entries,
        }
    }
}

/// Unified interface for loading schedules from records or timetable grids
pub struct ScheduleLoader;

impl ScheduleLoader {
    /// Load a schedule from a `.json` file, telling a grid from a record by
    /// its top-level value.
    pub fn load_from_file(path: &Path, profile: &RegionProfile) -> Result<ScheduleLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        if !extension.eq_ignore_ascii_case("json") {
            anyhow::bail!("Unsupported file format: {}", extension);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::load_from_str(&content, profile)
    }

    /// Load a schedule from JSON text, either a record or a grid.
    pub fn load_from_str(content: &str, profile: &RegionProfile) -> Result<ScheduleLoadResult> {
        if content.trim_start().starts_with('[') {
            Self::import_grid_str(content, profile)
        } else {
            Self::load_record_str(content)
        }
    }

    /// Load a persisted schedule record from a JSON file
    pub fn load_record(path: &Path) -> Result<ScheduleLoadResult> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::load_record_str(&content)
    }

    /// Load a persisted schedule record from a JSON string
    pub fn load_record_str(json_str: &str) -> Result<ScheduleLoadResult> {
        let schedule = record::from_json(json_str).context("Failed to parse schedule record")?;
        Ok(ScheduleLoadResult::new(schedule, ScheduleSourceType::Record))
    }

    /// Import a timetable grid stored as a JSON array of rows
    pub fn import_grid(path: &Path, profile: &RegionProfile) -> Result<ScheduleLoadResult> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::import_grid_str(&content, profile)
    }

    /// Import a timetable grid from a JSON string
    pub fn import_grid_str(json_str: &str, profile: &RegionProfile) -> Result<ScheduleLoadResult> {
        let grid: TimetableGrid =
            serde_json::from_str(json_str).context("Failed to parse timetable grid")?;
        let schedule = import_schedule(&grid, profile)
            .with_context(|| format!("Failed to import timetable grid for region {}", profile.name()))?;
        Ok(ScheduleLoadResult::new(schedule, ScheduleSourceType::Grid))
    }

    /// Save a schedule record as pretty JSON
    pub fn save_record(schedule: &Schedule, path: &Path) -> Result<()> {
        let json = record::to_json(schedule).context("Failed to serialize schedule")?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// Load region profiles from TOML files
pub struct RegionLoader;

impl RegionLoader {
    pub fn load_from_file(path: &Path) -> Result<RegionProfile> {
        RegionProfile::from_file(path)
            .with_context(|| format!("Failed to load region profile {}", path.display()))
    }
}

/// Project a schedule and write it as an `.ics` file.
///
/// Returns the number of events written.
pub fn write_calendar(
    schedule: &Schedule,
    profile: &RegionProfile,
    path: &Path,
    calendar_name: &str,
) -> Result<usize> {
    let events = project_calendar(schedule, profile).context("Failed to project calendar")?;
    fs::write(path, render_ics(&events, calendar_name))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {} events to {}", events.len(), path.display());
    Ok(events.len())
}
