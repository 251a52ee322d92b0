//! Region profile support.
//!
//! A region profile bundles everything that differs between the two campus
//! dialects of the timetable notation: the token patterns, the semester start
//! table, the period start times, the grid offsets and the two text
//! normalisation passes. Profiles are plain data and can be read from TOML;
//! the two built-in campuses are compiled once and shared read-only.

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::domain::CoursePeriod;
use crate::error::{ScheduleError, ScheduleResult};

/// Number of daily periods every profile must provide a start time for.
pub const PERIOD_COUNT: usize = 6;

fn default_base_year() -> i32 {
    2020
}

/// A literal `[from, to]` text replacement, applied in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement(pub String, pub String);

impl Replacement {
    pub fn new(from: &str, to: &str) -> Self {
        Self(from.to_string(), to.to_string())
    }
}

/// Region profile as stored in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    #[serde(default = "default_base_year")]
    pub base_year: i32,
    pub semester_starts: Vec<NaiveDate>,
    pub start_times: Vec<NaiveTime>,
    pub teacher_pattern: String,
    pub week_range_pattern: String,
    pub room_pattern: String,
    pub unit_pattern: String,
    #[serde(default)]
    pub column_offset: usize,
    #[serde(default)]
    pub row_offset: usize,
    pub lab_label: String,
    #[serde(default)]
    pub cleanup_rules: Vec<Replacement>,
    #[serde(default)]
    pub cell_rules: Vec<Replacement>,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("built-in semester start is a valid date")
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("built-in period start is a valid time")
}

/// Cleanup shared by both dialects: parity suffixes, the trailing week
/// marker after a bracket, and both comma styles.
fn common_cleanup_rules() -> Vec<Replacement> {
    vec![
        Replacement::new("单周", "单"),
        Replacement::new("双周", "双"),
        Replacement::new("]周", "]"),
        Replacement::new(", ", "|"),
        Replacement::new("，", "|"),
    ]
}

impl RegionConfig {
    /// Main campus dialect: bare teacher names and rooms, bracketed week ranges.
    pub fn harbin() -> Self {
        Self {
            name: "harbin".to_string(),
            base_year: default_base_year(),
            semester_starts: vec![
                ymd(2020, 2, 24),
                ymd(2020, 6, 29),
                ymd(2020, 9, 7),
                ymd(2021, 3, 8),
                ymd(2021, 7, 12),
                ymd(2021, 9, 6),
            ],
            start_times: vec![hm(12, 30), hm(8, 0), hm(10, 0), hm(13, 45), hm(15, 45), hm(18, 30)],
            teacher_pattern: r"^[\x{4e00}-\x{9fa5}^0-9]{2,4}$|^(\w+\s?)+$".to_string(),
            week_range_pattern: r"^\[(((\d+)|((\d+)-(\d+)))(单|双)?(\|)?)+\](单|双)?$".to_string(),
            room_pattern: r"^([\x{4e00}-\x{9fa5}]+|[A-Z]{1,2})\d{2,5}$".to_string(),
            unit_pattern: concat!(
                r"(([\x{4e00}-\x{9fa5}]+|[A-Z]{1,2})\d{2,5})",
                r"|(\[(((\d+)|((\d+)-(\d+)))(单|双)?(\|)?)+\](单|双)?)",
                r"|([\x{4e00}-\x{9fa5}]{2,4}|(\w+\s?)+)"
            )
            .to_string(),
            column_offset: 2,
            row_offset: 2,
            lab_label: "(实验)".to_string(),
            cleanup_rules: common_cleanup_rules(),
            cell_rules: vec![Replacement::new("周\n", "周")],
        }
    }

    /// Shenzhen campus dialect: every unit is bracketed and week ranges end in `周]`.
    pub fn shenzhen() -> Self {
        Self {
            name: "shenzhen".to_string(),
            base_year: default_base_year(),
            semester_starts: vec![
                ymd(2020, 2, 24),
                ymd(2020, 6, 29),
                ymd(2020, 9, 7),
                ymd(2021, 2, 22),
                ymd(2021, 7, 12),
            ],
            start_times: vec![hm(12, 30), hm(8, 30), hm(10, 30), hm(14, 0), hm(16, 0), hm(18, 30)],
            teacher_pattern: r"^\[[\x{4e00}-\x{9fa5}]{2,4}\]$|\[^(\w+\s?)+\]$".to_string(),
            // `周` is optional because the cleanup pass folds `单周`/`双周` into
            // the bare parity marker.
            week_range_pattern: r"^\[(((\d+)|((\d+)-(\d+)))(单|双)?(\|)?)+周?\]$".to_string(),
            room_pattern: r"^\[([\x{4e00}-\x{9fa5}]+|[A-Z]{1,2})\d{2,5}\]$".to_string(),
            unit_pattern: concat!(
                r"(\[[\x{4e00}-\x{9fa5}^0-9]{2,4}\])",
                r"|(\[^(\w+\s?)+\])",
                r"|(\[(((\d+)|((\d+)-(\d+)))(单|双)?(\|)?)+周?\])",
                r"|(\[([\x{4e00}-\x{9fa5}]+|[A-Z]{1,2})\d{2,5}\])"
            )
            .to_string(),
            column_offset: 1,
            row_offset: 3,
            lab_label: "【实验】".to_string(),
            cleanup_rules: common_cleanup_rules(),
            cell_rules: vec![
                Replacement::new("]\n", "]"),
                Replacement::new("],", "]\n"),
                Replacement::new(",", "|"),
            ],
        }
    }

    /// Parse a region profile from TOML text.
    pub fn from_toml_str(content: &str) -> ScheduleResult<Self> {
        toml::from_str(content).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to parse region config: {}", e))
        })
    }

    /// Load a region profile from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(RegionConfig)` if successful
    /// * `Err(ScheduleError::Configuration)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to read region config: {}", e))
        })?;

        Self::from_toml_str(&content)
    }

    /// Render the profile back to TOML.
    pub fn to_toml_string(&self) -> ScheduleResult<String> {
        toml::to_string(self).map_err(|e| {
            ScheduleError::Configuration(format!("Failed to serialize region config: {}", e))
        })
    }
}

/// A validated region profile with compiled token patterns.
#[derive(Debug, Clone)]
pub struct RegionProfile {
    config: RegionConfig,
    start_times: [NaiveTime; PERIOD_COUNT],
    teacher: Regex,
    week_range: Regex,
    room: Regex,
    unit: Regex,
}

impl RegionProfile {
    /// Validate a configuration and compile its patterns.
    pub fn from_config(config: RegionConfig) -> ScheduleResult<Self> {
        if config.semester_starts.is_empty() {
            return Err(ScheduleError::Configuration(format!(
                "Region '{}' requires at least one semester start date",
                config.name
            )));
        }

        let start_times: [NaiveTime; PERIOD_COUNT] =
            config.start_times.clone().try_into().map_err(|times: Vec<NaiveTime>| {
                ScheduleError::Configuration(format!(
                    "Region '{}' requires exactly {} period start times, found {}",
                    config.name,
                    PERIOD_COUNT,
                    times.len()
                ))
            })?;

        if config.lab_label.is_empty() {
            return Err(ScheduleError::Configuration(format!(
                "Region '{}' requires a non-empty lab_label",
                config.name
            )));
        }

        if let Some(rule) = config
            .cleanup_rules
            .iter()
            .chain(config.cell_rules.iter())
            .find(|rule| rule.0.is_empty())
        {
            return Err(ScheduleError::Configuration(format!(
                "Region '{}' has a replacement rule with an empty source (target '{}')",
                config.name, rule.1
            )));
        }

        Ok(Self {
            teacher: Regex::new(&config.teacher_pattern)?,
            week_range: Regex::new(&config.week_range_pattern)?,
            room: Regex::new(&config.room_pattern)?,
            unit: Regex::new(&config.unit_pattern)?,
            start_times,
            config,
        })
    }

    /// Load and compile a profile from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ScheduleResult<Self> {
        Self::from_config(RegionConfig::from_file(path)?)
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &RegionConfig {
        &self.config
    }

    pub fn base_year(&self) -> i32 {
        self.config.base_year
    }

    pub fn semester_starts(&self) -> &[NaiveDate] {
        &self.config.semester_starts
    }

    /// Time of day at which the given period starts.
    pub fn start_time(&self, period: CoursePeriod) -> NaiveTime {
        self.start_times[period.index()]
    }

    pub fn teacher_regex(&self) -> &Regex {
        &self.teacher
    }

    pub fn week_range_regex(&self) -> &Regex {
        &self.week_range
    }

    pub fn room_regex(&self) -> &Regex {
        &self.room
    }

    /// Compound pattern whose matches are the lexical units of an expression.
    pub fn unit_regex(&self) -> &Regex {
        &self.unit
    }

    pub fn column_offset(&self) -> usize {
        self.config.column_offset
    }

    pub fn row_offset(&self) -> usize {
        self.config.row_offset
    }

    pub fn lab_label(&self) -> &str {
        &self.config.lab_label
    }

    /// Normalise separators and parity suffixes of a raw week expression.
    pub fn clean_expression(&self, source: &str) -> String {
        apply_rules(source, &self.config.cleanup_rules)
    }

    /// Normalise a raw grid cell before it is split into lines.
    pub fn preprocess_cell(&self, origin: &str) -> String {
        apply_rules(origin, &self.config.cell_rules)
    }
}

fn apply_rules(source: &str, rules: &[Replacement]) -> String {
    rules
        .iter()
        .fold(source.to_string(), |text, Replacement(from, to)| text.replace(from.as_str(), to))
}

static HARBIN: Lazy<RegionProfile> = Lazy::new(|| {
    RegionProfile::from_config(RegionConfig::harbin()).expect("built-in Harbin profile is valid")
});

static SHENZHEN: Lazy<RegionProfile> = Lazy::new(|| {
    RegionProfile::from_config(RegionConfig::shenzhen())
        .expect("built-in Shenzhen profile is valid")
});

/// Campus whose timetable dialect is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Harbin,
    Shenzhen,
}

impl Region {
    /// Shared, compiled profile for this campus.
    pub fn profile(self) -> &'static RegionProfile {
        match self {
            Region::Harbin => &HARBIN,
            Region::Shenzhen => &SHENZHEN,
        }
    }
}

impl FromStr for Region {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "harbin" | "hit" | "main" => Ok(Region::Harbin),
            "shenzhen" | "hitsz" | "sz" => Ok(Region::Shenzhen),
            other => Err(ScheduleError::Configuration(format!(
                "Unknown region: {}. Use 'harbin' or 'shenzhen'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_compile() {
        assert_eq!(Region::Harbin.profile().name(), "harbin");
        assert_eq!(Region::Shenzhen.profile().name(), "shenzhen");
        assert_eq!(Region::Harbin.profile().semester_starts().len(), 6);
        assert_eq!(Region::Shenzhen.profile().semester_starts().len(), 5);
    }

    #[test]
    fn test_start_times_by_period() {
        let harbin = Region::Harbin.profile();
        assert_eq!(harbin.start_time(CoursePeriod::Noon), hm(12, 30));
        assert_eq!(harbin.start_time(CoursePeriod::C12), hm(8, 0));
        assert_eq!(harbin.start_time(CoursePeriod::C9A), hm(18, 30));

        let shenzhen = Region::Shenzhen.profile();
        assert_eq!(shenzhen.start_time(CoursePeriod::C34), hm(10, 30));
    }

    #[test]
    fn test_clean_expression_normalises_separators() {
        let harbin = Region::Harbin.profile();
        assert_eq!(harbin.clean_expression("张三[1-8]单周H304"), "张三[1-8]单H304");
        assert_eq!(harbin.clean_expression("[1-4]周"), "[1-4]");
        assert_eq!(harbin.clean_expression("[1-4, 6-8]"), "[1-4|6-8]");
        assert_eq!(harbin.clean_expression("[1-4，6-8]双周"), "[1-4|6-8]双");
    }

    #[test]
    fn test_preprocess_cell_per_dialect() {
        assert_eq!(
            Region::Harbin.profile().preprocess_cell("高数\n张三[1-16]周\nH304"),
            "高数\n张三[1-16]周H304"
        );
        assert_eq!(
            Region::Shenzhen.profile().preprocess_cell("高数\n[张三][1-16周]\n[T101],物理\n[李四][1-8周]"),
            "高数\n[张三][1-16周][T101]\n物理\n[李四][1-8周]"
        );
    }

    #[test]
    fn test_region_from_str() {
        assert_eq!("harbin".parse::<Region>().unwrap(), Region::Harbin);
        assert_eq!(" SZ ".parse::<Region>().unwrap(), Region::Shenzhen);
        assert!("beijing".parse::<Region>().is_err());
    }

    #[test]
    fn test_parse_toml_config() {
        let toml = r#"
name = "custom"
semester_starts = ["2022-02-28", "2022-07-04", "2022-08-29"]
start_times = ["12:30:00", "08:00:00", "10:00:00", "13:45:00", "15:45:00", "18:30:00"]
teacher_pattern = '^[\x{4e00}-\x{9fa5}]{2,4}$'
week_range_pattern = '^\[[0-9|\-单双]+\](单|双)?$'
room_pattern = '^[A-Z]\d{3}$'
unit_pattern = '([A-Z]\d{3})|(\[[0-9|\-单双]+\](单|双)?)|([\x{4e00}-\x{9fa5}]{2,4})'
lab_label = "(实验)"
base_year = 2022
cleanup_rules = [["，", "|"]]
"#;

        let config = RegionConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.name, "custom");
        assert_eq!(config.base_year, 2022);
        assert_eq!(config.column_offset, 0);
        assert_eq!(config.cleanup_rules, vec![Replacement::new("，", "|")]);
        assert!(config.cell_rules.is_empty());

        let profile = RegionProfile::from_config(config).unwrap();
        assert_eq!(profile.semester_starts()[0], ymd(2022, 2, 28));
        assert_eq!(profile.clean_expression("[1，3]"), "[1|3]");
    }

    #[test]
    fn test_requires_six_start_times() {
        let mut config = RegionConfig::harbin();
        config.start_times.pop();
        let err = RegionProfile::from_config(config).unwrap_err();
        assert!(matches!(err, ScheduleError::Configuration(_)));
    }

    #[test]
    fn test_requires_semester_starts() {
        let mut config = RegionConfig::shenzhen();
        config.semester_starts.clear();
        assert!(RegionProfile::from_config(config).is_err());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let mut config = RegionConfig::harbin();
        config.room_pattern = "([A-Z]".to_string();
        let err = RegionProfile::from_config(config).unwrap_err();
        assert!(matches!(err, ScheduleError::Pattern(_)));
    }

    #[test]
    fn test_empty_replacement_source_rejected() {
        let mut config = RegionConfig::harbin();
        config.cleanup_rules.push(Replacement::new("", "|"));
        assert!(RegionProfile::from_config(config).is_err());
    }

    #[test]
    fn test_toml_round_trip_of_builtin() {
        let original = RegionConfig::shenzhen();
        let text = original.to_toml_string().unwrap();
        let parsed = RegionConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, original);
    }
}
