//! Persistence and file-level loading.
//!
//! [`record`] maps schedules to and from their JSON record; [`loaders`]
//! wraps file access, grid import and calendar export with error context.
//!
//! # Example
//!
//! ```no_run
//! use timetable_rust::config::Region;
//! use timetable_rust::io::loaders::ScheduleLoader;
//! use std::path::Path;
//!
//! let result = ScheduleLoader::load_from_file(Path::new("timetable.json"), Region::Harbin.profile())
//!     .expect("Failed to load");
//! println!("Loaded {} courses", result.num_entries);
//! ```

pub mod loaders;
pub mod record;


pub use loaders::{write_calendar, RegionLoader, ScheduleLoadResult, ScheduleLoader, ScheduleSourceType};
pub use record::{entry_from_json, entry_to_json, from_json, to_json, EntryRecord, ScheduleRecord};
