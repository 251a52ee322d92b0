//! Region configuration.
//!
//! - [`region`]: region profiles (token patterns, semester and period tables,
//!   grid offsets, normalisation rules) and the built-in campus dialects

pub mod region;

pub use region::{Region, RegionConfig, RegionProfile, Replacement, PERIOD_COUNT};
