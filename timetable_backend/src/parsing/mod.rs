//! Parsers for timetable week expressions and timetable grids.
//!
//! # Parsers
//!
//! - [`expression`]: Cut a week expression into teacher, week-range and room tokens
//! - [`week_range`]: Expand one week-range token into week numbers
//! - [`assembler`]: Join teachers and rooms to week ranges into a week map
//! - [`grid`]: Import a whole timetable grid into a [`Schedule`](crate::core::Schedule)
//!
//! # Example
//!
//! ```
//! use timetable_rust::config::Region;
//! use timetable_rust::parsing::assemble_weeks;
//!
//! let weeks = assemble_weeks("高等数学", "张三[1-2]H304", Region::Harbin.profile())
//!     .expect("Failed to parse expression");
//! assert_eq!(weeks.len(), 2);
//! ```

pub mod assembler;
pub mod expression;
pub mod grid;
pub mod week_range;

#[cfg(test)]
mod assembler_tests;

pub use assembler::{assemble_weeks, PENDING_ROOM};
pub use expression::{classify, classify_expression, tokenize, Token, TokenKind};
pub use grid::{import_schedule, parse_header, TimetableGrid};
pub use week_range::{expand_week_range, Parity};
