//! Week-expression tokenizer and classifier.
//!
//! A cleaned expression such as `张三[1-8]H304` is cut into lexical units by
//! the profile's compound pattern, and every unit is classified by testing
//! the room, teacher and week-range patterns in that order.

use log::debug;
use std::fmt;

use crate::config::RegionProfile;
use crate::error::{ScheduleError, ScheduleResult};

/// Discriminant of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Teacher,
    WeekRange,
    Room,
    Unknown,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Teacher => "teacher",
            TokenKind::WeekRange => "week range",
            TokenKind::Room => "room",
            TokenKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A classified unit of a week expression, borrowing its text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Teacher(&'a str),
    WeekRange(&'a str),
    Room(&'a str),
    Unknown(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match *self {
            Token::Teacher(text)
            | Token::WeekRange(text)
            | Token::Room(text)
            | Token::Unknown(text) => text,
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Teacher(_) => TokenKind::Teacher,
            Token::WeekRange(_) => TokenKind::WeekRange,
            Token::Room(_) => TokenKind::Room,
            Token::Unknown(_) => TokenKind::Unknown,
        }
    }
}

/// Classify one unit: room first, then teacher, then week range.
pub fn classify<'a>(unit: &'a str, profile: &RegionProfile) -> Token<'a> {
    if profile.room_regex().is_match(unit) {
        Token::Room(unit)
    } else if profile.teacher_regex().is_match(unit) {
        Token::Teacher(unit)
    } else if profile.week_range_regex().is_match(unit) {
        Token::WeekRange(unit)
    } else {
        Token::Unknown(unit)
    }
}

/// Lazily cut a cleaned expression into classified tokens, in source order.
pub fn tokenize<'a>(
    cleaned: &'a str,
    profile: &'a RegionProfile,
) -> impl Iterator<Item = Token<'a>> + 'a {
    profile.unit_regex().find_iter(cleaned).map(move |unit| {
        let token = classify(unit.as_str(), profile);
        debug!("{} as {}", token.as_str(), token.kind());
        token
    })
}

/// Tokenize a cleaned expression, failing on the first unclassifiable unit.
///
/// # Errors
/// `Classification` naming the unit and the whole expression.
pub fn classify_expression<'a>(
    cleaned: &'a str,
    profile: &'a RegionProfile,
) -> ScheduleResult<Vec<Token<'a>>> {
    tokenize(cleaned, profile)
        .map(|token| match token {
            Token::Unknown(unit) => Err(ScheduleError::Classification {
                unit: unit.to_string(),
                expression: cleaned.to_string(),
            }),
            known => Ok(known),
        })
        .collect()
}
