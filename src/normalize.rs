//! Text normalization for fields extracted from the report.
//!
//! The report stores right-to-left script in visual (display) order, so every
//! free-text cell must be reversed codepoint-by-codepoint to recover logical
//! reading order. Spacing inside cells is print-job padding and gets
//! collapsed. The symbol tables map the report's single-letter and
//! single-word codes to model enums; all lookups return `None` for unknown
//! keys and the caller decides how hard to fail.

use crate::model::{GroupType, HourKind, Weekday};

/// Reverses a visually-stored right-to-left segment into logical order.
///
/// Operates on codepoints, never bytes.
pub fn reverse_visual(s: &str) -> String {
    s.chars().rev().collect()
}

/// Trims the string; when any internal run of two or more spaces exists,
/// collapses all whitespace runs to single spaces. A string that is already
/// single-spaced is returned trimmed but otherwise unchanged.
pub fn dedupe_spaces(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.contains("  ") {
        collapse_spaces(trimmed)
    } else {
        trimmed.to_string()
    }
}

/// Unconditionally collapses all whitespace runs to single spaces.
pub fn collapse_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Expands a two-digit year into the 2000s; four-digit years pass through.
pub fn fix_two_digit_year(year: u32) -> u32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

/// Maps a weekday letter to its day. The event grammars only admit these
/// seven letters.
pub fn weekday_from_letter(letter: &str) -> Option<Weekday> {
    match letter {
        "א" => Some(Weekday::Sunday),
        "ב" => Some(Weekday::Monday),
        "ג" => Some(Weekday::Tuesday),
        "ד" => Some(Weekday::Wednesday),
        "ה" => Some(Weekday::Thursday),
        "ו" => Some(Weekday::Friday),
        "ש" => Some(Weekday::Saturday),
        _ => None,
    }
}

/// Maps a group-type word (in the report's visual order) to its type.
/// Tutorials appear under two spellings.
pub fn group_type_from_word(word: &str) -> Option<GroupType> {
    match word {
        "האצרה" => Some(GroupType::Lecture),
        "לוגרת" => Some(GroupType::Tutorial),
        "ליגרת" => Some(GroupType::Tutorial),
        "הדבעמ" => Some(GroupType::Lab),
        _ => None,
    }
}

/// Maps an hour-count descriptor letter to its weekly-hours slot.
pub fn hour_kind_from_letter(letter: &str) -> Option<HourKind> {
    match letter {
        "ה" => Some(HourKind::Lecture),
        "ת" => Some(HourKind::Tutorial),
        "מ" => Some(HourKind::Lab),
        "פ" => Some(HourKind::Project),
        _ => None,
    }
}
