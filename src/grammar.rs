//! Line grammars for the report format.
//!
//! The report is a visual rendering of a mainframe print job: every table
//! line is matched against literal separator constants or one of the regular
//! expressions below. Hebrew text inside the patterns is in the report's
//! *visual* (display) order, reproduced byte-for-byte from the legacy format
//! — do not "fix" it to logical order. Ordinary faculties and the sports
//! faculty use the same structure at two different fixed line widths.
//!
//! Each grammar function returns `Option` of a typed record of borrowed
//! captures; callers normalize and convert the fields. The parser state
//! machine, not this module, decides which grammars are eligible for the
//! current line.

use regex::Regex;
use std::sync::LazyLock;

/// Separator opening and closing an ordinary faculty header.
pub const FACULTY_SEP: &str = "+==========================================+";
/// Separator between ordinary courses.
pub const COURSE_SEP: &str = "+------------------------------------------+";
/// First line of the two-line group-block header.
pub const GROUP_SEP_1: &str = "|               ++++++                  .סמ|";
/// Second line of the two-line group-block header.
pub const GROUP_SEP_2: &str = "|                                     םושיר|";
/// Dashed filler between groups.
pub const BLANK_LINE_1: &str = "|                               -----      |";
/// All-blank table line.
pub const BLANK_LINE_2: &str = "|                                          |";

/// Sports-format equivalents at the sports table width.
pub const SPORTS_FACULTY_SEP: &str =
    "+===============================================================+";
pub const SPORTS_COURSE_SEP: &str =
    "+---------------------------------------------------------------+";
pub const SPORTS_BLANK_LINE_1: &str =
    "|                                             -----------       |";
pub const SPORTS_BLANK_LINE_2: &str =
    "|                                                               |";

static ID_AND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\| *(.*) +([0-9]{5,6}) +\|").unwrap());

static HOURS_AND_POINTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\| *([0-9]+\.[0-9]+) *:קנ *(([0-9]+-[התפמ] *)+):עובשב הארוה תועש *\|").unwrap()
});

// The test time at the end of test-date lines is intentionally not captured.
static TEST_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\|.*([0-9]{2})/([0-9]{2})/([0-9]{2}) *'. +םוי *:.*דעומ +\|").unwrap()
});

static LECTURER_IN_CHARGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\| *(.*) : *יארחא *הרומ *\|").unwrap());

static DOTTED_FILLER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\| +-+ *\|").unwrap());

static FACULTY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\| *([א-ת\-\.,\* ]+) *- *תועש תכרעמ *\|").unwrap());

static FACULTY_SEMESTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\| *([א-ת" ]+) +רטסמס *\|"#).unwrap());

static SPORTS_SEMESTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\| *([א-ת" ]+) +רטסמס *- *טרופס תועוצקמ *\|"#).unwrap());

static GROUP_TEACHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\| *(.*) *: *(הצרמ|לגרתמ) *\|").unwrap());

static EVENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\| *(?P<location>.*) +(?P<start_hour>[0-9]{1,2})\.(?P<start_minute>[0-9]{2})- *(?P<end_hour>[0-9]{1,2})\.(?P<end_minute>[0-9]{2})'(?P<weekday>[אבגדהוש]) (:(?P<group_type>[א-ת]+))? +(?P<group_id>[0-9]+)? *\|",
    )
    .unwrap()
});

static SPORTS_EVENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\| *(?P<location>.*)? +(?P<start_hour>[0-9]{1,2})\.(?P<start_minute>[0-9]{2})- *(?P<end_hour>[0-9]{1,2})\.(?P<end_minute>[0-9]{2})'(?P<weekday>[אבגדהוש]) +(?P<description>[א-ת\.\- "']+)? +(?P<group_id>[0-9]+)? *\|"#,
    )
    .unwrap()
});

static LOCATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([א-ת\.]+) ([0-9]+)").unwrap());

/// Captures of a course id+name header line.
#[derive(Debug, PartialEq, Eq)]
pub struct IdAndName<'a> {
    /// Course name cell, still in visual order with print padding.
    pub name: &'a str,
    /// 5–6 decimal digits.
    pub id: &'a str,
}

/// Captures of the academic-points and weekly-hours line.
#[derive(Debug, PartialEq, Eq)]
pub struct HoursAndPoints<'a> {
    /// Decimal points value, e.g. `3.0`.
    pub points: &'a str,
    /// Whitespace-separated `count-descriptor` tokens, e.g. `1-ת 2-ה`.
    pub hours: &'a str,
}

/// Captures of a test-date line (`dd/mm/yy`; the time of day on the line is
/// discarded).
#[derive(Debug, PartialEq, Eq)]
pub struct TestDateLine<'a> {
    pub day: &'a str,
    pub month: &'a str,
    pub year: &'a str,
}

/// Captures of an ordinary event line. When the line also opens a group it
/// carries a `group_type` word and possibly an explicit `group_id`.
#[derive(Debug, PartialEq, Eq)]
pub struct EventLine<'a> {
    pub location: &'a str,
    pub start_hour: &'a str,
    pub start_minute: &'a str,
    pub end_hour: &'a str,
    pub end_minute: &'a str,
    pub weekday: &'a str,
    pub group_type: Option<&'a str>,
    pub group_id: Option<&'a str>,
}

/// Captures of a sports event line. A `group_id` opens a new sports group
/// whose free-text `description` comes from the same line.
#[derive(Debug, PartialEq, Eq)]
pub struct SportsEventLine<'a> {
    pub location: &'a str,
    pub start_hour: &'a str,
    pub start_minute: &'a str,
    pub end_hour: &'a str,
    pub end_minute: &'a str,
    pub weekday: &'a str,
    pub description: &'a str,
    pub group_id: Option<&'a str>,
}

/// Matches a course id+name header line.
pub fn id_and_name(line: &str) -> Option<IdAndName<'_>> {
    let caps = ID_AND_NAME.captures(line)?;
    Some(IdAndName {
        name: caps.get(1)?.as_str(),
        id: caps.get(2)?.as_str(),
    })
}

/// Matches the academic-points and weekly-hours line.
pub fn hours_and_points(line: &str) -> Option<HoursAndPoints<'_>> {
    let caps = HOURS_AND_POINTS.captures(line)?;
    Some(HoursAndPoints {
        points: caps.get(1)?.as_str(),
        hours: caps.get(2)?.as_str(),
    })
}

/// Matches a test-date line.
pub fn test_date(line: &str) -> Option<TestDateLine<'_>> {
    let caps = TEST_DATE.captures(line)?;
    Some(TestDateLine {
        day: caps.get(1)?.as_str(),
        month: caps.get(2)?.as_str(),
        year: caps.get(3)?.as_str(),
    })
}

/// Matches the lecturer-in-charge line, returning the raw name cell.
pub fn lecturer_in_charge(line: &str) -> Option<&str> {
    Some(LECTURER_IN_CHARGE.captures(line)?.get(1)?.as_str())
}

/// Returns true for the dotted filler lines inside the metadata block.
pub fn is_dotted_filler(line: &str) -> bool {
    DOTTED_FILLER.is_match(line)
}

/// Matches an ordinary faculty-name line, returning the raw name cell.
pub fn faculty_name(line: &str) -> Option<&str> {
    Some(FACULTY_NAME.captures(line)?.get(1)?.as_str())
}

/// Matches an ordinary faculty-semester line, returning the raw cell.
pub fn faculty_semester(line: &str) -> Option<&str> {
    Some(FACULTY_SEMESTER.captures(line)?.get(1)?.as_str())
}

/// Matches the sports faculty's combined semester line.
pub fn sports_semester(line: &str) -> Option<&str> {
    Some(SPORTS_SEMESTER.captures(line)?.get(1)?.as_str())
}

/// Matches a per-group lecturer/tutor name line, returning the raw cell.
pub fn group_teacher(line: &str) -> Option<&str> {
    Some(GROUP_TEACHER.captures(line)?.get(1)?.as_str())
}

/// Matches an ordinary event line.
pub fn event_line(line: &str) -> Option<EventLine<'_>> {
    let caps = EVENT.captures(line)?;
    Some(EventLine {
        location: caps.name("location").map_or("", |m| m.as_str()),
        start_hour: caps.name("start_hour")?.as_str(),
        start_minute: caps.name("start_minute")?.as_str(),
        end_hour: caps.name("end_hour")?.as_str(),
        end_minute: caps.name("end_minute")?.as_str(),
        weekday: caps.name("weekday")?.as_str(),
        group_type: caps.name("group_type").map(|m| m.as_str()),
        group_id: caps.name("group_id").map(|m| m.as_str()),
    })
}

/// Matches a sports event line.
pub fn sports_event_line(line: &str) -> Option<SportsEventLine<'_>> {
    let caps = SPORTS_EVENT.captures(line)?;
    Some(SportsEventLine {
        location: caps.name("location").map_or("", |m| m.as_str()),
        start_hour: caps.name("start_hour")?.as_str(),
        start_minute: caps.name("start_minute")?.as_str(),
        end_hour: caps.name("end_hour")?.as_str(),
        end_minute: caps.name("end_minute")?.as_str(),
        weekday: caps.name("weekday")?.as_str(),
        description: caps.name("description").map_or("", |m| m.as_str()),
        group_id: caps.name("group_id").map(|m| m.as_str()),
    })
}

/// Splits a location cell into its `(building, room)` parts when it follows
/// the standard "building name + room number" shape.
pub fn split_location(cell: &str) -> Option<(&str, &str)> {
    let caps = LOCATION.captures(cell)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
