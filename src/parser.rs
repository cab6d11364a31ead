//! Catalog builder: the nested state machine that drives parsing.
//!
//! Parsing proceeds through nested phases — catalog → faculty → course →
//! group block — each implemented as a phase function with an explicit
//! outcome. "No more input" and "end of faculty" are `Ok(None)` outcomes,
//! never sentinel values. A hard error inside one course is caught by the
//! faculty loop, reported as a warning, and answered by resynchronizing the
//! cursor to the next course separator; only structural failures at the
//! faculty level (or a stuck cursor) abort the whole parse.

use crate::cursor::LineCursor;
use crate::diag::{DiagnosticSink, LogSink};
use crate::error::{Error, Result, ResultExt};
use crate::grammar;
use crate::model::{Catalog, Course, Date, Event, Faculty, Group, TimeOfDay, Weekday, WeeklyHours};
use crate::normalize;
use std::io::{self, BufRead};

/// Logical-order name assigned to the sports faculty; the report itself
/// never states it.
const SPORTS_FACULTY_NAME: &str = "מקצועות ספורט";

/// The report omits the first group's explicit number; it is this by
/// convention.
const FIRST_GROUP_ID: u32 = 10;

/// Lines that terminate the course-metadata block.
const METADATA_TERMINATORS: [&str; 5] = [
    grammar::GROUP_SEP_1,
    grammar::COURSE_SEP,
    grammar::SPORTS_COURSE_SEP,
    grammar::BLANK_LINE_2,
    grammar::SPORTS_BLANK_LINE_2,
];

/// Parser over a decoded line stream.
///
/// One parser handles one report; it is consumed by [`parse`](Self::parse).
/// Hosts parsing several reports concurrently should instantiate one parser
/// per report.
pub struct Parser<I, S = LogSink> {
    cursor: LineCursor<I>,
    sink: S,
    group_id: u32,
}

impl<I> Parser<I, LogSink>
where
    I: Iterator<Item = io::Result<String>>,
{
    /// Creates a parser over a stream of decoded lines, reporting
    /// diagnostics through the [`log`] facade.
    pub fn new(lines: I) -> Self {
        Self {
            cursor: LineCursor::new(lines),
            sink: LogSink,
            group_id: FIRST_GROUP_ID,
        }
    }
}

impl<R: BufRead> Parser<io::Lines<R>, LogSink> {
    /// Creates a parser reading decoded UTF-8 lines from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Parser::new(reader.lines())
    }
}

impl<I, S> Parser<I, S>
where
    I: Iterator<Item = io::Result<String>>,
    S: DiagnosticSink,
{
    /// Replaces the diagnostic sink.
    pub fn with_sink<S2: DiagnosticSink>(self, sink: S2) -> Parser<I, S2> {
        Parser {
            cursor: self.cursor,
            sink,
            group_id: self.group_id,
        }
    }

    /// Parses the whole report into a catalog.
    ///
    /// Succeeds with a complete catalog even when individual courses were
    /// dropped after resynchronization; those are visible only through the
    /// diagnostic sink.
    pub fn parse(mut self) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        while let Some(faculty) = self
            .parse_faculty()
            .context("failed to parse a faculty")?
        {
            catalog.faculties.push(faculty);
        }
        Ok(catalog)
    }

    fn text(&self) -> &str {
        self.cursor.text()
    }

    fn line(&self) -> u32 {
        self.cursor.line()
    }

    fn scan(&mut self) -> Result<bool> {
        let more = self.cursor.advance()?;
        if !more {
            let message = format!(
                "hit end of input (advance attempt {})",
                self.cursor.eof_hits()
            );
            self.info(message);
        }
        Ok(more)
    }

    fn info(&mut self, message: impl AsRef<str>) {
        let line = self.cursor.line();
        self.sink.info(line, message.as_ref());
    }

    fn warn(&mut self, message: impl AsRef<str>) {
        let line = self.cursor.line();
        self.sink.warning(line, message.as_ref());
    }

    fn expect_line_and_advance(&mut self, expected: &str) -> Result<()> {
        if self.text() != expected {
            return Err(Error::UnexpectedLine {
                line: self.line(),
                expected: expected.to_string(),
                actual: self.text().to_string(),
            });
        }
        self.scan()?;
        Ok(())
    }

    fn parse_uint(&self, text: &str) -> Result<u32> {
        text.parse().map_err(|_| Error::InvalidNumber {
            line: self.line(),
            text: text.to_string(),
        })
    }

    fn parse_float(&self, text: &str) -> Result<f32> {
        text.parse().map_err(|_| Error::InvalidNumber {
            line: self.line(),
            text: text.to_string(),
        })
    }

    /// Skips input until the current line equals `separator`. Bounded by the
    /// cursor's end-of-input tolerance, so a missing separator cannot spin
    /// forever.
    fn resync_to(&mut self, separator: &str) -> Result<()> {
        while self.text() != separator {
            self.scan()?;
        }
        Ok(())
    }

    /// Parses one faculty. Returns `Ok(None)` when the input is exhausted
    /// before a faculty starts.
    fn parse_faculty(&mut self) -> Result<Option<Faculty>> {
        while self.text().trim().is_empty() {
            if !self.scan()? {
                return Ok(None);
            }
        }

        if self.text() == grammar::SPORTS_FACULTY_SEP {
            return self.parse_sports_faculty().map(Some);
        }
        if self.text() == grammar::FACULTY_SEP {
            return self.parse_ordinary_faculty().map(Some);
        }
        Err(Error::UnexpectedLine {
            line: self.line(),
            expected: "a faculty separator".to_string(),
            actual: self.text().to_string(),
        })
    }

    fn parse_ordinary_faculty(&mut self) -> Result<Faculty> {
        self.expect_line_and_advance(grammar::FACULTY_SEP)
            .context("missing the opening faculty separator")?;

        let name = self
            .parse_faculty_name()
            .context("failed to parse the faculty name")?;
        let semester = self
            .parse_faculty_semester()
            .context("failed to parse the faculty semester")?;

        self.expect_line_and_advance(grammar::FACULTY_SEP)
            .context("missing the closing faculty separator")?;

        let mut faculty = Faculty {
            name,
            semester,
            courses: Vec::new(),
        };
        self.parse_course_loop(&mut faculty, grammar::COURSE_SEP, Self::parse_course)?;
        Ok(faculty)
    }

    fn parse_sports_faculty(&mut self) -> Result<Faculty> {
        self.info("started parsing the sports faculty");

        self.expect_line_and_advance(grammar::SPORTS_FACULTY_SEP)
            .context("missing the opening sports faculty separator")?;

        let Some(raw) = grammar::sports_semester(self.text()) else {
            return Err(Error::GrammarMismatch {
                line: self.line(),
                kind: "sports-semester",
                text: self.text().to_string(),
            });
        };
        let semester = normalize::reverse_visual(raw.trim());
        self.scan()?;

        self.expect_line_and_advance(grammar::SPORTS_FACULTY_SEP)
            .context("missing the closing sports faculty separator")?;

        let mut faculty = Faculty {
            name: SPORTS_FACULTY_NAME.to_string(),
            semester,
            courses: Vec::new(),
        };
        self.parse_course_loop(
            &mut faculty,
            grammar::SPORTS_COURSE_SEP,
            Self::parse_sports_course,
        )?;
        Ok(faculty)
    }

    /// Runs the per-faculty course loop with resynchronization: a failed
    /// course is reported and skipped, never fatal for the faculty.
    fn parse_course_loop(
        &mut self,
        faculty: &mut Faculty,
        resync_separator: &str,
        parse_one: fn(&mut Self) -> Result<Option<Course>>,
    ) -> Result<()> {
        loop {
            match parse_one(self) {
                Ok(Some(course)) => faculty.courses.push(course),
                Ok(None) => return Ok(()),
                Err(err) => {
                    let message =
                        format!("failed to parse a course in faculty {:?}: {}", faculty.name, err);
                    self.warn(message);
                    self.warn("skipping to the next course separator");
                    self.resync_to(resync_separator)?;
                }
            }
        }
    }

    fn parse_faculty_name(&mut self) -> Result<String> {
        let Some(raw) = grammar::faculty_name(self.text()) else {
            return Err(Error::GrammarMismatch {
                line: self.line(),
                kind: "faculty-name",
                text: self.text().to_string(),
            });
        };
        let name = normalize::reverse_visual(raw.trim());
        self.scan()?;
        Ok(name)
    }

    fn parse_faculty_semester(&mut self) -> Result<String> {
        let Some(raw) = grammar::faculty_semester(self.text()) else {
            return Err(Error::GrammarMismatch {
                line: self.line(),
                kind: "faculty-semester",
                text: self.text().to_string(),
            });
        };
        let semester = normalize::reverse_visual(raw.trim());
        self.scan()?;
        Ok(semester)
    }

    /// Parses one ordinary course. Returns `Ok(None)` at end of faculty (a
    /// blank line where a course header was expected).
    fn parse_course(&mut self) -> Result<Option<Course>> {
        let mut course = Course::default();
        self.group_id = FIRST_GROUP_ID;

        while self.text() == grammar::COURSE_SEP {
            if !self.scan()? {
                return Err(Error::UnexpectedEof {
                    line: self.line(),
                    context: "skipping course separators",
                });
            }
        }
        if self.text().is_empty() {
            return Ok(None);
        }

        self.parse_id_and_name(&mut course)
            .context("failed to parse the course id and name")?;

        // Hours and points are best effort; a malformed line costs a warning,
        // not the course.
        if let Err(err) = self.parse_hours_and_points(&mut course) {
            let message = format!("invalid hours-and-points line: {err}");
            self.warn(message);
            self.scan()?;
        }

        self.expect_line_and_advance(grammar::COURSE_SEP)
            .context("missing the course separator after the course header")?;
        self.parse_course_metadata(&mut course)
            .context("failed to parse the course metadata block")?;
        self.parse_groups(&mut course)
            .context("failed to parse the course groups")?;

        Ok(Some(course))
    }

    /// Sports-format variant of [`parse_course`](Self::parse_course).
    fn parse_sports_course(&mut self) -> Result<Option<Course>> {
        self.info("about to parse a sports course");

        let mut course = Course::default();
        self.group_id = FIRST_GROUP_ID;

        while self.text() == grammar::SPORTS_COURSE_SEP {
            self.scan()?;
        }
        if self.text().is_empty() {
            return Ok(None);
        }

        self.parse_id_and_name(&mut course)
            .context("failed to parse the sports course id and name")?;

        if let Err(err) = self.parse_hours_and_points(&mut course) {
            let message = format!("invalid hours-and-points line in sports course: {err}");
            self.warn(message);
            self.scan()?;
        }

        self.expect_line_and_advance(grammar::SPORTS_COURSE_SEP)
            .context("missing the course separator after the sports course header")?;
        self.parse_course_metadata(&mut course)
            .context("failed to parse the sports course metadata block")?;
        self.parse_sports_groups(&mut course)
            .context("failed to parse the sports course groups")?;

        let message = format!("collected all groups for course {}", course.id);
        self.info(message);

        Ok(Some(course))
    }

    /// Parses the id+name header line. The two fields come from one
    /// composite pattern and are extracted as a unit.
    fn parse_id_and_name(&mut self, course: &mut Course) -> Result<()> {
        let Some(m) = grammar::id_and_name(self.text()) else {
            return Err(Error::GrammarMismatch {
                line: self.line(),
                kind: "id-and-name",
                text: self.text().to_string(),
            });
        };
        course.name = normalize::dedupe_spaces(&normalize::reverse_visual(m.name));
        course.id = self.parse_uint(m.id)?;
        self.scan()?;
        Ok(())
    }

    fn parse_hours_and_points(&mut self, course: &mut Course) -> Result<()> {
        let Some(m) = grammar::hours_and_points(self.text()) else {
            return Err(Error::GrammarMismatch {
                line: self.line(),
                kind: "hours-and-points",
                text: self.text().to_string(),
            });
        };
        course.academic_points = self.parse_float(m.points)?;
        self.parse_total_hours(&mut course.weekly_hours, m.hours)
            .context("invalid weekly-hours field")?;
        self.scan()?;
        Ok(())
    }

    fn parse_total_hours(&self, hours: &mut WeeklyHours, field: &str) -> Result<()> {
        for token in field.split_whitespace() {
            let Some((count, letter)) = token.split_once('-') else {
                return Err(Error::UnknownSymbol {
                    line: self.line(),
                    kind: "hour descriptor",
                    token: token.to_string(),
                });
            };
            let count = self.parse_uint(count)?;
            let Some(kind) = normalize::hour_kind_from_letter(letter) else {
                return Err(Error::UnknownSymbol {
                    line: self.line(),
                    kind: "hour descriptor",
                    token: letter.to_string(),
                });
            };
            hours.set(kind, count);
        }
        Ok(())
    }

    /// Parses the free-text/metadata block between the course header and its
    /// group block: test dates, the lecturer in charge, and arbitrary notes.
    fn parse_course_metadata(&mut self, course: &mut Course) -> Result<()> {
        let mut notes = String::new();

        loop {
            if METADATA_TERMINATORS.contains(&self.text()) {
                course.notes = notes.trim().to_string();
                return Ok(());
            }

            if grammar::is_dotted_filler(self.text()) {
                // padding between metadata entries
            } else if let Some(m) = grammar::test_date(self.text()) {
                // The time of day printed on these lines is discarded.
                let date = Date {
                    year: normalize::fix_two_digit_year(self.parse_uint(m.year)?),
                    month: self.parse_uint(m.month)?,
                    day: self.parse_uint(m.day)?,
                };
                course.test_dates.push(date);
            } else if let Some(raw) = grammar::lecturer_in_charge(self.text()) {
                course.lecturer_in_charge =
                    Some(normalize::dedupe_spaces(&normalize::reverse_visual(raw.trim())));
            } else {
                let cell = self.text().trim_matches(|c| c == '|' || c == ' ');
                notes.push_str(&normalize::reverse_visual(cell));
                notes.push('\n');
            }

            if !self.scan()? {
                return Err(Error::UnexpectedEof {
                    line: self.line(),
                    context: "parsing the course metadata block",
                });
            }
        }
    }

    /// Parses the ordinary group block: separator-delimited sub-blocks of
    /// event and teacher lines. Unrecognized lines are reported and skipped;
    /// trailing decorative lines are common.
    fn parse_groups(&mut self, course: &mut Course) -> Result<()> {
        if self.text() != grammar::GROUP_SEP_1 && self.text() != grammar::BLANK_LINE_2 {
            let message = format!(
                "expected {:?} or {:?}, got {:?}; skipping groups for this course",
                grammar::GROUP_SEP_1,
                grammar::BLANK_LINE_2,
                self.text()
            );
            self.warn(message);
            return Ok(());
        }

        loop {
            if self.text() == grammar::GROUP_SEP_1 {
                self.scan()?;
                self.expect_line_and_advance(grammar::GROUP_SEP_2)
                    .context("missing the second group separator")?;
                // Each sub-block's auto-assigned ids occupy their own tens
                // bucket.
                if self.group_id > FIRST_GROUP_ID {
                    self.group_id = (self.group_id / 10) * 10 + 10;
                }
            } else if self.text() == grammar::COURSE_SEP {
                self.scan()?;
                return Ok(());
            } else if self.text() == grammar::BLANK_LINE_1 || self.text() == grammar::BLANK_LINE_2 {
                self.scan()?;
            } else if self.try_event_line(course)? {
                // event consumed, cursor already advanced
            } else if self.try_teacher_line(course) {
                self.scan()?;
            } else {
                let message = format!("ignored group line {:?}", self.text());
                self.warn(message);
                self.scan()?;
            }
        }
    }

    /// Tries to consume the current line as an ordinary event line, opening
    /// a new group first when the line carries group-defining fields.
    /// Returns `Ok(false)` when the line is not an event line, including the
    /// unrecognized-group-type case.
    fn try_event_line(&mut self, course: &mut Course) -> Result<bool> {
        let (event, opener) = {
            let Some(m) = grammar::event_line(self.text()) else {
                return Ok(false);
            };
            let event = self.event_from_parts(
                m.weekday,
                m.start_hour,
                m.start_minute,
                m.end_hour,
                m.end_minute,
                m.location,
            )?;
            let opener = m
                .group_type
                .map(|word| (word.to_string(), m.group_id.map(str::to_string)));
            (event, opener)
        };

        if let Some((word, explicit_id)) = opener {
            let Some(group_type) = normalize::group_type_from_word(&word) else {
                let message = format!("unrecognized group type {word:?}");
                self.warn(message);
                return Ok(false);
            };
            let id = match explicit_id {
                Some(text) => {
                    let id = self.parse_uint(&text)?;
                    self.group_id = id + 1;
                    id
                }
                None => {
                    let id = self.group_id;
                    self.group_id += 1;
                    id
                }
            };
            course.groups.push(Group::new(id, group_type));
        }

        self.attach_event(course, event);
        self.scan()?;
        Ok(true)
    }

    /// Tries to consume the current line as a per-group teacher line.
    fn try_teacher_line(&mut self, course: &mut Course) -> bool {
        let Some(raw) = grammar::group_teacher(self.text()) else {
            return false;
        };
        let teacher = normalize::dedupe_spaces(&normalize::reverse_visual(
            &normalize::collapse_spaces(raw),
        ));
        match course.groups.last_mut() {
            Some(group) => group.teachers.push(teacher),
            None => {
                let message = format!("no group open, dropping teacher line {:?}", self.text());
                self.warn(message);
            }
        }
        true
    }

    /// Parses the sports group block: a flat loop of event lines, where a
    /// line carrying an explicit group id opens a new sports group with its
    /// free-text description.
    fn parse_sports_groups(&mut self, course: &mut Course) -> Result<()> {
        if self.text() != grammar::SPORTS_BLANK_LINE_2 {
            let message = format!(
                "expected {:?}, got {:?}; skipping groups for this course",
                grammar::SPORTS_BLANK_LINE_2,
                self.text()
            );
            self.warn(message);
            return Ok(());
        }

        loop {
            if self.text() == grammar::SPORTS_BLANK_LINE_2 {
                self.scan()?;
            } else if self.try_sports_event_line(course)? {
                // event consumed
            } else if self.text() == grammar::SPORTS_COURSE_SEP {
                self.scan()?;
                return Ok(());
            } else {
                let message = format!("ignored sports group line {:?}", self.text());
                self.warn(message);
                self.scan()?;
            }
        }
    }

    fn try_sports_event_line(&mut self, course: &mut Course) -> Result<bool> {
        let (event, opener) = {
            let Some(m) = grammar::sports_event_line(self.text()) else {
                return Ok(false);
            };
            let event = self.event_from_parts(
                m.weekday,
                m.start_hour,
                m.start_minute,
                m.end_hour,
                m.end_minute,
                m.location,
            )?;
            let opener = m
                .group_id
                .map(|id| (id.to_string(), m.description.to_string()));
            (event, opener)
        };

        if let Some((id_text, description)) = opener {
            let id = self.parse_uint(&id_text)?;
            let description = normalize::dedupe_spaces(&normalize::reverse_visual(
                &normalize::collapse_spaces(&description),
            ));
            course.groups.push(Group::sport(id, description));
        }

        self.attach_event(course, event);
        self.scan()?;
        Ok(true)
    }

    /// Appends an event to the most recently opened group. With no group
    /// open the event is dropped and reported, never misattributed.
    fn attach_event(&mut self, course: &mut Course, event: Event) {
        match course.groups.last_mut() {
            Some(group) => group.events.push(event),
            None => {
                let message = format!("no group open, dropping event line {:?}", self.text());
                self.warn(message);
            }
        }
    }

    fn event_from_parts(
        &self,
        weekday: &str,
        start_hour: &str,
        start_minute: &str,
        end_hour: &str,
        end_minute: &str,
        location: &str,
    ) -> Result<Event> {
        Ok(Event {
            day: self.weekday(weekday)?,
            start: self.time_of_day(start_hour, start_minute)?,
            end: self.time_of_day(end_hour, end_minute)?,
            location: self.parse_location(location)?,
        })
    }

    fn weekday(&self, letter: &str) -> Result<Weekday> {
        normalize::weekday_from_letter(letter).ok_or_else(|| Error::UnknownSymbol {
            line: self.line(),
            kind: "weekday letter",
            token: letter.to_string(),
        })
    }

    fn time_of_day(&self, hour: &str, minute: &str) -> Result<TimeOfDay> {
        let hour = self.parse_uint(hour)?;
        let minute = self.parse_uint(minute)?;
        Ok(TimeOfDay::from_hm(hour as u16, minute as u16))
    }

    /// Normalizes a location cell: "building + room" cells are reformatted
    /// with the room's numeric value; anything else is reversed and deduped
    /// whole.
    fn parse_location(&self, cell: &str) -> Result<String> {
        match grammar::split_location(cell) {
            Some((building, room)) => {
                let building = normalize::dedupe_spaces(&normalize::reverse_visual(building));
                let room = self.parse_uint(room)?;
                Ok(format!("{building} {room}"))
            }
            None => Ok(normalize::dedupe_spaces(&normalize::reverse_visual(cell))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::MemorySink;
    use crate::model::GroupType;

    const SAMPLE_COURSE: &str = r#"+------------------------------------------+
|                עדימ ןוסחא תוכרעמ  234322 |
|3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |
+------------------------------------------+
|             11/02/16 'ה  םוי: ןושאר דעומ |
|                              ----------- |
|             08/03/16 'ג  םוי:   ינש דעומ |
|                              ----------- |
|               ++++++                  .סמ|
|                                     םושיר|
|      בואט 009  10.30-12.30'ג :האצרה      |
|                רגדי.ג    ר"ד : הצרמ      |
|                               -----      |
|                                          |
|      בואט 005  17.30-18.30'ג :ליגרת  11  |
|                                          |
|      בואט 006  15.30-16.30'ד :ליגרת  12  |
|                                          |
|                     -        :ליגרת  13  |
+------------------------------------------+
"#;

    type TestParser<'a> =
        Parser<std::vec::IntoIter<io::Result<String>>, &'a mut MemorySink>;

    fn parser_over<'a>(input: &str, sink: &'a mut MemorySink) -> TestParser<'a> {
        let lines: Vec<io::Result<String>> = input.lines().map(|l| Ok(l.to_string())).collect();
        Parser::new(lines.into_iter()).with_sink(sink)
    }

    fn parse_with_sink(input: &str, sink: &mut MemorySink) -> Result<Catalog> {
        parser_over(input, sink).parse()
    }

    /// Reverses logical-order text into the report's visual storage order.
    fn visual(logical: &str) -> String {
        logical.chars().rev().collect()
    }

    fn faculty_fixture(course_blocks: &[&str]) -> String {
        let mut s = String::new();
        s.push('\n');
        s.push_str(grammar::FACULTY_SEP);
        s.push('\n');
        s.push_str(&format!("|  {} - תועש תכרעמ |\n", visual("מדעי המחשב")));
        s.push_str(&format!("|  {} רטסמס |\n", visual("אביב")));
        s.push_str(grammar::FACULTY_SEP);
        s.push('\n');
        for block in course_blocks {
            s.push_str(block);
        }
        s.push('\n');
        s
    }

    #[test]
    fn test_parse_single_course() {
        let mut sink = MemorySink::new();
        let mut parser = parser_over(SAMPLE_COURSE, &mut sink);
        parser.scan().unwrap();

        let course = parser.parse_course().unwrap().expect("a course");

        assert_eq!(course.id, 234322);
        assert_eq!(course.name, "מערכות אחסון מידע");
        assert_eq!(course.academic_points, 3.0);
        assert_eq!(
            course.weekly_hours,
            WeeklyHours {
                lecture: 2,
                tutorial: 1,
                lab: 0,
                project: 0
            }
        );
        assert_eq!(
            course.test_dates,
            vec![
                Date {
                    year: 2016,
                    month: 2,
                    day: 11
                },
                Date {
                    year: 2016,
                    month: 3,
                    day: 8
                },
            ]
        );
        assert!(course.notes.is_empty());
        assert!(course.lecturer_in_charge.is_none());

        assert_eq!(course.groups.len(), 3);

        let lecture = &course.groups[0];
        assert_eq!(lecture.id, 10);
        assert_eq!(lecture.group_type, GroupType::Lecture);
        assert_eq!(lecture.teachers, vec!["ד\"ר ג.ידגר".to_string()]);
        assert_eq!(lecture.events.len(), 1);
        assert_eq!(lecture.events[0].day, Weekday::Tuesday);
        assert_eq!(lecture.events[0].start, TimeOfDay(630));
        assert_eq!(lecture.events[0].end, TimeOfDay(750));
        assert_eq!(lecture.events[0].location, "טאוב 9");

        let tutorial_11 = &course.groups[1];
        assert_eq!(tutorial_11.id, 11);
        assert_eq!(tutorial_11.group_type, GroupType::Tutorial);
        assert_eq!(tutorial_11.events.len(), 1);
        assert_eq!(tutorial_11.events[0].location, "טאוב 5");

        let tutorial_12 = &course.groups[2];
        assert_eq!(tutorial_12.id, 12);
        assert_eq!(tutorial_12.events[0].day, Weekday::Wednesday);

        // The placeholder tutorial (a dash instead of times) is reported,
        // not parsed.
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("ignored group line")));
    }

    #[test]
    fn test_parse_full_catalog() {
        let input = faculty_fixture(&[SAMPLE_COURSE, SAMPLE_COURSE]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        assert_eq!(catalog.faculties.len(), 1);
        let faculty = &catalog.faculties[0];
        assert_eq!(faculty.name, "מדעי המחשב");
        assert_eq!(faculty.semester, "אביב");
        assert_eq!(faculty.courses.len(), 2);
        assert_eq!(catalog.find_course(234322).map(|c| c.id), Some(234322));
    }

    #[test]
    fn test_metadata_notes_and_lecturer() {
        let block = format!(
            "{sep}\n\
             |                עדימ ןוסחא תוכרעמ  234322 |\n\
             |3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |\n\
             {sep}\n\
             |        ןהכ עשוהי 'פורפ : יארחא הרומ |\n\
             |            {note} |\n\
             {blank}\n\
             {sep}\n",
            sep = grammar::COURSE_SEP,
            blank = grammar::BLANK_LINE_2,
            note = visual("מחייב הרשמה מוקדמת"),
        );
        let input = faculty_fixture(&[&block]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        let course = catalog.find_course(234322).unwrap();
        assert_eq!(
            course.lecturer_in_charge.as_deref(),
            Some("פרופ' יהושע כהן")
        );
        assert_eq!(course.notes, "מחייב הרשמה מוקדמת");
        assert!(course.groups.is_empty());
    }

    #[test]
    fn test_resynchronization_drops_only_the_bad_course() {
        let corrupted = SAMPLE_COURSE.replace(
            "|                עדימ ןוסחא תוכרעמ  234322 |",
            "~~~ scrambled header ~~~",
        );
        let input = faculty_fixture(&[&corrupted, SAMPLE_COURSE]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        assert_eq!(catalog.faculties.len(), 1);
        assert_eq!(catalog.faculties[0].courses.len(), 1);
        assert_eq!(catalog.faculties[0].courses[0].id, 234322);
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("failed to parse a course")));
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("skipping to the next course separator")));
    }

    #[test]
    fn test_all_courses_malformed_yields_empty_faculty() {
        let corrupted = SAMPLE_COURSE.replace(
            "|                עדימ ןוסחא תוכרעמ  234322 |",
            "~~~ scrambled header ~~~",
        );
        let input = faculty_fixture(&[&corrupted]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        assert_eq!(catalog.faculties.len(), 1);
        assert!(catalog.faculties[0].courses.is_empty());
    }

    #[test]
    fn test_group_id_bucketing_across_sub_blocks() {
        let block = format!(
            "{sep}\n\
             |                עדימ ןוסחא תוכרעמ  234322 |\n\
             |3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |\n\
             {sep}\n\
             |             11/02/16 'ה  םוי: ןושאר דעומ |\n\
             {g1}\n\
             {g2}\n\
             |      בואט 009  10.30-12.30'ג :האצרה      |\n\
             {blank}\n\
             |      בואט 005  17.30-18.30'ג :ליגרת      |\n\
             {blank}\n\
             {g1}\n\
             {g2}\n\
             |      בואט 006  15.30-16.30'ד :הדבעמ      |\n\
             {blank}\n\
             |      בואט 007  11.30-12.30'ה :הדבעמ      |\n\
             {sep}\n",
            sep = grammar::COURSE_SEP,
            g1 = grammar::GROUP_SEP_1,
            g2 = grammar::GROUP_SEP_2,
            blank = grammar::BLANK_LINE_2,
        );
        let input = faculty_fixture(&[&block]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        let course = catalog.find_course(234322).unwrap();
        let ids: Vec<u32> = course.groups.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![10, 11, 20, 21]);
        let types: Vec<GroupType> = course.groups.iter().map(|g| g.group_type).collect();
        assert_eq!(
            types,
            vec![
                GroupType::Lecture,
                GroupType::Tutorial,
                GroupType::Lab,
                GroupType::Lab
            ]
        );
    }

    #[test]
    fn test_event_without_group_is_dropped() {
        let block = format!(
            "{sep}\n\
             |                עדימ ןוסחא תוכרעמ  234322 |\n\
             |3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |\n\
             {sep}\n\
             {blank}\n\
             |      בואט 007  11.30-12.30'ד             |\n\
             {sep}\n",
            sep = grammar::COURSE_SEP,
            blank = grammar::BLANK_LINE_2,
        );
        let input = faculty_fixture(&[&block]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        let course = catalog.find_course(234322).unwrap();
        assert!(course.groups.is_empty());
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("dropping event line")));
    }

    #[test]
    fn test_unknown_group_type_is_reported_and_skipped() {
        let block = format!(
            "{sep}\n\
             |                עדימ ןוסחא תוכרעמ  234322 |\n\
             |3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |\n\
             {sep}\n\
             {blank}\n\
             |      בואט 009  10.30-12.30'ג :טרופס      |\n\
             {sep}\n",
            sep = grammar::COURSE_SEP,
            blank = grammar::BLANK_LINE_2,
        );
        let input = faculty_fixture(&[&block]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        assert!(catalog.find_course(234322).unwrap().groups.is_empty());
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("unrecognized group type")));
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("ignored group line")));
    }

    fn sports_fixture() -> String {
        format!(
            "{fsep}\n\
             |             {semester} רטסמס - טרופס תועוצקמ              |\n\
             {fsep}\n\
             {csep}\n\
             |                {name}  394902 |\n\
             |1.0 :קנ              2-ה:עובשב הארוה תועש |\n\
             {csep}\n\
             {blank}\n\
             |         הכירב          16.30-18.00'א     םינומיא תצובק     11  |\n\
             {blank}\n\
             |         הכירב          18.00-19.30'ג                          |\n\
             {csep}\n\
             \n",
            fsep = grammar::SPORTS_FACULTY_SEP,
            csep = grammar::SPORTS_COURSE_SEP,
            blank = grammar::SPORTS_BLANK_LINE_2,
            semester = visual("אביב"),
            name = visual("שחייה"),
        )
    }

    #[test]
    fn test_parse_sports_faculty() {
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&sports_fixture(), &mut sink).unwrap();

        assert_eq!(catalog.faculties.len(), 1);
        let faculty = &catalog.faculties[0];
        assert_eq!(faculty.name, "מקצועות ספורט");
        assert_eq!(faculty.semester, "אביב");
        assert_eq!(faculty.courses.len(), 1);

        let course = &faculty.courses[0];
        assert_eq!(course.id, 394902);
        assert_eq!(course.name, "שחייה");

        assert_eq!(course.groups.len(), 1);
        let group = &course.groups[0];
        assert_eq!(group.id, 11);
        assert_eq!(group.group_type, GroupType::Sport);
        assert_eq!(group.description.as_deref(), Some("קבוצת אימונים"));
        assert!(group.teachers.is_empty());

        // Both events land on the most recently opened group.
        assert_eq!(group.events.len(), 2);
        assert_eq!(group.events[0].day, Weekday::Sunday);
        assert_eq!(group.events[0].start, TimeOfDay(990));
        assert_eq!(group.events[0].end, TimeOfDay(1080));
        assert_eq!(group.events[0].location, "בריכה");
        assert_eq!(group.events[1].day, Weekday::Tuesday);
    }

    #[test]
    fn test_sports_event_before_any_group_is_dropped() {
        let input = sports_fixture().replace("     םינומיא תצובק     11  |", "                       |");
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        assert!(catalog.faculties[0].courses[0].groups.is_empty());
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("dropping event line")));
    }

    #[test]
    fn test_garbage_instead_of_faculty_separator_is_fatal() {
        let mut sink = MemorySink::new();
        let err = parse_with_sink("this is not a report\n", &mut sink).unwrap_err();
        assert!(err.to_string().contains("a faculty separator"));
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_missing_course_separator_escalates_to_stuck_cursor() {
        let mut input = String::new();
        input.push_str(grammar::FACULTY_SEP);
        input.push('\n');
        input.push_str(&format!("|  {} - תועש תכרעמ |\n", visual("מדעי המחשב")));
        input.push_str(&format!("|  {} רטסמס |\n", visual("אביב")));
        input.push_str(grammar::FACULTY_SEP);
        input.push('\n');
        input.push_str("~~~ scrambled header, and no separator ever follows ~~~\n");

        let mut sink = MemorySink::new();
        let err = parse_with_sink(&input, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            Error::Context { .. } | Error::CursorStuck { .. }
        ));
        assert!(err.to_string().contains("too many times"));
    }

    #[test]
    fn test_malformed_hours_line_is_best_effort() {
        let block = SAMPLE_COURSE.replace(
            "|3.0 :קנ          1-ת 2-ה:עובשב הארוה תועש |",
            "|<> mangled hours line <>|",
        );
        let input = faculty_fixture(&[&block]);
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink(&input, &mut sink).unwrap();

        let course = catalog.find_course(234322).unwrap();
        assert_eq!(course.academic_points, 0.0);
        assert_eq!(course.weekly_hours, WeeklyHours::default());
        // The rest of the course still parsed.
        assert_eq!(course.groups.len(), 3);
        assert!(sink
            .warnings()
            .any(|d| d.message.contains("invalid hours-and-points line")));
    }

    #[test]
    fn test_idempotence() {
        let input = faculty_fixture(&[SAMPLE_COURSE]);
        let mut first_sink = MemorySink::new();
        let mut second_sink = MemorySink::new();
        let first = parse_with_sink(&input, &mut first_sink).unwrap();
        let second = parse_with_sink(&input, &mut second_sink).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_catalog() {
        let mut sink = MemorySink::new();
        let catalog = parse_with_sink("", &mut sink).unwrap();
        assert!(catalog.faculties.is_empty());
        let catalog = parse_with_sink("\n\n\n", &mut sink).unwrap();
        assert!(catalog.faculties.is_empty());
    }
}
