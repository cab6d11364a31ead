//! Courses and their header metadata.

use super::Group;
use serde::Serialize;

/// A calendar date from the report, century already applied.
///
/// Only the numeric parse is validated; the source is trusted for calendar
/// validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

/// Which weekly-hours slot an hour-count descriptor selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HourKind {
    Lecture,
    Tutorial,
    Lab,
    Project,
}

/// Weekly hours of a course, split by meeting kind. Unlisted kinds stay 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WeeklyHours {
    pub lecture: u32,
    pub tutorial: u32,
    pub lab: u32,
    pub project: u32,
}

impl WeeklyHours {
    /// Records the hour count for one descriptor slot.
    pub fn set(&mut self, kind: HourKind, hours: u32) {
        match kind {
            HourKind::Lecture => self.lecture = hours,
            HourKind::Tutorial => self.tutorial = hours,
            HourKind::Lab => self.lab = hours,
            HourKind::Project => self.project = hours,
        }
    }
}

/// One offered subject with its metadata and meeting groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Course {
    pub id: u32,
    pub name: String,
    pub academic_points: f32,
    pub weekly_hours: WeeklyHours,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecturer_in_charge: Option<String>,
    pub test_dates: Vec<Date>,
    /// Free-text notes accumulated from the course header block; empty when
    /// the course has none.
    pub notes: String,
    pub groups: Vec<Group>,
}
