//! Meeting groups and their scheduled events.

use super::{TimeOfDay, Weekday};
use serde::Serialize;

/// The kind of meeting a group holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupType {
    Lecture,
    Tutorial,
    Lab,
    Sport,
}

/// One weekly recurring time/location slot belonging to a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub day: Weekday,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub location: String,
}

/// A recurring meeting series of one type, with its teachers and events.
///
/// Teachers appear in source order and duplicates are allowed. Sports groups
/// carry a free-text `description` instead of a teacher roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub id: u32,
    pub group_type: GroupType,
    pub teachers: Vec<String>,
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Group {
    /// Creates an empty group of the given type.
    pub fn new(id: u32, group_type: GroupType) -> Self {
        Self {
            id,
            group_type,
            teachers: Vec::new(),
            events: Vec::new(),
            description: None,
        }
    }

    /// Creates an empty sports group with its free-text description.
    pub fn sport(id: u32, description: String) -> Self {
        Self {
            id,
            group_type: GroupType::Sport,
            teachers: Vec::new(),
            events: Vec::new(),
            description: Some(description),
        }
    }
}
