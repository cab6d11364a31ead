//! The catalog root and its faculties.

use super::Course;
use serde::Serialize;

/// An academic department's block of courses for one semester.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Faculty {
    pub name: String,
    pub semester: String,
    pub courses: Vec<Course>,
}

/// A complete parsed course catalog.
///
/// Faculties appear in source order; no uniqueness is enforced across them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    pub faculties: Vec<Faculty>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of courses across all faculties.
    pub fn course_count(&self) -> usize {
        self.faculties.iter().map(|f| f.courses.len()).sum()
    }

    /// Iterates over all courses in source order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.faculties.iter().flat_map(|f| f.courses.iter())
    }

    /// Finds the first course with the given ID, if any.
    pub fn find_course(&self, id: u32) -> Option<&Course> {
        self.courses().find(|c| c.id == id)
    }

    /// Renders the catalog as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
