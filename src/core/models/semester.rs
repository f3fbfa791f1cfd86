//! Semester model

use super::Subject;
use serde::{Deserialize, Serialize};

/// Semester identifier (`1..=max_semester`)
pub type SemesterId = u32;

/// Highest semester id accepted from imported or shared data
pub const MAX_SEMESTER_ID: SemesterId = 99;

/// Whether `id` is a usable semester id (`1..=MAX_SEMESTER_ID`)
#[must_use]
pub const fn is_valid_semester_id(id: SemesterId) -> bool {
    id >= 1 && id <= MAX_SEMESTER_ID
}

/// A semester and the subjects taken in it, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester number
    pub id: SemesterId,

    /// Display name (e.g., "Semester 3")
    pub name: String,

    /// Subjects in insertion order
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl Semester {
    /// Create an empty semester with the default name for `id`
    #[must_use]
    pub fn new(id: SemesterId) -> Self {
        Self {
            id,
            name: Self::default_name(id),
            subjects: Vec::new(),
        }
    }

    /// Default display name for a semester id
    #[must_use]
    pub fn default_name(id: SemesterId) -> String {
        format!("Semester {id}")
    }

    /// Look up a subject by id
    #[must_use]
    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == subject_id)
    }

    /// Look up a subject by id for modification
    pub fn subject_mut(&mut self, subject_id: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.id == subject_id)
    }

    /// Sum of credits over every subject, graded or not
    #[must_use]
    pub fn registered_credits(&self) -> u32 {
        self.subjects.iter().map(|s| s.credits).sum()
    }
}
