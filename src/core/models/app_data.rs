//! Root record of the tracker

use super::{seed, Day, Semester, SemesterId, Subject, Timetable, TimetableEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the tracker stores, persisted and restored as one unit
///
/// At least one semester always exists; mutations that would remove the last one
/// are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppData {
    /// Semesters keyed by id (ids need not be contiguous)
    pub semesters: BTreeMap<SemesterId, Semester>,

    /// Weekly schedule
    #[serde(default)]
    pub timetable: Timetable,

    /// Highest semester id that may be created
    #[serde(rename = "maxSemester")]
    pub max_semester: SemesterId,

    /// Target cumulative average, in `[0, 10]`
    #[serde(rename = "targetCGPA")]
    pub target_cgpa: f64,

    /// Semester the student is currently in
    #[serde(rename = "currentSemester")]
    pub current_semester: SemesterId,
}

impl Default for AppData {
    fn default() -> Self {
        seed::default_data()
    }
}

impl AppData {
    /// Build data with the given semesters and an empty timetable
    #[must_use]
    pub fn with_semesters(semesters: impl IntoIterator<Item = Semester>, max_semester: SemesterId) -> Self {
        let semesters: BTreeMap<_, _> = semesters.into_iter().map(|s| (s.id, s)).collect();
        let current_semester = semesters.keys().next().copied().unwrap_or(1);
        Self {
            semesters,
            timetable: Timetable::new(),
            max_semester,
            target_cgpa: 0.0,
            current_semester,
        }
    }

    /// Look up a semester
    #[must_use]
    pub fn semester(&self, id: SemesterId) -> Option<&Semester> {
        self.semesters.get(&id)
    }

    /// Semester ids in ascending order
    pub fn semester_ids(&self) -> impl Iterator<Item = SemesterId> + '_ {
        self.semesters.keys().copied()
    }

    /// Smallest semester id, if any
    #[must_use]
    pub fn first_semester_id(&self) -> Option<SemesterId> {
        self.semester_ids().next()
    }

    /// The semester marked as current, falling back to the first one
    #[must_use]
    pub fn active_semester(&self) -> Option<&Semester> {
        self.semester(self.current_semester)
            .or_else(|| self.semesters.values().next())
    }

    /// Every subject across all semesters, in semester order
    pub fn subjects(&self) -> impl Iterator<Item = &Subject> + '_ {
        self.semesters.values().flat_map(|s| s.subjects.iter())
    }

    /// Whether any subject in any semester uses `id`
    #[must_use]
    pub fn has_subject_id(&self, id: &str) -> bool {
        self.subjects().any(|s| s.id == id)
    }

    /// Entries scheduled on `day` (empty when the day has none)
    #[must_use]
    pub fn entries(&self, day: Day) -> &[TimetableEntry] {
        self.timetable.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether any entry on any day uses `id`
    #[must_use]
    pub fn has_entry_id(&self, id: &str) -> bool {
        self.timetable.values().flatten().any(|e| e.id == id)
    }
}
