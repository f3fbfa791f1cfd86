//! State transitions on [`AppData`]
//!
//! Every mutation borrows the current data and returns a new value; the input is
//! never modified. A rejected mutation returns a [`MutationError`] and the caller
//! keeps the value it already has, so a rejection can never leave partial changes.

pub mod attendance;
pub mod semesters;
pub mod subjects;
pub mod timetable;

use crate::core::models::{AppData, Day, Semester, SemesterId, MAX_GRADE_POINT};
use crate::{debug, warn};
use thiserror::Error;

pub use attendance::{mark_class, set_attendance_absolute, update_attendance_delta, AttendanceField};
pub use semesters::{add_semester, remove_semester, set_current_semester};
pub use subjects::{add_subject, remove_subject, update_subject, SubjectPatch};
pub use timetable::{
    add_timetable_entry, move_timetable_entry, remove_timetable_entry, update_timetable_entry,
    EntryPatch,
};

/// Reasons a mutation is refused
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
    /// No semester with this id
    #[error("semester {0} does not exist")]
    SemesterNotFound(SemesterId),

    /// No subject with this id in the semester
    #[error("subject '{subject}' does not exist in semester {semester}")]
    SubjectNotFound {
        /// Semester searched
        semester: SemesterId,
        /// Missing subject id
        subject: String,
    },

    /// No timetable entry with this id on the day
    #[error("timetable entry '{id}' does not exist on {day}")]
    EntryNotFound {
        /// Day searched
        day: Day,
        /// Missing entry id
        id: String,
    },

    /// Adding a semester would exceed the configured maximum
    #[error("semester {next} would exceed the maximum of {max}")]
    SemesterLimit {
        /// Id that would have been created
        next: SemesterId,
        /// Configured maximum
        max: SemesterId,
    },

    /// At least one semester must remain
    #[error("cannot remove the last remaining semester")]
    LastSemester,

    /// The requested interval overlaps an existing class
    #[error("{day} {range} overlaps {with}")]
    ScheduleConflict {
        /// Destination day
        day: Day,
        /// Requested range, formatted
        range: String,
        /// Short name of the class in the way
        with: String,
    },

    /// End hour is not after start hour
    #[error("class must end after it starts (start {start}, end {end})")]
    InvalidInterval {
        /// Start hour
        start: f64,
        /// End hour
        end: f64,
    },
}

/// Result of a mutation
pub type MutationResult<T> = Result<T, MutationError>;

/// Store a new target average, clamped to `[0, 10]`
///
/// A NaN target is treated as 0.
#[must_use]
pub fn set_target_average(data: &AppData, value: f64) -> AppData {
    let target = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_GRADE_POINT)
    };
    debug!("Target average set to {target:.2}");
    AppData {
        target_cgpa: target,
        ..data.clone()
    }
}

/// Log and pass through a rejection
fn rejected(err: MutationError) -> MutationError {
    warn!("Mutation rejected: {err}");
    err
}

fn semester_mut(data: &mut AppData, id: SemesterId) -> MutationResult<&mut Semester> {
    data.semesters
        .get_mut(&id)
        .ok_or_else(|| rejected(MutationError::SemesterNotFound(id)))
}
