//! Subject mutations

use super::{rejected, semester_mut, MutationError, MutationResult};
use crate::core::models::{ids, AppData, Attendance, Grade, NewSubject, SemesterId, Subject};
use crate::debug;

/// Fields to change on a subject; `None` leaves the field as it is
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubjectPatch {
    /// New name
    pub name: Option<String>,
    /// New credit weight
    pub credits: Option<u32>,
    /// New grade
    pub grade: Option<Grade>,
    /// New attendance counters (`attended` is clamped to `total`)
    pub attendance: Option<Attendance>,
}

impl SubjectPatch {
    /// Whether the patch changes nothing
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.credits.is_none()
            && self.grade.is_none()
            && self.attendance.is_none()
    }

    fn apply(&self, subject: &mut Subject) {
        if let Some(name) = &self.name {
            subject.name.clone_from(name);
        }
        if let Some(credits) = self.credits {
            subject.credits = credits;
        }
        if let Some(grade) = self.grade {
            subject.grade = grade.point().map_or(Grade::Ungraded, Grade::new);
        }
        if let Some(attendance) = self.attendance {
            subject.attendance = Attendance::new(attendance.attended, attendance.total);
        }
    }
}

/// Append a subject to a semester under a freshly generated id
///
/// # Errors
/// [`MutationError::SemesterNotFound`] when the semester does not exist.
pub fn add_subject(
    data: &AppData,
    semester_id: SemesterId,
    subject: NewSubject,
) -> MutationResult<AppData> {
    let id = ids::unique_id(|candidate| data.has_subject_id(candidate));
    let mut next = data.clone();
    let semester = semester_mut(&mut next, semester_id)?;
    debug!("Adding subject '{}' ({id}) to semester {semester_id}", subject.name);
    semester.subjects.push(subject.with_id(id));
    Ok(next)
}

/// Remove a subject; an unknown subject id leaves the data unchanged
///
/// # Errors
/// [`MutationError::SemesterNotFound`] when the semester does not exist.
pub fn remove_subject(
    data: &AppData,
    semester_id: SemesterId,
    subject_id: &str,
) -> MutationResult<AppData> {
    let mut next = data.clone();
    let semester = semester_mut(&mut next, semester_id)?;
    let before = semester.subjects.len();
    semester.subjects.retain(|s| s.id != subject_id);
    if semester.subjects.len() < before {
        debug!("Removed subject {subject_id} from semester {semester_id}");
    }
    Ok(next)
}

/// Merge `patch` into the matching subject
///
/// # Errors
/// [`MutationError::SemesterNotFound`] or [`MutationError::SubjectNotFound`].
pub fn update_subject(
    data: &AppData,
    semester_id: SemesterId,
    subject_id: &str,
    patch: &SubjectPatch,
) -> MutationResult<AppData> {
    let mut next = data.clone();
    let subject = subject_mut(&mut next, semester_id, subject_id)?;
    patch.apply(subject);
    debug!("Updated subject {subject_id} in semester {semester_id}");
    Ok(next)
}

pub(super) fn subject_mut<'a>(
    data: &'a mut AppData,
    semester_id: SemesterId,
    subject_id: &str,
) -> MutationResult<&'a mut Subject> {
    semester_mut(data, semester_id)?
        .subject_mut(subject_id)
        .ok_or_else(|| {
            rejected(MutationError::SubjectNotFound {
                semester: semester_id,
                subject: subject_id.to_string(),
            })
        })
}
