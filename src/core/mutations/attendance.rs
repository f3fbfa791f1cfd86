//! Attendance mutations
//!
//! Both paths keep `attended <= total`, but they resolve a conflict differently:
//! a delta on `total` never drops below `attended` (total is floored), while an
//! absolute write clamps `attended` down to the new `total`.

use super::subjects::subject_mut;
use super::MutationResult;
use crate::core::models::{AppData, Attendance, SemesterId};
use crate::debug;
use std::fmt;
use std::str::FromStr;

/// Which attendance counter a delta applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceField {
    /// Classes attended
    Attended,
    /// Classes held
    Total,
}

impl FromStr for AttendanceField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attended" | "present" => Ok(Self::Attended),
            "total" | "held" => Ok(Self::Total),
            _ => Err(format!("Unknown attendance field: '{s}' (expected attended|total)")),
        }
    }
}

impl fmt::Display for AttendanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attended => write!(f, "attended"),
            Self::Total => write!(f, "total"),
        }
    }
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Counters after adding `delta` to `field`
///
/// The changed counter is floored at 0. `attended` is then capped at `total`;
/// `total` is floored at `attended`.
#[must_use]
pub fn apply_delta(current: Attendance, delta: i64, field: AttendanceField) -> Attendance {
    match field {
        AttendanceField::Attended => {
            let value = saturate(i64::from(current.attended).saturating_add(delta));
            Attendance {
                attended: value.min(current.total),
                total: current.total,
            }
        }
        AttendanceField::Total => {
            let value = saturate(i64::from(current.total).saturating_add(delta));
            Attendance {
                attended: current.attended,
                total: value.max(current.attended),
            }
        }
    }
}

/// Add `delta` (possibly negative) to one attendance counter of a subject
///
/// # Errors
/// `SemesterNotFound` or `SubjectNotFound` when the target does not exist.
pub fn update_attendance_delta(
    data: &AppData,
    semester_id: SemesterId,
    subject_id: &str,
    delta: i64,
    field: AttendanceField,
) -> MutationResult<AppData> {
    let mut next = data.clone();
    let subject = subject_mut(&mut next, semester_id, subject_id)?;
    subject.attendance = apply_delta(subject.attendance, delta, field);
    debug!(
        "Attendance {field} {delta:+} for {subject_id}: {}/{}",
        subject.attendance.attended, subject.attendance.total
    );
    Ok(next)
}

/// Overwrite both counters; `attended` is clamped down to `total`
///
/// # Errors
/// `SemesterNotFound` or `SubjectNotFound` when the target does not exist.
pub fn set_attendance_absolute(
    data: &AppData,
    semester_id: SemesterId,
    subject_id: &str,
    attended: u32,
    total: u32,
) -> MutationResult<AppData> {
    let mut next = data.clone();
    let subject = subject_mut(&mut next, semester_id, subject_id)?;
    subject.attendance = Attendance::new(attended, total);
    debug!(
        "Attendance set for {subject_id}: {}/{}",
        subject.attendance.attended, subject.attendance.total
    );
    Ok(next)
}

/// Record one held class, attended or missed
///
/// # Errors
/// `SemesterNotFound` or `SubjectNotFound` when the target does not exist.
pub fn mark_class(
    data: &AppData,
    semester_id: SemesterId,
    subject_id: &str,
    present: bool,
) -> MutationResult<AppData> {
    let next = update_attendance_delta(data, semester_id, subject_id, 1, AttendanceField::Total)?;
    if present {
        update_attendance_delta(&next, semester_id, subject_id, 1, AttendanceField::Attended)
    } else {
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Grade, NewSubject, Semester};
    use crate::core::mutations::MutationError;

    fn data_with(attended: u32, total: u32) -> (AppData, String) {
        let mut semester = Semester::new(1);
        let mut subject = NewSubject::new("S", 3, Grade::Ungraded);
        subject.attendance = Attendance::new(attended, total);
        semester.subjects.push(subject.with_id("sub".into()));
        (AppData::with_semesters([semester], 8), "sub".into())
    }

    fn counters(data: &AppData) -> Attendance {
        data.semester(1).unwrap().subjects[0].attendance
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let (d, id) = data_with(3, 5);
        for field in [AttendanceField::Attended, AttendanceField::Total] {
            let after = update_attendance_delta(&d, 1, &id, 0, field).unwrap();
            assert_eq!(after, d);
        }
    }

    #[test]
    fn test_attended_capped_at_total() {
        let (d, id) = data_with(3, 4);
        let after = update_attendance_delta(&d, 1, &id, 5, AttendanceField::Attended).unwrap();
        assert_eq!(counters(&after), Attendance { attended: 4, total: 4 });
    }

    #[test]
    fn test_attended_floored_at_zero() {
        let (d, id) = data_with(1, 4);
        let after = update_attendance_delta(&d, 1, &id, -5, AttendanceField::Attended).unwrap();
        assert_eq!(counters(&after), Attendance { attended: 0, total: 4 });
    }

    #[test]
    fn test_total_never_drops_below_attended() {
        let (d, id) = data_with(3, 5);
        let after = update_attendance_delta(&d, 1, &id, -4, AttendanceField::Total).unwrap();
        assert_eq!(counters(&after), Attendance { attended: 3, total: 3 });
    }

    #[test]
    fn test_extreme_deltas_saturate() {
        let att = Attendance::new(3, 5);
        assert_eq!(apply_delta(att, i64::MAX, AttendanceField::Total), Attendance::new(3, u32::MAX));
        assert_eq!(apply_delta(att, i64::MIN, AttendanceField::Attended), Attendance::new(0, 5));
    }

    #[test]
    fn test_absolute_clamps_attended_down() {
        let (d, id) = data_with(0, 0);
        let after = set_attendance_absolute(&d, 1, &id, 7, 5).unwrap();
        assert_eq!(counters(&after), Attendance { attended: 5, total: 5 });
    }

    #[test]
    fn test_mark_class() {
        let (d, id) = data_with(0, 0);
        let d = mark_class(&d, 1, &id, true).unwrap();
        let d = mark_class(&d, 1, &id, false).unwrap();
        assert_eq!(counters(&d), Attendance { attended: 1, total: 2 });
    }

    #[test]
    fn test_unknown_subject() {
        let (d, _) = data_with(0, 0);
        let err = update_attendance_delta(&d, 1, "x", 1, AttendanceField::Total).unwrap_err();
        assert!(matches!(err, MutationError::SubjectNotFound { .. }));
    }

    #[test]
    fn test_field_parse() {
        assert_eq!("Attended".parse::<AttendanceField>(), Ok(AttendanceField::Attended));
        assert_eq!("total".parse::<AttendanceField>(), Ok(AttendanceField::Total));
        assert!("absent".parse::<AttendanceField>().is_err());
    }
}
