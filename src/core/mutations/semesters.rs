//! Semester mutations

use super::{rejected, MutationError, MutationResult};
use crate::core::models::{AppData, Semester, SemesterId};
use crate::debug;

/// Create the next semester (`max existing id + 1`) with no subjects
///
/// Returns the new data and the new id, which callers normally make active.
///
/// # Errors
/// [`MutationError::SemesterLimit`] when the new id would exceed `max_semester`.
pub fn add_semester(data: &AppData) -> MutationResult<(AppData, SemesterId)> {
    let highest = data.semester_ids().max().unwrap_or(0);
    let new_id = match highest.checked_add(1) {
        Some(id) if id <= data.max_semester => id,
        _ => {
            return Err(rejected(MutationError::SemesterLimit {
                next: highest.saturating_add(1),
                max: data.max_semester,
            }))
        }
    };

    let mut next = data.clone();
    next.semesters.insert(new_id, Semester::new(new_id));
    debug!("Added semester {new_id}");
    Ok((next, new_id))
}

/// Remove a semester and every subject in it
///
/// Returns the new data and the id that should become active: the smallest
/// remaining id. If `current_semester` pointed at the removed semester it is moved
/// there as well. Removing an id that does not exist changes nothing.
///
/// # Errors
/// [`MutationError::LastSemester`] when only one semester is left.
pub fn remove_semester(data: &AppData, id: SemesterId) -> MutationResult<(AppData, SemesterId)> {
    if data.semesters.len() <= 1 {
        return Err(rejected(MutationError::LastSemester));
    }

    let mut next = data.clone();
    if next.semesters.remove(&id).is_some() {
        debug!("Removed semester {id}");
    }
    let Some(active) = next.first_semester_id() else {
        return Err(rejected(MutationError::LastSemester));
    };
    if next.current_semester == id {
        next.current_semester = active;
    }
    Ok((next, active))
}

/// Mark `id` as the student's current semester
///
/// # Errors
/// [`MutationError::SemesterNotFound`] when the semester does not exist.
pub fn set_current_semester(data: &AppData, id: SemesterId) -> MutationResult<AppData> {
    if !data.semesters.contains_key(&id) {
        return Err(rejected(MutationError::SemesterNotFound(id)));
    }
    debug!("Current semester set to {id}");
    Ok(AppData {
        current_semester: id,
        ..data.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(ids: &[SemesterId], max: SemesterId) -> AppData {
        AppData::with_semesters(ids.iter().map(|&id| Semester::new(id)), max)
    }

    #[test]
    fn test_add_semester_uses_next_id() {
        let (after, id) = add_semester(&data(&[1, 2], 8)).unwrap();
        assert_eq!(id, 3);
        assert_eq!(after.semester(3).map(|s| s.name.as_str()), Some("Semester 3"));
    }

    #[test]
    fn test_add_semester_after_gap() {
        let (_, id) = add_semester(&data(&[1, 5], 8)).unwrap();
        assert_eq!(id, 6);
    }

    #[test]
    fn test_add_semester_at_limit_is_rejected() {
        let before = data(&[1, 2, 3], 3);
        let err = add_semester(&before).unwrap_err();
        assert_eq!(err, MutationError::SemesterLimit { next: 4, max: 3 });
        assert!(before.semester(4).is_none());
    }

    #[test]
    fn test_add_semester_at_largest_id_is_rejected() {
        let before = data(&[SemesterId::MAX], SemesterId::MAX);
        let err = add_semester(&before).unwrap_err();
        assert_eq!(
            err,
            MutationError::SemesterLimit { next: SemesterId::MAX, max: SemesterId::MAX }
        );
    }

    #[test]
    fn test_remove_last_semester_is_rejected() {
        let before = data(&[2], 8);
        assert_eq!(remove_semester(&before, 2).unwrap_err(), MutationError::LastSemester);
        assert_eq!(before.semesters.len(), 1);
    }

    #[test]
    fn test_remove_semester_picks_smallest_remaining() {
        let mut before = data(&[1, 2, 3], 8);
        before.current_semester = 1;
        let (after, active) = remove_semester(&before, 1).unwrap();
        assert_eq!(active, 2);
        assert_eq!(after.current_semester, 2);
        assert!(after.semester(1).is_none());
    }

    #[test]
    fn test_remove_other_semester_keeps_current() {
        let mut before = data(&[1, 2, 3], 8);
        before.current_semester = 3;
        let (after, active) = remove_semester(&before, 2).unwrap();
        assert_eq!(active, 1);
        assert_eq!(after.current_semester, 3);
    }

    #[test]
    fn test_set_current_semester() {
        let before = data(&[1, 2], 8);
        assert_eq!(set_current_semester(&before, 2).unwrap().current_semester, 2);
        assert_eq!(
            set_current_semester(&before, 9).unwrap_err(),
            MutationError::SemesterNotFound(9)
        );
    }
}
