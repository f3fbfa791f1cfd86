//! JSON import
//!
//! The document is validated as a whole before anything is built, so a rejected
//! import never produces partial data.
//!
//! ```json
//! { "targetCGPA": 9, "semesters": [ { "id": 1, "name": "Semester 1",
//!   "subjects": [ { "name": "Data Mining", "credits": 3, "gradePoint": "N/A" } ] } ] }
//! ```

use crate::core::models::{
    ids, is_valid_semester_id, AppData, Attendance, Grade, Semester, SemesterId, Subject, MAX_GRADE_POINT,
    MAX_SEMESTER_ID,
};
use crate::{info, warn};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// Reasons an import document is rejected
#[derive(Debug, Error)]
pub enum ImportError {
    /// Not JSON at all
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// `semesters` is missing or not a list
    #[error("'semesters' must be a list")]
    SemestersNotList,

    /// A semester has no `subjects` list
    #[error("semester #{semester} has no 'subjects' list")]
    MissingSubjects {
        /// 1-based position of the semester in the document
        semester: usize,
    },

    /// A subject lacks a required field
    #[error("subject #{subject} of semester #{semester} is missing '{field}'")]
    MissingField {
        /// 1-based position of the semester
        semester: usize,
        /// 1-based position of the subject within the semester
        subject: usize,
        /// Field name (`name` or `credits`)
        field: &'static str,
    },

    /// The `semesters` list is empty
    #[error("the import contains no semesters")]
    NoSemesters,

    /// A semester id is not an integer in `1..=MAX_SEMESTER_ID`
    #[error("semester #{semester} has invalid id {id} (expected 1..={max})", max = MAX_SEMESTER_ID)]
    InvalidSemesterId {
        /// 1-based position of the semester in the document
        semester: usize,
        /// The offending value as written
        id: Value,
    },
}

/// Explicit `id`, or the position + 1 when absent
fn semester_id(doc: &Value, position: usize) -> Result<SemesterId, ImportError> {
    let invalid = |id: Value| ImportError::InvalidSemesterId {
        semester: position + 1,
        id,
    };
    match doc.get("id") {
        None | Some(Value::Null) => SemesterId::try_from(position + 1)
            .ok()
            .filter(|&id| is_valid_semester_id(id))
            .ok_or_else(|| invalid(Value::from(position + 1))),
        Some(raw) => raw
            .as_u64()
            .and_then(|id| SemesterId::try_from(id).ok())
            .filter(|&id| is_valid_semester_id(id))
            .ok_or_else(|| invalid(raw.clone())),
    }
}

fn validate(root: &Value) -> Result<Vec<(SemesterId, &Value)>, ImportError> {
    let semesters = root
        .get("semesters")
        .and_then(Value::as_array)
        .ok_or(ImportError::SemestersNotList)?;
    if semesters.is_empty() {
        return Err(ImportError::NoSemesters);
    }

    let mut checked = Vec::with_capacity(semesters.len());
    for (si, semester) in semesters.iter().enumerate() {
        let id = semester_id(semester, si)?;
        let subjects = semester
            .get("subjects")
            .and_then(Value::as_array)
            .ok_or(ImportError::MissingSubjects { semester: si + 1 })?;
        for (ji, subject) in subjects.iter().enumerate() {
            let missing = |field| ImportError::MissingField {
                semester: si + 1,
                subject: ji + 1,
                field,
            };
            subject
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| missing("name"))?;
            subject
                .get("credits")
                .and_then(Value::as_f64)
                .ok_or_else(|| missing("credits"))?;
        }
        checked.push((id, semester));
    }
    Ok(checked)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_f64)
        .map_or(0, |n| n.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}

fn grade(value: Option<&Value>) -> Grade {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or(Grade::Ungraded, Grade::new),
        Some(Value::String(s)) => s.parse().unwrap_or(Grade::Ungraded),
        _ => Grade::Ungraded,
    }
}

fn attendance(value: Option<&Value>) -> Attendance {
    value.and_then(Value::as_object).map_or_else(Attendance::default, |obj: &Map<String, Value>| {
        Attendance::new(count(obj.get("attended")), count(obj.get("total")))
    })
}

/// Build new data from an import document, keeping the current timetable
///
/// Subjects get fresh ids. A semester without an `id` takes its position + 1; ids
/// must lie in `1..=MAX_SEMESTER_ID`. A
/// missing `targetCGPA` keeps the current target. `maxSemester` grows to cover the
/// imported ids and `currentSemester` falls back to the smallest imported id.
///
/// # Errors
/// Any [`ImportError`]; `current` is never modified.
pub fn import_json(current: &AppData, text: &str) -> Result<AppData, ImportError> {
    let root: Value = serde_json::from_str(text)?;
    let documents = validate(&root).inspect_err(|e| warn!("Import rejected: {e}"))?;

    let mut taken: HashSet<String> = HashSet::new();
    let mut semesters = BTreeMap::new();
    for (id, doc) in documents {
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| Semester::default_name(id), str::to_string);

        let subjects = doc["subjects"]
            .as_array()
            .into_iter()
            .flatten()
            .map(|s| {
                let subject_id = ids::unique_id(|candidate| taken.contains(candidate));
                taken.insert(subject_id.clone());
                Subject {
                    id: subject_id,
                    name: s["name"].as_str().unwrap_or_default().to_string(),
                    credits: count(s.get("credits")),
                    grade: grade(s.get("gradePoint")),
                    attendance: attendance(s.get("attendance")),
                }
            })
            .collect();

        if semesters.insert(id, Semester { id, name, subjects }).is_some() {
            warn!("Semester id {id} appears more than once; keeping the last one");
        }
    }

    let target_cgpa = root
        .get("targetCGPA")
        .and_then(Value::as_f64)
        .map_or(current.target_cgpa, |t| t.clamp(0.0, MAX_GRADE_POINT));
    let highest = semesters.keys().next_back().copied().unwrap_or(1);
    let smallest = semesters.keys().next().copied().unwrap_or(1);
    let current_semester = if semesters.contains_key(&current.current_semester) {
        current.current_semester
    } else {
        smallest
    };

    info!("Imported {} semesters", semesters.len());
    Ok(AppData {
        semesters,
        timetable: current.timetable.clone(),
        max_semester: current.max_semester.max(highest),
        target_cgpa,
        current_semester,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Day;

    #[test]
    fn test_semesters_not_a_list() {
        let current = AppData::default();
        let err = import_json(&current, r#"{"semesters": "not-an-array"}"#).unwrap_err();
        assert!(matches!(err, ImportError::SemestersNotList));
    }

    #[test]
    fn test_missing_semesters() {
        let err = import_json(&AppData::default(), r#"{"targetCGPA": 8}"#).unwrap_err();
        assert!(matches!(err, ImportError::SemestersNotList));
    }

    #[test]
    fn test_empty_semesters() {
        let err = import_json(&AppData::default(), r#"{"semesters": []}"#).unwrap_err();
        assert!(matches!(err, ImportError::NoSemesters));
    }

    #[test]
    fn test_missing_subjects() {
        let text = r#"{"semesters": [{"id": 1, "subjects": []}, {"id": 2}]}"#;
        let err = import_json(&AppData::default(), text).unwrap_err();
        assert!(matches!(err, ImportError::MissingSubjects { semester: 2 }));
    }

    #[test]
    fn test_missing_credits() {
        let text = r#"{"semesters": [{"subjects": [{"name": "A", "credits": 3}, {"name": "B"}]}]}"#;
        let err = import_json(&AppData::default(), text).unwrap_err();
        assert!(matches!(
            err,
            ImportError::MissingField { semester: 1, subject: 2, field: "credits" }
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            import_json(&AppData::default(), "semesters:"),
            Err(ImportError::Parse(_))
        ));
    }

    #[test]
    fn test_import_builds_data() {
        let current = AppData::default();
        let text = r#"{
            "targetCGPA": 8.5,
            "semesters": [
                {"id": 1, "name": "First", "subjects": [
                    {"name": "Maths", "credits": 4, "gradePoint": 9},
                    {"name": "Lab", "credits": 1, "gradePoint": "N/A",
                     "attendance": {"attended": 12, "total": 10}}
                ]},
                {"subjects": []}
            ]
        }"#;
        let data = import_json(&current, text).unwrap();

        assert_eq!(data.semester_ids().collect::<Vec<_>>(), [1, 2]);
        let first = data.semester(1).unwrap();
        assert_eq!(first.name, "First");
        assert_eq!(first.subjects[0].grade, Grade::Graded(9.0));
        assert_eq!(first.subjects[1].grade, Grade::Ungraded);
        assert_eq!(first.subjects[1].attendance, Attendance { attended: 10, total: 10 });
        assert_eq!(first.subjects[0].attendance, Attendance::default());
        assert_ne!(first.subjects[0].id, first.subjects[1].id);
        assert_eq!(data.semester(2).unwrap().name, "Semester 2");

        assert!((data.target_cgpa - 8.5).abs() < f64::EPSILON);
        assert_eq!(data.current_semester, 1);
        assert_eq!(data.max_semester, 8);
        assert_eq!(data.entries(Day::Monday), current.entries(Day::Monday));
    }

    #[test]
    fn test_semester_id_out_of_range() {
        for id in ["0", "4294967295", "-3", "\"two\"", "1.5"] {
            let text = format!(r#"{{"semesters": [{{"subjects": []}}, {{"id": {id}, "subjects": []}}]}}"#);
            let err = import_json(&AppData::default(), &text).unwrap_err();
            assert!(
                matches!(err, ImportError::InvalidSemesterId { semester: 2, .. }),
                "id {id} gave {err}"
            );
        }
    }

    #[test]
    fn test_import_raises_max_semester() {
        let text = r#"{"semesters": [{"id": 12, "subjects": []}]}"#;
        let data = import_json(&AppData::default(), text).unwrap();
        assert_eq!(data.max_semester, 12);
        assert_eq!(data.current_semester, 12);
    }
}
