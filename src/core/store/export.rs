//! JSON export with computed averages
//!
//! The output is accepted by [`import_json`](super::import_json): ungraded subjects
//! are written as `"N/A"`, which import reads back as ungraded.

use crate::core::metrics::{cumulative_average, semester_average};
use crate::core::models::{AppData, Grade, Semester};
use serde_json::{json, Value};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn grade_value(grade: Grade) -> Value {
    grade.point().map_or_else(|| Value::from("N/A"), Value::from)
}

fn semester_value(semester: &Semester) -> Value {
    let average = semester_average(semester);
    let subjects: Vec<Value> = semester
        .subjects
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "credits": s.credits,
                "gradePoint": grade_value(s.grade),
                "attendance": s.attendance,
            })
        })
        .collect();

    json!({
        "id": semester.id,
        "name": semester.name,
        "sgpa": round2(average.average),
        "totalCredits": average.total_credits,
        "subjects": subjects,
    })
}

/// Export document as a [`Value`]
#[must_use]
pub fn export_value(data: &AppData) -> Value {
    let cumulative = cumulative_average(&data.semesters);
    let semesters: Vec<Value> = data.semesters.values().map(semester_value).collect();
    json!({
        "targetCGPA": data.target_cgpa,
        "cgpa": round2(cumulative.average),
        "totalCredits": cumulative.total_credits,
        "semesters": semesters,
    })
}

/// Pretty-printed export document
///
/// # Errors
/// Serialization failures from `serde_json`.
pub fn export_json(data: &AppData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&export_value(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{NewSubject, Semester};
    use crate::core::store::import_json;

    fn sample() -> AppData {
        let mut semester = Semester::new(1);
        semester.subjects.push(NewSubject::new("Maths", 4, Grade::Graded(10.0)).with_id("a".into()));
        semester.subjects.push(NewSubject::new("Lab", 2, Grade::Ungraded).with_id("b".into()));
        let mut data = AppData::with_semesters([semester, Semester::new(2)], 8);
        data.target_cgpa = 9.0;
        data
    }

    #[test]
    fn test_export_contains_averages_and_na() {
        let value = export_value(&sample());
        assert_eq!(value["cgpa"], 10.0);
        assert_eq!(value["totalCredits"], 4);
        let first = &value["semesters"][0];
        assert_eq!(first["sgpa"], 10.0);
        assert_eq!(first["totalCredits"], 4);
        assert_eq!(first["subjects"][1]["gradePoint"], "N/A");
        assert_eq!(value["semesters"][1]["sgpa"], 0.0);
    }

    #[test]
    fn test_export_is_reimportable() {
        let data = sample();
        let text = export_json(&data).unwrap();
        let back = import_json(&data, &text).unwrap();

        let first = back.semester(1).unwrap();
        assert_eq!(first.subjects.len(), 2);
        assert_eq!(first.subjects[0].grade, Grade::Graded(10.0));
        assert_eq!(first.subjects[1].grade, Grade::Ungraded);
        assert!(back.semester(2).unwrap().subjects.is_empty());
        assert!((back.target_cgpa - 9.0).abs() < f64::EPSILON);
    }
}
