//! Integration tests for persistence, import/export and share links

use academic_navigator::core::metrics::cumulative_average;
use academic_navigator::core::models::{AppData, Grade, NewSubject};
use academic_navigator::core::mutations::{add_semester, add_subject, set_target_average, MutationError};
use academic_navigator::core::store::{
    compress, decompress, export_json, import_json, load_or_default, payload_from_url, save_logged, share_url,
    DataStore, ImportError, JsonFileStore, MemoryStore, ShareError, ShareData,
};
use std::fs;

#[test]
fn file_store_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    assert!(store.path().ends_with("academicNavigatorData.json"));
    assert!(store.load().unwrap().is_none());

    let data = set_target_average(&AppData::default(), 8.5);
    let data = add_subject(&data, 6, NewSubject::new("Compiler Design", 4, Grade::Graded(8.0))).unwrap();
    assert!(save_logged(&store, &data));

    let reopened = JsonFileStore::in_dir(dir.path());
    assert_eq!(load_or_default(&reopened), data);
    assert!(!dir.path().join("academicNavigatorData.json.tmp").exists());
}

#[test]
fn persisted_blob_uses_original_field_names() {
    let store = MemoryStore::new();
    store.save(&AppData::default()).unwrap();
    let raw = store.raw().unwrap();

    for key in ["\"maxSemester\"", "\"targetCGPA\"", "\"currentSemester\"", "\"gradePoint\":-1.0", "\"shortName\"", "\"startHour\"", "\"MONDAY\""] {
        assert!(raw.contains(key), "missing {key}");
    }
}

#[test]
fn corrupt_blob_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    fs::write(store.path(), "{ not json").unwrap();

    let data = load_or_default(&store);
    assert_eq!(data.semesters.len(), 8);
    assert_eq!(data.current_semester, 6);
}

#[test]
fn stored_file_without_semesters_falls_back_to_seed() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::in_dir(dir.path());
    fs::write(
        store.path(),
        r#"{"semesters":{},"timetable":{},"maxSemester":8,"targetCGPA":9.0,"currentSemester":1}"#,
    )
    .unwrap();

    let data = load_or_default(&store);
    assert_eq!(data.semesters.len(), 8);
    assert_eq!(data.current_semester, 6);
}

#[test]
fn imported_ids_stay_in_range_for_new_semesters() {
    let current = AppData::default();
    assert!(matches!(
        import_json(&current, r#"{"semesters":[{"id":4294967295,"subjects":[]}]}"#),
        Err(ImportError::InvalidSemesterId { semester: 1, .. })
    ));
    assert!(matches!(
        import_json(&current, r#"{"semesters":[{"id":0,"subjects":[]}]}"#),
        Err(ImportError::InvalidSemesterId { semester: 1, .. })
    ));

    let data = import_json(&current, r#"{"semesters":[{"id":99,"subjects":[]}]}"#).unwrap();
    assert_eq!(data.max_semester, 99);
    assert!(matches!(
        add_semester(&data),
        Err(MutationError::SemesterLimit { next: 100, max: 99 })
    ));
}

#[test]
fn huge_imported_credits_do_not_break_averages() {
    let text = r#"{"semesters":[{"id":1,"subjects":[
        {"name":"A","credits":3000000000,"gradePoint":8},
        {"name":"B","credits":3000000000,"gradePoint":6}
    ]}]}"#;
    let data = import_json(&AppData::default(), text).unwrap();
    let avg = cumulative_average(&data.semesters);
    assert!((avg.average - 7.0).abs() < 1e-9);
    assert_eq!(avg.total_credits, u32::MAX);
}

#[test]
fn export_then_import_restores_grades() {
    let data = AppData::default();
    let data = add_subject(&data, 2, NewSubject::new("Graded One", 3, Grade::Graded(7.0))).unwrap();
    let json = export_json(&data).unwrap();

    let imported = import_json(&AppData::default(), &json).unwrap();
    let sem2 = imported.semester(2).unwrap();
    let graded = sem2.subjects.iter().find(|s| s.name == "Graded One").unwrap();
    assert_eq!(graded.grade, Grade::Graded(7.0));
    assert!(sem2.subjects.iter().filter(|s| s.name != "Graded One").all(|s| !s.grade.is_graded()));
    assert_eq!(imported.subjects().count(), data.subjects().count());
}

#[test]
fn import_rejects_malformed_documents() {
    let current = AppData::default();
    assert!(matches!(import_json(&current, "nope"), Err(ImportError::Parse(_))));
    assert!(matches!(import_json(&current, "{}"), Err(ImportError::SemestersNotList)));
    assert!(matches!(import_json(&current, r#"{"semesters": []}"#), Err(ImportError::NoSemesters)));
    assert!(matches!(
        import_json(&current, r#"{"semesters": [{"id": 1}]}"#),
        Err(ImportError::MissingSubjects { semester: 1 })
    ));
    assert!(matches!(
        import_json(&current, r#"{"semesters": [{"subjects": [{"name": "X"}]}]}"#),
        Err(ImportError::MissingField { semester: 1, subject: 1, field: "credits" })
    ));
}

#[test]
fn share_link_round_trip_through_text() {
    let data = add_subject(&AppData::default(), 1, NewSubject::new("Shared", 2, Grade::Graded(10.0))).unwrap();
    let url = share_url("https://example.org/nav/", &data).unwrap();
    let link = format!("{url}&utm=x");

    let opened = decompress(payload_from_url(&link).unwrap()).unwrap().into_app_data().unwrap();
    assert_eq!(ShareData::from(&opened), ShareData::from(&data));
    assert!(opened.subjects().all(|s| s.id.len() == 9));
}

#[test]
fn share_link_errors() {
    assert!(matches!(payload_from_url("https://example.org/"), Err(ShareError::MissingPayload)));
    assert!(matches!(payload_from_url("https://example.org/#data="), Err(ShareError::MissingPayload)));
    assert!(decompress("!!!").is_err());

    let empty: ShareData = serde_json::from_str(r#"{"t":9.0,"s":[]}"#).unwrap();
    let payload = compress(&empty).unwrap();
    assert!(matches!(
        decompress(&payload).unwrap().into_app_data(),
        Err(ShareError::NoSemesters)
    ));
}
