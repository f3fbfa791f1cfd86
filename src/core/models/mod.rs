//! Data models for the academic tracker

pub mod app_data;
pub mod ids;
pub mod seed;
pub mod semester;
pub mod subject;
pub mod timetable;

pub use app_data::AppData;
pub use semester::{is_valid_semester_id, Semester, SemesterId, MAX_SEMESTER_ID};
pub use subject::{Attendance, Grade, NewSubject, Subject, GRADE_SCALE, MAX_GRADE_POINT};
pub use timetable::{Day, EntryColor, NewEntry, Timetable, TimetableEntry};
