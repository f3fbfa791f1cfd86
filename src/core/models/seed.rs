//! Built-in starting data set, used on first run and whenever stored data is unusable

use super::ids::generate_id;
use super::{AppData, Day, Grade, NewEntry, NewSubject, Semester, SemesterId, Timetable};

/// Subjects per semester as `(name, credits)`
const CURRICULUM: [&[(&str, u32)]; 8] = [
    &[
        ("Engineering Mathematics - I", 4),
        ("Engineering Physics", 3),
        ("Mechanics of Solids", 3),
        ("Basic Electronics", 3),
        ("Basic Mechanical Engineering", 3),
        ("Communication Skills in English", 2),
        ("Universal Human Values and Professional Ethics (MLC)", 1),
        ("Engineering Physics Lab", 1),
        ("Workshop Practice", 1),
        ("Engineering Graphics - I", 1),
    ],
    &[
        ("Engineering Mathematics - II", 4),
        ("Engineering Chemistry", 3),
        ("Biology for Engineers", 3),
        ("Basic Electrical Technology", 3),
        ("Problem Solving Using Computers", 3),
        ("Environmental Studies", 2),
        ("Human Rights and Constitution (MLC)", 1),
        ("Engineering Chemistry Lab", 1),
        ("PSUC Lab", 1),
        ("Engineering Graphics - II", 1),
    ],
    &[
        ("Engineering Mathematics - III", 3),
        ("Data Structures", 4),
        ("Digital Systems and Computer Organization", 4),
        ("Object Oriented Programming", 4),
        ("Principles of Data Communication", 3),
        ("Data Structures Lab", 1),
        ("Digital Systems Lab", 1),
        ("Object Oriented Programming Lab", 1),
    ],
    &[
        ("Engineering Mathematics - IV", 3),
        ("Database Management Systems", 3),
        ("Design and Analysis of Algorithms", 4),
        ("Computer Networks and Protocols", 3),
        ("Operating Systems", 4),
        ("Software Design Technology", 3),
        ("Database Systems Lab", 1),
        ("Operating Systems Lab", 1),
    ],
    &[
        ("Essentials of Management", 3),
        ("Information Security", 3),
        ("Embedded System Design", 3),
        ("Wireless Communication and Computing", 4),
        ("Statistical Data Analytics", 3),
        ("Embedded System Design Lab", 1),
        ("Information Security Lab", 1),
    ],
    &[
        ("Engineering Economics and Financial Management", 3),
        ("Network Design and Programming", 4),
        ("Data Mining", 3),
        ("Ethical Hacking", 3),
        ("Applied Data Analytics", 3),
        ("Mobile Application Development Lab", 2),
        ("Network Design and Programming Lab", 1),
    ],
    &[
        ("PE - 3 / Minor Specialization", 3),
        ("PE - 4 / Minor Specialization", 3),
        ("PE - 5", 3),
        ("PE - 6", 3),
        ("PE - 7", 3),
        ("OE - 2 (MLC)", 0),
    ],
    &[
        ("Internship / Project Work", 12),
        ("Professional Elective - 8", 3),
        ("Seminar", 2),
    ],
];

const ADA: (&str, &str) = ("ADA", "Applied Data Analytics");
const DM: (&str, &str) = ("DM", "Data Mining");
const EEFM: (&str, &str) = ("EEFM", "Engineering Economics and Financial Management");
const RW: (&str, &str) = ("RW", "Reporting and Writing");
const EH: (&str, &str) = ("EH", "Ethical Hacking");
const NPACN: (&str, &str) = (
    "NPACN",
    "Network Programming and Advanced Communication Networks",
);
const LABS: (&str, &str) = (
    "MADL+NDPL",
    "Mobile Application Development Lab + Network Design and Programming Lab",
);

const ROOM: &str = "AB5-306";

/// Weekly classes as `(day, (short, full), time, start, end)`
const SCHEDULE: &[(Day, (&str, &str), &str, f64, f64)] = &[
    (Day::Monday, ADA, "08:00-09:00", 8.0, 9.0),
    (Day::Monday, DM, "09:00-10:00", 9.0, 10.0),
    (Day::Monday, EEFM, "10:30-11:30", 10.5, 11.5),
    (Day::Monday, RW, "11:30-12:30", 11.5, 12.5),
    (Day::Monday, LABS, "14:00-16:30", 14.0, 16.5),
    (Day::Tuesday, EH, "13:00-14:00", 13.0, 14.0),
    (Day::Tuesday, NPACN, "14:00-15:00", 14.0, 15.0),
    (Day::Wednesday, EH, "08:00-09:00", 8.0, 9.0),
    (Day::Wednesday, NPACN, "09:00-10:00", 9.0, 10.0),
    (Day::Wednesday, ADA, "10:30-11:30", 10.5, 11.5),
    (Day::Wednesday, DM, "11:30-12:30", 11.5, 12.5),
    (Day::Thursday, LABS, "08:30-11:00", 8.5, 11.0),
    (Day::Thursday, EEFM, "13:00-14:00", 13.0, 14.0),
    (Day::Thursday, RW, "14:00-15:00", 14.0, 15.0),
    (Day::Friday, EEFM, "08:00-09:00", 8.0, 9.0),
    (Day::Friday, RW, "09:00-10:00", 9.0, 10.0),
    (Day::Friday, EH, "10:30-11:30", 10.5, 11.5),
    (Day::Friday, NPACN, "11:30-12:30", 11.5, 12.5),
    (Day::Saturday, ADA, "13:00-14:00", 13.0, 14.0),
    (Day::Saturday, DM, "14:00-15:00", 14.0, 15.0),
    (Day::Saturday, NPACN, "15:30-16:30", 15.5, 16.5),
];

/// Default cap on the number of semesters
pub const DEFAULT_MAX_SEMESTER: SemesterId = 8;
/// Default target cumulative average
pub const DEFAULT_TARGET: f64 = 9.0;
/// Default current semester
pub const DEFAULT_CURRENT_SEMESTER: SemesterId = 6;

/// The seed curriculum: eight ungraded semesters and a six-day timetable
#[must_use]
pub fn default_data() -> AppData {
    let semesters = (1..).zip(CURRICULUM).map(|(id, subjects)| {
        let mut semester = Semester::new(id);
        semester.subjects = subjects
            .iter()
            .map(|(name, credits)| NewSubject::new(*name, *credits, Grade::Ungraded).with_id(generate_id()))
            .collect();
        semester
    });

    let mut data = AppData::with_semesters(semesters, DEFAULT_MAX_SEMESTER);
    data.timetable = default_timetable();
    data.target_cgpa = DEFAULT_TARGET;
    data.current_semester = DEFAULT_CURRENT_SEMESTER;
    data
}

fn default_timetable() -> Timetable {
    let mut timetable = Timetable::new();
    for day in Day::ALL {
        timetable.insert(day, Vec::new());
    }
    for &(day, (short, full), time, start, end) in SCHEDULE {
        let entry = NewEntry {
            short_name: short.to_string(),
            full_name: full.to_string(),
            time: time.to_string(),
            room: ROOM.to_string(),
            start_hour: start,
            end_hour: end,
            color: None,
        };
        timetable.entry(day).or_default().push(entry.with_id(generate_id()));
    }
    timetable
}
