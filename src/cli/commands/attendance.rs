//! Attendance command handlers

use super::{CommandResult, Session};
use crate::args::AttendanceCommand;
use academic_navigator::core::metrics::{
    attendance_percentage, attendance_status, classes_can_skip, classes_needed, percentage_of,
    semester_attendance, SAFE_ATTENDANCE,
};
use academic_navigator::core::models::{Semester, SemesterId};
use academic_navigator::core::mutations::{mark_class, set_attendance_absolute, update_attendance_delta};
use std::fmt::Write;

/// Dispatch attendance subcommands
///
/// # Errors
/// Unknown semester or subject, or the data could not be saved.
pub fn run(action: AttendanceCommand, session: &mut Session) -> CommandResult {
    match action {
        AttendanceCommand::Show { semester } => {
            print!("{}", table(session.semester(semester)?));
            Ok(())
        }
        AttendanceCommand::Adjust {
            subject,
            field,
            delta,
            semester,
        } => {
            let sem = session.semester_id(semester);
            let next = update_attendance_delta(&session.data, sem, &subject, delta, field)
                .map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ {field} {delta:+}: {}", counters(session, sem, &subject));
            Ok(())
        }
        AttendanceCommand::Set {
            subject,
            attended,
            total,
            semester,
        } => {
            let sem = session.semester_id(semester);
            let next = set_attendance_absolute(&session.data, sem, &subject, attended, total)
                .map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Attendance set: {}", counters(session, sem, &subject));
            Ok(())
        }
        AttendanceCommand::Mark {
            subject,
            absent,
            semester,
        } => {
            let sem = session.semester_id(semester);
            let next = mark_class(&session.data, sem, &subject, !absent).map_err(|e| e.to_string())?;
            session.commit(next)?;
            let how = if absent { "absent" } else { "present" };
            println!("✓ Marked {how}: {}", counters(session, sem, &subject));
            Ok(())
        }
    }
}

/// `attended/total (pct%)` for a subject after a change
fn counters(session: &Session, semester: SemesterId, subject_id: &str) -> String {
    session
        .data
        .semester(semester)
        .and_then(|s| s.subject(subject_id))
        .map_or_else(String::new, |s| {
            format!(
                "{} {}/{} ({:.1}%)",
                s.name,
                s.attendance.attended,
                s.attendance.total,
                attendance_percentage(s)
            )
        })
}

/// Attendance table for one semester
pub fn table(semester: &Semester) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} attendance\n", semester.name);
    let _ = writeln!(
        out,
        "{:<10} {:<44} {:>9} {:>6} {:>7} {:<8} {}",
        "ID", "NAME", "CLASSES", "MISSED", "%", "STATUS", "NOTE"
    );
    for subject in &semester.subjects {
        let pct = attendance_percentage(subject);
        let note = match classes_needed(subject.attendance, SAFE_ATTENDANCE) {
            Some(0) => format!("can skip {}", classes_can_skip(subject.attendance, SAFE_ATTENDANCE)),
            Some(n) => format!("attend next {n}"),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "{:<10} {:<44} {:>9} {:>6} {:>6.1}% {:<8} {note}",
            subject.id,
            subject.name,
            format!("{}/{}", subject.attendance.attended, subject.attendance.total),
            subject.attendance.missed(),
            pct,
            attendance_status(pct).label()
        );
    }
    let overall = semester_attendance(semester);
    let _ = writeln!(
        out,
        "\nOverall {}/{} ({:.1}%)",
        overall.attended,
        overall.total,
        percentage_of(overall)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use academic_navigator::core::models::{Attendance, Grade, NewSubject};

    #[test]
    fn test_table_notes() {
        let mut sem = Semester::new(2);
        let mut low = NewSubject::new("Chemistry", 3, Grade::Ungraded);
        low.attendance = Attendance::new(6, 10);
        let mut high = NewSubject::new("Biology", 3, Grade::Ungraded);
        high.attendance = Attendance::new(10, 10);
        sem.subjects.push(low.with_id("chem".into()));
        sem.subjects.push(high.with_id("bio".into()));

        let text = table(&sem);
        assert!(text.contains("attend next 6"));
        let chem = text.lines().find(|l| l.starts_with("chem")).unwrap();
        assert!(chem.contains("     6/10      4   60.0% danger"));
        assert!(text.contains("can skip 3"));
        assert!(text.contains("Overall 16/20 (80.0%)"));
    }
}
