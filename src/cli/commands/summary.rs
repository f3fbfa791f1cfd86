//! Summary (dashboard) command handler

use super::{CommandResult, Session};
use academic_navigator::core::metrics::{
    attendance_percentage, attendance_status, classes_can_skip, classes_needed, cumulative_average,
    semester_attendance, semester_average, target_progress, AttendanceStatus, SAFE_ATTENDANCE,
};
use academic_navigator::core::models::{AppData, Day, Semester};
use academic_navigator::core::schedule::{class_at_time, current_day, now_hour, upcoming_class};
use std::fmt::Write;

/// Print the dashboard for a semester (default: current)
///
/// # Errors
/// The semester does not exist.
pub fn run(session: &Session, semester: Option<u32>) -> CommandResult {
    let semester = session.semester(semester)?;
    print!("{}", render(&session.data, semester, current_day(), now_hour()));
    Ok(())
}

/// Dashboard text at a given day and hour
pub fn render(data: &AppData, semester: &Semester, day: Day, hour: f64) -> String {
    let mut out = String::new();
    let sem_avg = semester_average(semester);
    let cum_avg = cumulative_average(&data.semesters);
    let attendance = semester_attendance(semester);

    let _ = writeln!(out, "\n=== {} ===\n", semester.name);
    let _ = writeln!(
        out,
        "Semester average:   {:.2} ({} graded credits)",
        sem_avg.average, sem_avg.total_credits
    );
    let _ = writeln!(
        out,
        "Cumulative average: {:.2} ({} graded credits)",
        cum_avg.average, cum_avg.total_credits
    );
    let _ = writeln!(
        out,
        "Target:             {:.2} ({:.1}% reached)",
        data.target_cgpa,
        target_progress(cum_avg.average, data.target_cgpa)
    );
    let _ = writeln!(
        out,
        "Attendance:         {}/{} classes",
        attendance.attended, attendance.total
    );

    let _ = writeln!(out, "\nAttendance alerts:");
    let mut alerts = 0;
    for subject in &semester.subjects {
        let pct = attendance_percentage(subject);
        let status = attendance_status(pct);
        if status == AttendanceStatus::Success {
            continue;
        }
        alerts += 1;
        let needed = classes_needed(subject.attendance, SAFE_ATTENDANCE)
            .map_or_else(|| "-".to_string(), |n| n.to_string());
        let _ = writeln!(
            out,
            "  ⚠ {} {pct:.1}% [{}] attend {needed} in a row to reach {SAFE_ATTENDANCE}%",
            subject.name,
            status.label()
        );
    }
    if alerts == 0 {
        let skippable: u32 = semester
            .subjects
            .iter()
            .map(|s| classes_can_skip(s.attendance, SAFE_ATTENDANCE))
            .min()
            .unwrap_or(0);
        let _ = writeln!(
            out,
            "  ✓ Every subject is at or above {SAFE_ATTENDANCE}% (can skip {skippable} more in the tightest one)"
        );
    }

    let entries = data.entries(day);
    let _ = writeln!(out, "\nToday ({day}):");
    if entries.is_empty() {
        let _ = writeln!(out, "  No classes");
    }
    match class_at_time(entries, hour) {
        Some(current) => {
            let _ = writeln!(out, "  Now:  {} {} ({})", current.time, current.full_name, current.room);
        }
        None if !entries.is_empty() => {
            let _ = writeln!(out, "  Now:  free");
        }
        None => {}
    }
    if let Some(next) = upcoming_class(entries, hour) {
        let _ = writeln!(out, "  Next: {} {} ({})", next.time, next.full_name, next.room);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use academic_navigator::core::models::{Attendance, Grade, NewSubject};

    #[test]
    fn test_render_default_data_monday_morning() {
        let data = AppData::default();
        let semester = data.active_semester().unwrap();
        let text = render(&data, semester, Day::Monday, 8.5);

        assert!(text.contains("=== Semester 6 ==="));
        assert!(text.contains("Target:             9.00"));
        assert!(text.contains("Now:  08:00-09:00 Applied Data Analytics (AB5-306)"));
    }

    #[test]
    fn test_render_lists_low_attendance() {
        let mut sem = Semester::new(1);
        let mut subject = NewSubject::new("Compilers", 4, Grade::Graded(8.0));
        subject.attendance = Attendance::new(5, 10);
        sem.subjects.push(subject.with_id("c1".into()));
        let data = AppData::with_semesters([sem], 8);

        let text = render(&data, data.semester(1).unwrap(), Day::Saturday, 9.0);
        assert!(text.contains("⚠ Compilers 50.0% [danger] attend 10 in a row"));
        assert!(text.contains("No classes"));
    }
}
