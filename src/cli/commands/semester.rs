//! Semester and target command handlers

use super::{CommandResult, Session};
use crate::args::SemesterCommand;
use academic_navigator::core::metrics::{cumulative_average, semester_average};
use academic_navigator::core::models::AppData;
use academic_navigator::core::mutations::{
    add_semester, remove_semester, set_current_semester, set_target_average,
};
use std::fmt::Write;

/// Dispatch semester subcommands
///
/// # Errors
/// The mutation was rejected or the data could not be saved.
pub fn run(action: SemesterCommand, session: &mut Session) -> CommandResult {
    match action {
        SemesterCommand::List => {
            print!("{}", list(&session.data));
            Ok(())
        }
        SemesterCommand::Add => {
            let (next, id) = add_semester(&session.data).map_err(|e| e.to_string())?;
            // A new semester becomes the one being tracked
            let next = set_current_semester(&next, id).map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Added Semester {id} (now current)");
            Ok(())
        }
        SemesterCommand::Remove { id } => {
            if session.data.semester(id).is_none() {
                return Err(format!("semester {id} does not exist"));
            }
            let (next, _) = remove_semester(&session.data, id).map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Removed semester {id}; current semester is {}", session.data.current_semester);
            Ok(())
        }
        SemesterCommand::Select { id } => {
            let next = set_current_semester(&session.data, id).map_err(|e| e.to_string())?;
            session.commit(next)?;
            println!("✓ Current semester is now {id}");
            Ok(())
        }
    }
}

/// Set the target cumulative average
///
/// # Errors
/// The data could not be saved.
pub fn set_target(session: &mut Session, value: f64) -> CommandResult {
    let next = set_target_average(&session.data, value);
    let stored = next.target_cgpa;
    session.commit(next)?;
    println!("✓ Target set to {stored:.2}");
    Ok(())
}

/// Semester table with averages
pub fn list(data: &AppData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<4} {:<24} {:>8} {:>8} {:>8}", "ID", "NAME", "SUBJECTS", "CREDITS", "AVERAGE");
    for semester in data.semesters.values() {
        let avg = semester_average(semester);
        let marker = if semester.id == data.current_semester { "*" } else { " " };
        let _ = writeln!(
            out,
            "{marker}{:<3} {:<24} {:>8} {:>8} {:>8.2}",
            semester.id,
            semester.name,
            semester.subjects.len(),
            semester.registered_credits(),
            avg.average
        );
    }
    let cumulative = cumulative_average(&data.semesters);
    let _ = writeln!(
        out,
        "\nCumulative average {:.2} over {} graded credits (max {} semesters)",
        cumulative.average, cumulative.total_credits, data.max_semester
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_marks_current() {
        let data = AppData::default();
        let text = list(&data);
        assert!(text.contains("*6   Semester 6"));
        assert!(text.contains(" 1   Semester 1"));
        assert!(text.contains("max 8 semesters"));
    }
}
